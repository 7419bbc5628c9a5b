mod asset;
mod credential;
mod text;

pub use asset::*;
pub use credential::*;
