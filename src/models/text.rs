use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// Accepts any JSON scalar and keeps its text form, the way the column
/// would store it: `1001` becomes `"1001"`, `true` becomes `"true"`, `null`
/// becomes `None`. Arrays and objects are rejected.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string, number or boolean, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Field {
        #[serde(deserialize_with = "lenient_text")]
        value: Option<String>,
    }

    fn parse(value: Value) -> Result<Option<String>, serde_json::Error> {
        serde_json::from_value::<Field>(value).map(|p| p.value)
    }

    #[test]
    fn scalars_keep_their_text_form() {
        assert_eq!(parse(json!({ "value": "AST-1" })).unwrap().as_deref(), Some("AST-1"));
        assert_eq!(parse(json!({ "value": 1001 })).unwrap().as_deref(), Some("1001"));
        assert_eq!(parse(json!({ "value": 2.5 })).unwrap().as_deref(), Some("2.5"));
        assert_eq!(parse(json!({ "value": -7 })).unwrap().as_deref(), Some("-7"));
        assert_eq!(parse(json!({ "value": false })).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn null_and_missing_are_none() {
        assert_eq!(parse(json!({ "value": null })).unwrap(), None);
        assert_eq!(parse(json!({})).unwrap(), None);
    }

    #[test]
    fn containers_are_rejected() {
        assert!(parse(json!({ "value": [1, 2] })).is_err());
        assert!(parse(json!({ "value": { "a": 1 } })).is_err());
    }
}
