use thiserror::Error;

use crate::parse::ParseError;

/// Why a full-rule definition did not convert.
///
/// Conversion failures never abort resolution: the defective definition is
/// logged and contributes no rule, and during incremental synchronization it
/// behaves like a deletion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("definition '{name}' has no match pattern")]
    MissingPattern { name: String },

    #[error("definition '{name}' field '{field}' has unsupported value '{value}'")]
    UnsupportedValue {
        name: String,
        field: String,
        value: String,
    },

    #[error("definition '{name}' has a malformed target link: {source}")]
    MalformedLink { name: String, source: ParseError },

    #[error("definition '{name}' has malformed conditions: {source}")]
    MalformedConditions { name: String, source: ParseError },

    #[error("item '{name}' is not a rule definition")]
    NotARule { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pattern_message() {
        let err = ConvertError::MissingPattern {
            name: "broken".into(),
        };
        assert_eq!(err.to_string(), "definition 'broken' has no match pattern");
    }

    #[test]
    fn unsupported_value_message() {
        let err = ConvertError::UnsupportedValue {
            name: "r".into(),
            field: "matchtype".into(),
            value: "sometimes".into(),
        };
        assert_eq!(
            err.to_string(),
            "definition 'r' field 'matchtype' has unsupported value 'sometimes'"
        );
    }

    #[test]
    fn not_a_rule_message() {
        let err = ConvertError::NotARule { name: "folder".into() };
        assert_eq!(err.to_string(), "item 'folder' is not a rule definition");
    }
}
