//! Validating decode step at the API boundary.
//!
//! Every response body goes through [`decode_json`]: serde checks the shape,
//! then [`Validate`] checks the values. Shape or value mismatches surface as
//! a typed [`DecodeError`] instead of leaking half-parsed data into pages.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("resposta inválida do servidor (linha {line}, coluna {column}): {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("campo `{field}` inválido: {reason}")]
    Invalid { field: String, reason: String },
}

impl DecodeError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path, used when a nested value fails validation.
    pub fn within(self, parent: &str) -> Self {
        match self {
            Self::Invalid { field, reason } => Self::Invalid {
                field: format!("{}.{}", parent, field),
                reason,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Semantic checks applied after deserialisation.
pub trait Validate {
    fn validate(&self) -> Result<(), DecodeError> {
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), DecodeError> {
        for (i, item) in self.iter().enumerate() {
            item.validate().map_err(|e| e.within(&format!("[{}]", i)))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), DecodeError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl Validate for serde_json::Value {}

/// Decode and validate a JSON body.
pub fn decode_json<T>(body: &str) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(body)?;
    value.validate()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Qty {
        value: i64,
    }

    impl Validate for Qty {
        fn validate(&self) -> Result<(), DecodeError> {
            if self.value < 0 {
                return Err(DecodeError::invalid("value", "negativo"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_shape_mismatch_is_json_error() {
        let err = decode_json::<Qty>(r#"{"value": "x"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json { line: 1, .. }));
    }

    #[test]
    fn test_value_check_is_invalid_error() {
        let err = decode_json::<Qty>(r#"{"value": -1}"#).unwrap_err();
        assert_eq!(err, DecodeError::invalid("value", "negativo"));
    }

    #[test]
    fn test_nested_path_in_vec() {
        let err = decode_json::<Vec<Qty>>(r#"[{"value": 1}, {"value": -2}]"#).unwrap_err();
        assert_eq!(err, DecodeError::invalid("[1].value", "negativo"));
    }

    #[test]
    fn test_valid_body() {
        let q = decode_json::<Qty>(r#"{"value": 3, "extra": true}"#).unwrap();
        assert_eq!(q.value, 3);
    }
}
