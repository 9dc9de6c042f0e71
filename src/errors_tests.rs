//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::TrendRankError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = TrendRankError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_schema_error() {
        let error = TrendRankError::schema("missing column naver_trend_sum");
        assert!(matches!(error, TrendRankError::Schema(_)));
        let display = format!("{error}");
        assert!(display.starts_with("Schema violation"));
        assert!(display.contains("naver_trend_sum"));
    }

    #[test]
    fn test_invalid_config_error() {
        let error = TrendRankError::invalid_config("top_n must be positive");
        assert!(matches!(error, TrendRankError::InvalidConfig(_)));
        assert!(format!("{error}").contains("configuration"));
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: TrendRankError = io_err.into();
        assert!(matches!(err, TrendRankError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");
        let json_err = parse_result.unwrap_err();
        let err: TrendRankError = json_err.into();
        assert!(matches!(err, TrendRankError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let err: TrendRankError = toml_err.into();
        assert!(matches!(err, TrendRankError::TomlParsing(_)));
    }

    // ====== Classification Tests ======

    #[test]
    fn test_schema_violation_classification() {
        assert!(TrendRankError::schema("x").is_schema_violation());

        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert!(TrendRankError::from(json_err).is_schema_violation());

        assert!(!TrendRankError::invalid_config("x").is_schema_violation());
        assert!(!TrendRankError::Custom("x".into()).is_schema_violation());
    }
}
