// ═══════════════════════════════════════════════════════════════════
// Error Tests — display formats and conversions
// ═══════════════════════════════════════════════════════════════════

use dividend_tax_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("quantity must not be negative".to_string());
        assert_eq!(
            err.to_string(),
            "Transaction validation failed: quantity must not be negative"
        );
    }

    #[test]
    fn invariant_violation() {
        let err = CoreError::InvariantViolation("sold more than held".to_string());
        assert_eq!(err.to_string(), "Portfolio invariant violated: sold more than held");
    }

    #[test]
    fn api_error_names_the_provider() {
        let err = CoreError::Api {
            provider: "FMP".to_string(),
            message: "HTTP 429".to_string(),
        };
        assert_eq!(err.to_string(), "API error (FMP): HTTP 429");
    }

    #[test]
    fn rate_not_available_names_the_pair_and_date() {
        let err = CoreError::RateNotAvailable {
            from: "USD".to_string(),
            to: "PLN".to_string(),
            date: "2024-03-14".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No USD/PLN exchange rate available on or before 2024-03-14"
        );
    }

    #[test]
    fn quote_not_available() {
        let err = CoreError::QuoteNotAvailable("AAPL".to_string());
        assert_eq!(err.to_string(), "No quote available for symbol: AAPL");
    }
}

mod conversions {
    use super::*;

    #[test]
    fn io_errors_become_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(_)));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn serde_errors_become_deserialization() {
        let bad = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CoreError = bad.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
