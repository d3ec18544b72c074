//! Integration tests for error types

#[cfg(test)]
mod tests {
    use itpam_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Connection {
            endpoint: "http://pam:8080/itpam".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_connection_message_names_endpoint() {
        let err = NetworkError::Connection {
            endpoint: "http://pam:8080/itpam".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to connect to [http://pam:8080/itpam]. Please verify host and port."
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_error_clone() {
        let err = ProcessError::InvalidParameter {
            input: "novalue".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_user_facing_codes() {
        let err: Error = SoapError::MalformedResponse("eof".into()).into();
        assert_eq!(err.user_code(), Some("soap.malformed"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }
}
