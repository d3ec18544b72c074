//! Integration tests for config

#[cfg(test)]
mod tests {
    use itpam_config::*;
    use itpam_types::OutputFormat;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"

[server]
domain_url = "http://pamserver:8080/itpam"
username = "pamadmin"

[wait]
polling_seconds = 10
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.server.username.as_deref(), Some("pamadmin"));
        assert_eq!(config.wait.polling_seconds, 10);
        assert_eq!(config.wait.timeout_seconds, 600);
        assert_eq!(config.network.timeout, 300);
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://pamserver:8080/itpam"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(&dir.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            itpam_errors::Error::Config(itpam_errors::ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = Config::from_toml("[wait]\npolling_seconds = \"fast\"").unwrap_err();
        assert!(matches!(
            err,
            itpam_errors::Error::Config(itpam_errors::ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("ITPAM_OUTPUT", "json");
        std::env::set_var("ITPAM_TIMEOUT_SECONDS", "120");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.wait.timeout_seconds, 120);

        // Clean up
        std::env::remove_var("ITPAM_OUTPUT");
        std::env::remove_var("ITPAM_TIMEOUT_SECONDS");
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("ITPAM_OUTPUT", "invalid");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        // Clean up
        std::env::remove_var("ITPAM_OUTPUT");
    }
}
