//! Integration tests for haven-config

use haven_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = HavenConfig::default();
    assert!(config.validate_all().is_ok());
    assert_eq!(config.backend.mode, BackendMode::Memory);
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("HAVEN_SERVER_PORT", Some("8081")),
        ("HAVEN_ENVIRONMENT", Some("production")),
        ("HAVEN_BACKEND_MODE", Some("remote")),
        ("HAVEN_BACKEND_URL", Some("https://project.supabase.co")),
        ("HAVEN_BACKEND_ANON_KEY", Some("anon")),
        ("HAVEN_BACKEND_TIMEOUT", Some("5")),
        ("HAVEN_LOG_LEVEL", Some("debug")),
        ("HAVEN_AUTH_PROTECTED_PATHS", Some("/account, /favorites")),
    ];

    with_vars(vars, || {
        let config = ConfigLoader::new().from_env().unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(config.backend.mode, BackendMode::Remote);
        assert_eq!(config.backend.timeout, Duration::from_secs(5));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.auth.protected_paths, vec!["/account", "/favorites"]);
    });
}

#[test]
fn test_invalid_env_value_reported() {
    with_vars(vec![("HAVEN_SERVER_PORT", Some("eighty"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    });
}

#[test]
fn test_remote_mode_without_url_fails_validation() {
    with_vars(
        vec![
            ("HAVEN_BACKEND_MODE", Some("remote")),
            ("HAVEN_BACKEND_URL", None::<&str>),
        ],
        || {
            let err = ConfigLoader::new().from_env().unwrap_err();
            assert!(matches!(err, ConfigError::DomainError { ref domain, .. } if domain == "backend"));
        },
    );
}

#[test]
fn test_load_from_file_with_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
server:
  port: 4000
  environment: production
  static_dir: ./public
backend:
  mode: memory
logging:
  level: warn
  format: json
"#
    )
    .unwrap();

    with_vars(vec![("HAVEN_SERVER_PORT", Some("4100"))], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(config.server.static_dir.as_deref(), Some(std::path::Path::new("./public")));
        assert_eq!(config.logging.format, LogFormat::Json);
    });
}

#[test]
fn test_missing_file() {
    let err = ConfigLoader::new().from_file("/nonexistent/haven.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}
