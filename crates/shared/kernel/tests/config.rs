use hhub_kernel::config::load_config;
use hhub_kernel::domain::config::ApiConfig;
use std::fs;

#[test]
fn loads_toml_file_over_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8080

[database]
url = "sqlite::memory:"
seed = true
"#,
    )?;

    let cfg: ApiConfig = load_config(Some(&path))?;

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "sqlite::memory:");
    assert!(cfg.database.seed);
    assert_eq!(cfg.database.max_connections, 5);
    assert_eq!(cfg.logging.level, "info");
    Ok(())
}

#[test]
fn missing_file_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let cfg: ApiConfig = load_config(Some(dir.path().join("absent")))?;

    assert_eq!(cfg.server.port, 5555);
    assert_eq!(cfg.database.url, "sqlite://app.db");
    Ok(())
}

#[test]
fn malformed_values_are_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = \"not a port\"\n")?;

    let result: Result<ApiConfig, _> = load_config(Some(&path));

    assert!(result.is_err());
    Ok(())
}
