use ncss_kernel::config::{ConfigError, load_config};
use ncss_kernel::domain::config::ApiConfig;
use ncss_kernel::domain::constants::DEFAULT_CUSTOM_UNIT;
use std::fs;
use tempfile::tempdir;

#[test]
fn reads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
address = "127.0.0.1"
port = 8080

[units]
definitions = ["tims = 1.5 * m = tims", "smoot = 1.7018 * m = smoot"]
"#,
    )?;

    let cfg: ApiConfig = load_config(Some(&path))?;
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.address.to_string(), "127.0.0.1");
    assert_eq!(cfg.units.definitions.len(), 2);
    Ok(())
}

#[test]
fn missing_file_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let cfg: ApiConfig = load_config(Some(dir.path().join("absent")))?;

    assert_eq!(cfg.server.port, 4583);
    assert_eq!(cfg.units.definitions, vec![DEFAULT_CUSTOM_UNIT.to_owned()]);
    Ok(())
}

#[test]
fn malformed_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nport = ")?;

    let err = load_config::<ApiConfig>(Some(&path)).expect_err("broken toml");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"), "{err}");
    Ok(())
}
