use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable prefix; `NCSS__SERVER__PORT=8080` maps to `server.port`.
pub const ENV_PREFIX: &str = "NCSS";
const DEFAULT_CONFIG_FILE: &str = "server";

#[ncss_derive::ncss_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// 1. **File**: `path` (default `server`, extension resolved by the `config` crate:
///    `server.toml`, `server.json`, ...). The file is optional; a missing file leaves
///    every section at its default.
/// 2. **Environment**: variables prefixed with `NCSS__`, nested keys separated by `__`.
///    `NCSS__UNITS__DEFINITIONS` takes a `;` separated list of unit definitions.
///
/// # Errors
/// * The file exists but cannot be parsed.
/// * The merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use ncss_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(";")
                .with_list_parse_key("units.definitions")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
