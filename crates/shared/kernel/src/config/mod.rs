use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const ENV_PREFIX: &str = "HHUB";
const DEFAULT_CONFIG_FILE: &str = "server";

#[hhub_derive::hhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: an optional file, then `HHUB__*` environment overrides.
///
/// The file path defaults to `server` in the working directory; any extension the
/// `config` crate understands is accepted (`server.toml`, `server.json`, ...). A missing
/// file is not an error, so a bare environment (or plain defaults) is enough to boot.
///
/// Nested keys use a double underscore: `HHUB__DATABASE__URL` maps to `database.url`.
///
/// # Errors
/// Fails when the file is malformed or the merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use hhub_kernel::config::load_config;
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

    info!("Loading config from {}", effective_path.display());

    let config = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
