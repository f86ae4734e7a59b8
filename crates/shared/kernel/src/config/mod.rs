use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[evreg_derive::evreg_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Environment prefix; `EVREG__SERVER__PORT=8080` maps to `server.port`.
pub const ENV_PREFIX: &str = "EVREG";

/// Loads `T` from a base file overlaid with `EVREG__`-prefixed environment variables.
///
/// The file is required. Without a path it is `server` in the working directory, with
/// the extension (`.toml`, `.yaml`, `.json`, ...) picked up by the `config` crate.
/// Nested keys use a double underscore (`EVREG__STORAGE__DATA_DIR`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, an environment value is
/// malformed, or the merged tree does not match `T`.
///
/// # Example
/// ```rust,no_run
/// use evreg_kernel::config::load_config;
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
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{ApiConfig, LoadPolicy};
    use serial_test::serial;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("server.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    #[serial]
    fn file_values_are_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
            [server]
            port = 6100

            [storage]
            data_dir = "var/evreg"
            load_policy = "strict"

            [[security.admins]]
            username = "admin"
            password = "pw"
            profile = { name = "Admin", email = "admin@campus.edu" }
            "#,
        );

        let cfg: ApiConfig = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.server.port, 6100);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("var/evreg"));
        assert_eq!(cfg.storage.load_policy, LoadPolicy::Strict);
        assert_eq!(cfg.security.admins[0].profile.email, "admin@campus.edu");
    }

    #[test]
    #[serial]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result: Result<ApiConfig, _> = load_config(Some(tmp.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Config { .. })));
    }
}
