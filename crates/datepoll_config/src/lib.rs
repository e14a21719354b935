use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
pub mod models;
pub use models::*;

/// Marker value that is replaced by an environment variable at load time.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `<CONFIG_DIR>/default.{toml,yaml,json}` (optional)
/// 2. `<CONFIG_DIR>/<RUN_ENV>.{toml,yaml,json}` (optional, `RUN_ENV` defaults to `debug`)
/// 3. Environment variables with prefix `PREFIX` (default `DATEPOLL`) and `__` separator
///
/// `CONFIG_DIR` defaults to `config` relative to the working directory.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Loads the configuration from an explicit directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "DATEPOLL".to_string());

    let default_path: PathBuf = config_dir.join("default");
    let env_path: PathBuf = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all "secret_from_env" string values with environment variable values.
///
/// The variable name is the upper-cased config path joined with `_`,
/// e.g. `notify.public_key` reads `NOTIFY_PUBLIC_KEY`.
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    warn!("env var {} not found for {}", env_key, SECRET_MARKER);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in the serialized config.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The path is taken from `DOTENV_OVERRIDE`, then from the first command line
/// argument if it starts with `.env`, and falls back to `.env`. Loading happens
/// once per process; the chosen path is returned.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_marker_is_replaced_from_env() {
        env::set_var("NOTIFY_PUBLIC_KEY", "pk-test-123");
        let config = AppConfig {
            use_notify: true,
            notify: Some(NotifyConfig {
                endpoint: "https://relay.example/send".to_string(),
                service_id: "svc".to_string(),
                template_id: "tpl".to_string(),
                public_key: SECRET_MARKER.to_string(),
            }),
            ..AppConfig::default()
        };

        let config = apply_env_overrides_from_marker(config).unwrap();
        assert_eq!(config.notify.unwrap().public_key, "pk-test-123");
    }

    #[test]
    fn test_missing_secret_keeps_marker() {
        let config = AppConfig {
            shortener: Some(ShortenerConfig {
                endpoint: SECRET_MARKER.to_string(),
            }),
            ..AppConfig::default()
        };

        let config = apply_env_overrides_from_marker(config).unwrap();
        assert_eq!(config.shortener.unwrap().endpoint, SECRET_MARKER);
    }

    #[test]
    fn test_flags_and_sections_default_when_missing() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "server": { "host": "0.0.0.0", "port": 9000 } }"#).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.use_database);
        assert!(config.database.is_none());
        assert_eq!(config.public_base_url, "http://127.0.0.1:8080/");
    }
}
