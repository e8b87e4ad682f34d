//! Layered configuration loading.
//!
//! Precedence, lowest to highest:
//! 1. compiled defaults (`T::default()`)
//! 2. YAML file passed with `--config`
//! 3. environment variables, `<PREFIX>` + keys nested with `__`
//!    (e.g. `CALC_GATEWAY__LOGGING__FORMAT=json`)
//!
//! CLI flags are applied by each binary on the extracted value.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors produced while assembling configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    FileNotFound(PathBuf),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
    #[error("failed to render configuration: {0}")]
    Render(String),
}

/// Load `T` from defaults, an optional YAML file and prefixed environment variables.
///
/// `env_prefix` includes the trailing separator, e.g. `"CALC_GATEWAY__"`.
///
/// # Errors
/// Returns [`ConfigError::FileNotFound`] if `path` is given but missing, and
/// [`ConfigError::Invalid`] if any layer fails to deserialize into `T`.
pub fn load_layered<T>(path: Option<&Path>, env_prefix: &str) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    if let Some(path) = path {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment = figment.merge(Env::prefixed(env_prefix).split("__"));

    figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
}

/// Render the effective configuration as YAML.
///
/// # Errors
/// Returns [`ConfigError::Render`] if serialization fails.
pub fn to_yaml<T: Serialize>(config: &T) -> Result<String, ConfigError> {
    serde_saphyr::to_string(config).map_err(|e| ConfigError::Render(e.to_string()))
}
