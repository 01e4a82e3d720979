use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `CARE__CONTEXT__PLATFORM=Android`.
pub const ENV_PREFIX: &str = "CARE";
const ENV_SEPARATOR: &str = "__";

/// Errors raised while layering and deserializing settings.
#[rcfg_derive::rcfg_error]
pub enum LoaderError {
    #[error("Settings error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a settings file with `CARE__*` environment overrides on top.
///
/// The file format follows its extension (TOML or JSON). Nested keys are reached with double
/// underscores: `CARE__LOG__LEVEL=debug` maps to `log.level`.
///
/// # Arguments
/// * `path`: the settings file.
/// * `required`: when `false`, a missing file is skipped and only the environment is layered
///   over the defaults of `T`.
///
/// # Errors
/// * [`LoaderError::Config`] if a required file is missing, a source is malformed, or the merged
///   values do not fit `T`.
///
/// # Example
/// ```rust
/// use rcfg_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct ToolSettings {
///     verbose: bool,
/// }
///
/// let settings: ToolSettings = load_config("does-not-exist.toml", false).unwrap();
/// assert!(!settings.verbose);
/// ```
pub fn load_config<T>(path: impl AsRef<Path>, required: bool) -> Result<T, LoaderError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, required, None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the process environment
/// when given. Keys still carry the `CARE__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: impl AsRef<Path>,
    required: bool,
    env: Option<Map<String, String>>,
) -> Result<T, LoaderError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    let builder = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .convert_case(config::Case::Snake)
                .source(env),
        );

    info!(path = %path.display(), required, "Loading settings");

    let settings = builder
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")?;

    Ok(settings)
}
