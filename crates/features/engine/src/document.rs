use crate::error::{ConfigError, ConfigErrorExt};
use crate::overrides::{Override, json_kind};
use crate::Settings;
use rcfg_domain::constants::{DEPRECATED_KEYS, META, OVERRIDES, ROOT, SETTINGS};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A remote config document: default settings plus ordered overrides.
///
/// Immutable once built. A refreshed document replaces the old value wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteConfig {
    settings: Settings,
    deprecated_keys: Vec<String>,
    overrides: Vec<Override>,
    meta: Settings,
}

impl RemoteConfig {
    #[must_use]
    pub const fn new(
        settings: Settings,
        deprecated_keys: Vec<String>,
        overrides: Vec<Override>,
        meta: Settings,
    ) -> Self {
        Self { settings, deprecated_keys, overrides, meta }
    }

    /// Builds a document from parsed JSON.
    ///
    /// Only structure is checked here. Malformed conditions and schedules degrade to
    /// never-matching values, `deprecatedKeys` that is not a list of strings is read as empty,
    /// and override entries that are not objects are skipped.
    ///
    /// # Errors
    /// [`ConfigError::UnexpectedTypeForKey`] with key `root` when `value` is not an object, or
    /// `settings` when the defaults are not an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(mut root) = value else {
            return Err(ConfigError::unexpected_type(ROOT));
        };

        let settings = match root.remove(SETTINGS) {
            Some(Value::Object(settings)) => settings,
            Some(_) => return Err(ConfigError::unexpected_type(SETTINGS)),
            None => Settings::new(),
        };

        let deprecated_keys = root.remove(DEPRECATED_KEYS).map(string_list).unwrap_or_default();

        let overrides = match root.remove(OVERRIDES) {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .filter_map(|(index, entry)| match entry {
                    Value::Object(json) => Some(Override::from_json(json)),
                    other => {
                        warn!(index, kind = json_kind(&other), "Skipping override that is not an object");
                        None
                    },
                })
                .collect(),
            Some(other) => {
                warn!(kind = json_kind(&other), "Overrides is not a list, ignored");
                Vec::new()
            },
            None => Vec::new(),
        };

        let meta = match root.remove(META) {
            Some(Value::Object(meta)) => meta,
            _ => Settings::new(),
        };

        info!(
            settings = settings.len(),
            deprecated = deprecated_keys.len(),
            overrides = overrides.len(),
            "Remote config document loaded"
        );

        Ok(Self { settings, deprecated_keys, overrides, meta })
    }

    /// Builds a document from JSON bytes.
    ///
    /// # Errors
    /// [`ConfigError::Json`] for malformed JSON, otherwise see [`RemoteConfig::from_value`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_slice(bytes).context("Parsing document")?;
        Self::from_value(value)
    }

    /// Default settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Keys no longer among the defaults that overrides may still set for older clients.
    #[must_use]
    pub fn deprecated_keys(&self) -> &[String] {
        &self.deprecated_keys
    }

    /// Overrides in document order.
    #[must_use]
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Opaque metadata (author, revision, ...).
    #[must_use]
    pub const fn meta(&self) -> &Settings {
        &self.meta
    }
}

impl FromStr for RemoteConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

impl TryFrom<Value> for RemoteConfig {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn string_list(value: Value) -> Vec<String> {
    let Value::Array(entries) = value else {
        debug!(kind = json_kind(&value), "deprecatedKeys is not a list, ignored");
        return Vec::new();
    };

    let keys: Option<Vec<String>> = entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(key) => Some(key),
            _ => None,
        })
        .collect();

    keys.unwrap_or_else(|| {
        debug!("deprecatedKeys holds a value that is not a string, ignored");
        Vec::new()
    })
}
