use crate::{BuildVariant, Platform};
use serde::Deserialize;
use std::path::PathBuf;

/// Defaults of the `care` tool, read from `care.toml` and `CARE__*` variables.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CareSettings {
    pub log: LogSettings,
    pub context: ContextDefaults,
    pub keys: KeySettings,
}

/// Logger knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Level directive, e.g. `info` or `rcfg_engine=debug`.
    pub level: String,
    /// Rolling file output directory. Console only when absent.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

/// Client context used by `care resolve` when a flag is not given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContextDefaults {
    pub platform: Platform,
    pub platform_version: String,
    pub app_version: String,
    pub build_variant: BuildVariant,
    pub variant: Option<String>,
    pub language: Option<String>,
}

/// Base64 keys used for signed documents.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub public_key: Option<String>,
    pub private_key: Option<String>,
}

// --- Default ---

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}

impl Default for ContextDefaults {
    fn default() -> Self {
        Self {
            platform: Platform::Ios,
            platform_version: "1.0.0".to_owned(),
            app_version: "1.0.0".to_owned(),
            build_variant: BuildVariant::Release,
            variant: None,
            language: None,
        }
    }
}
