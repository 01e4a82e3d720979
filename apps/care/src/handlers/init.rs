use crate::services::output::{print_findings, print_hints};
use anyhow::{Context, Result, bail};
use rcfg::lint::lint_slice;
use std::fs;
use std::path::Path;
use tracing::info;

/// Starter document: two defaults, one deprecated key, a matching override and a scheduled one.
pub const STARTER: &str = r#"{
    "settings": {
        "coolFeature": false,
        "foo": 42
    },
    "deprecatedKeys": [
        "bar"
    ],
    "overrides": [
        {
            "matching": [
                {
                    "appVersion": "<=0.9.0",
                    "platform": "Android"
                },
                {
                    "appVersion": "<1.0.0",
                    "platform": "iOS"
                },
                {
                    "platform": "iOS.iPad",
                    "platformVersion": "<15.0.0"
                }
            ],
            "settings": {
                "bar": "low"
            }
        },
        {
            "schedule": {
                "from": "2024-12-31T00:00:00Z"
            },
            "settings": {
                "coolFeature": true
            }
        }
    ],
    "meta": {
        "author": "Your Name"
    }
}
"#;

/// Writes the starter document to `output`.
///
/// # Errors
/// Returns an error if `output` exists and `force` is not set, or the file cannot be written.
pub fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists, pass --force to overwrite it", output.display());
    }

    fs::write(output, STARTER).with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), "Starter configuration written");

    let findings = lint_slice(STARTER.as_bytes());

    if findings.is_empty() {
        println!("This configuration is created.");
        print_hints();
    } else {
        println!("This configuration has {} issue(s).", findings.len());
        print_findings(&findings);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcfg::RemoteConfig;

    #[test]
    fn starter_is_a_clean_document() {
        assert!(lint_slice(STARTER.as_bytes()).is_empty());

        let config: RemoteConfig = STARTER.parse().unwrap();
        assert_eq!(config.settings().len(), 2);
        assert_eq!(config.deprecated_keys().to_vec(), vec!["bar".to_owned()]);
        assert_eq!(config.overrides().len(), 2);
    }
}
