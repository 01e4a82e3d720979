use anyhow::{Context, Result};
use rcfg::Settings;
use rcfg::lint::Finding;
use std::fs;
use std::path::Path;

const KEY_WIDTH: usize = 20;

/// Reads a document file.
///
/// # Errors
/// Returns an error naming the path when the file cannot be read.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn print_findings(findings: &[Finding]) {
    for finding in findings {
        println!("{finding}");
    }
}

pub fn print_hints() {
    println!("[HINT] Use the resolve command to verify the output is as expected for an app.");
    println!("[HINT] Use the prepare command to prepare the configuration for publication.");
}

/// One line per resolved key, sorted by key.
///
/// Values that differ from the default read `default -> value`; keys without a default read
/// `[deprecated] -> value`.
#[must_use]
pub fn render_settings(defaults: &Settings, resolved: &Settings) -> Vec<String> {
    let mut entries: Vec<_> = resolved.iter().collect();
    entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));

    entries
        .into_iter()
        .map(|(key, value)| match defaults.get(key) {
            Some(default) if default == value => format!("  {key:<KEY_WIDTH$}: {value}"),
            Some(default) => format!("  {key:<KEY_WIDTH$}: {default} -> {value}"),
            None => format!("  {key:<KEY_WIDTH$}: [deprecated] -> {value}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn settings(value: Value) -> Settings {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn marks_changed_and_deprecated_keys() {
        let defaults = settings(json!({ "foo": 42, "coolFeature": false }));
        let resolved = settings(json!({ "foo": 42, "coolFeature": true, "bar": "low" }));

        assert_eq!(
            render_settings(&defaults, &resolved),
            vec![
                "  bar                 : [deprecated] -> \"low\"",
                "  coolFeature         : false -> true",
                "  foo                 : 42",
            ]
        );
    }

    #[test]
    fn long_keys_are_not_truncated() {
        let resolved = settings(json!({ "aVeryLongSettingNameIndeed": 1 }));
        assert_eq!(
            render_settings(&resolved, &resolved),
            vec!["  aVeryLongSettingNameIndeed: 1"]
        );
    }
}
