use crate::finding::{Finding, Severity};
use chrono::{DateTime, Utc};
use rcfg_domain::constants::{
    APP_VERSION, BUILD_VARIANT, CONDITION_KEYS, DEPRECATED_KEYS, FROM, LANGUAGE, MATCHING, META,
    OVERRIDES, PLATFORM, PLATFORM_VERSION, SCHEDULE, SETTINGS, UNTIL, VARIANT,
};
use rcfg_domain::{BuildVariant, Platform};
use rcfg_engine::VersionRange;
use rcfg_engine::schedule::parse_timestamp;
use serde_json::{Map, Value};

const EXPECTED_OBJECT: &str = "Expected a dictionary with string keys.";
const EXPECTED_OBJECTS: &str = "Expected an array of dictionaries with string keys.";
const EXPECTED_STRING: &str = "Expected a string.";
const MISSING_SETTINGS: &str = "Missing settings.";
const RANGE_CHARACTERS: &str = "0123456789.-<>=";

/// Walks a parsed document once, collecting findings in document order.
#[derive(Debug, Default)]
pub(crate) struct Walker {
    findings: Vec<Finding>,
}

impl Walker {
    pub(crate) fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    fn error(&mut self, message: impl Into<String>, key_path: impl Into<String>) {
        self.findings.push(Finding::new(Severity::Error, message, key_path));
    }

    fn warning(&mut self, message: impl Into<String>, key_path: impl Into<String>) {
        self.findings.push(Finding::new(Severity::Warning, message, key_path));
    }

    pub(crate) fn document(&mut self, value: &Value) {
        let Value::Object(root) = value else {
            self.error(EXPECTED_OBJECT, "/");
            return;
        };

        let defaults: Vec<&str> = match root.get(SETTINGS) {
            Some(Value::Object(settings)) => settings.keys().map(String::as_str).collect(),
            Some(_) => {
                self.error(EXPECTED_OBJECT, "/settings");
                Vec::new()
            },
            None => {
                self.error(MISSING_SETTINGS, "/");
                Vec::new()
            },
        };

        let deprecated = match root.get(DEPRECATED_KEYS) {
            Some(keys) => self.deprecated_keys(keys, &defaults),
            None => Vec::new(),
        };

        if let Some(overrides) = root.get(OVERRIDES) {
            self.overrides(overrides, &defaults, &deprecated);
        }

        if root.get(META).is_some_and(|meta| !meta.is_object()) {
            self.error(EXPECTED_OBJECT, "/meta");
        }
    }

    fn deprecated_keys<'a>(&mut self, value: &'a Value, defaults: &[&str]) -> Vec<&'a str> {
        const PATH: &str = "/deprecatedKeys";

        let Some(keys) = string_array(value) else {
            self.error("Expected an array of strings.", PATH);
            return Vec::new();
        };

        let mut distinct: Vec<&str> = Vec::with_capacity(keys.len());
        for key in &keys {
            if !distinct.contains(key) {
                distinct.push(*key);
            }
        }

        for key in distinct.iter().filter(|key| defaults.contains(*key)) {
            self.error(format!("Deprecated key '{key}' is still used."), PATH);
        }
        for key in &distinct {
            if keys.iter().filter(|other| *other == key).count() > 1 {
                self.warning(format!("Deprecated key '{key}' is listed more than once."), PATH);
            }
        }

        keys
    }

    fn overrides(&mut self, value: &Value, defaults: &[&str], deprecated: &[&str]) {
        let Some(overrides) = object_array(value) else {
            self.error(EXPECTED_OBJECTS, "/overrides");
            return;
        };

        for (index, entry) in overrides.into_iter().enumerate() {
            let path = format!("/overrides[{index}]");

            let has_conditions = entry
                .get(MATCHING)
                .is_some_and(|matching| self.matching(matching, &format!("{path}/{MATCHING}")));
            let has_schedule = entry
                .get(SCHEDULE)
                .is_some_and(|schedule| self.schedule(schedule, &format!("{path}/{SCHEDULE}")));

            if !has_conditions && !has_schedule {
                self.error("Expected at least one of keys matching and schedule.", path.as_str());
            }

            self.override_settings(entry.get(SETTINGS), &format!("{path}/{SETTINGS}"), defaults, deprecated);
        }
    }

    /// Returns whether the override has at least one well-formed condition list entry.
    fn matching(&mut self, value: &Value, path: &str) -> bool {
        let Some(conditions) = object_array(value) else {
            self.error(EXPECTED_OBJECTS, path);
            return false;
        };

        for (index, condition) in conditions.iter().enumerate() {
            self.condition(condition, &format!("{path}[{index}]"));
        }

        !conditions.is_empty()
    }

    fn condition(&mut self, condition: &Map<String, Value>, path: &str) {
        for key in condition.keys().filter(|key| !CONDITION_KEYS.contains(&key.as_str())) {
            self.error(format!("Unexpected key '{key}' in condition."), path);
        }
        if condition.is_empty() {
            self.error("No keys in condition.", path);
        }

        self.string_field(condition, PLATFORM, path, |raw| {
            (Platform::from_raw(raw) == Platform::Unknown).then(|| format!("Unknown platform '{raw}'."))
        });
        self.string_field(condition, PLATFORM_VERSION, path, |raw| range_problem("platform", raw));
        self.string_field(condition, APP_VERSION, path, |raw| range_problem("app", raw));
        self.string_field(condition, VARIANT, path, |_| None);
        self.string_field(condition, BUILD_VARIANT, path, |raw| {
            (BuildVariant::from_raw(raw) == BuildVariant::Unknown)
                .then(|| format!("Unknown buildVariant '{raw}'."))
        });
        self.string_field(condition, LANGUAGE, path, |raw| {
            let valid = raw.len() == 2 && raw.bytes().all(|byte| byte.is_ascii_lowercase());
            (!valid).then(|| format!("Invalid language code '{raw}'. Must be 2 lowercase characters."))
        });
    }

    fn string_field(
        &mut self,
        condition: &Map<String, Value>,
        key: &str,
        path: &str,
        check: impl FnOnce(&str) -> Option<String>,
    ) {
        let Some(value) = condition.get(key) else {
            return;
        };

        let key_path = format!("{path}/{key}");
        match value.as_str() {
            Some(raw) => {
                if let Some(message) = check(raw) {
                    self.error(message, key_path);
                }
            },
            None => self.error(EXPECTED_STRING, key_path),
        }
    }

    /// Returns whether the schedule is an object of strings, even when its dates are bad.
    fn schedule(&mut self, value: &Value, path: &str) -> bool {
        let Some(bounds) = value.as_object().filter(|bounds| bounds.values().all(Value::is_string)) else {
            self.error("Expected a dictionary with string keys and values.", path);
            return false;
        };

        let from = self.bound(bounds, FROM, path);
        let until = self.bound(bounds, UNTIL, path);

        match (from, until) {
            (None, None) => self.error("Expected at least one of keys from and until.", path),
            (Some(from), Some(until)) if from >= until => self.error(
                format!(
                    "Expected until date '{}' to be later than from date '{}'.",
                    until.to_rfc3339(),
                    from.to_rfc3339()
                ),
                path,
            ),
            _ => {},
        }

        true
    }

    fn bound(&mut self, bounds: &Map<String, Value>, key: &str, path: &str) -> Option<DateTime<Utc>> {
        let raw = bounds.get(key)?.as_str()?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            self.error(format!("Invalid date '{raw}' is not ISO8601."), format!("{path}/{key}"));
        }
        parsed
    }

    fn override_settings(&mut self, value: Option<&Value>, path: &str, defaults: &[&str], deprecated: &[&str]) {
        match value {
            None => self.error(MISSING_SETTINGS, path),
            Some(Value::Object(settings)) => {
                if settings.is_empty() {
                    self.error("Expected a non-empty dictionary with string keys.", path);
                }
                for key in settings
                    .keys()
                    .filter(|key| !defaults.contains(&key.as_str()) && !deprecated.contains(&key.as_str()))
                {
                    self.error(format!("Key '{key}' is not used in settings or listed in deprecated keys."), path);
                }
            },
            Some(_) => self.error(EXPECTED_OBJECT, path),
        }
    }
}

/// One message per field even when both checks fail.
fn range_problem(label: &str, raw: &str) -> Option<String> {
    let valid = VersionRange::parse(raw).is_ok() && raw.chars().all(|c| RANGE_CHARACTERS.contains(c));
    (!valid).then(|| format!("Invalid {label} version range '{raw}'."))
}

fn string_array(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}

fn object_array(value: &Value) -> Option<Vec<&Map<String, Value>>> {
    value.as_array()?.iter().map(Value::as_object).collect()
}
