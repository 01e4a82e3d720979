use serde::Serialize;
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter, Serialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One problem found in a document, located by a key path such as
/// `/overrides[1]/matching[0]/platform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    pub key_path: String,
}

impl Finding {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, key_path: impl Into<String>) -> Self {
        Self { severity, message: message.into(), key_path: key_path.into() }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.severity, self.message, self.key_path)
    }
}

/// Whether any finding is an error. Warnings and infos do not make a document invalid.
#[must_use]
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn displays_level_message_and_path() {
        let finding = Finding::new(Severity::Warning, "Deprecated key 'a' is listed more than once.", "/deprecatedKeys");
        assert_eq!(
            finding.to_string(),
            "[WARNING] Deprecated key 'a' is listed more than once. - /deprecatedKeys"
        );
    }

    #[test]
    fn only_errors_count() {
        let info = Finding::new(Severity::Info, "note", "");
        let error = Finding::new(Severity::Error, "broken", "/");

        assert!(!has_errors(&[info.clone()]));
        assert!(has_errors(&[info, error]));
        assert!(!has_errors(&[]));
    }

    #[test]
    fn severities_are_ordered() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Error.as_ref(), "ERROR");
        assert_eq!(Severity::iter().count(), 3);
    }
}
