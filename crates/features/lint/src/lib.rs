//! # Document Linter
//!
//! Checks a human-authored remote config document before it is published. Where the engine
//! quietly disables conditions it cannot read, the linter names every problem so the author can
//! fix it.
//!
//! Linting never fails: every problem becomes a [`Finding`], including input that is not JSON.
//!
//! ```rust
//! use rcfg_lint::{has_errors, lint_slice};
//!
//! let findings = lint_slice(br#"{ "settings": { "a": 1 }, "meta": [] }"#);
//! assert!(has_errors(&findings));
//! assert_eq!(findings[0].to_string(), "[ERROR] Expected a dictionary with string keys. - /meta");
//! ```

mod finding;
mod rules;

pub use crate::finding::{Finding, Severity, has_errors};
use serde_json::Value;
use tracing::debug;

/// Lints a parsed document.
#[must_use]
pub fn lint(document: &Value) -> Vec<Finding> {
    let mut walker = rules::Walker::default();
    walker.document(document);
    let findings = walker.into_findings();

    debug!(findings = findings.len(), errors = has_errors(&findings), "Document linted");
    findings
}

/// Lints raw bytes; input that is not JSON yields a single error with an empty key path.
#[must_use]
pub fn lint_slice(bytes: &[u8]) -> Vec<Finding> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(document) => lint(&document),
        Err(e) => {
            debug!(error = %e, "Document is not JSON");
            vec![Finding::new(Severity::Error, "Expected a JSON file.", "")]
        },
    }
}
