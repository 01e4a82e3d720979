use crate::services::output::{print_findings, print_hints, read_document};
use anyhow::{Result, bail};
use rcfg::lint::{has_errors, lint_slice};
use std::path::Path;

/// Lints `input` and prints every finding.
///
/// # Errors
/// Returns an error if the file cannot be read or any finding is an error.
pub fn verify_config(input: &Path) -> Result<()> {
    let findings = lint_slice(&read_document(input)?);

    if has_errors(&findings) {
        println!("This configuration has {} issue(s).", findings.len());
        print_findings(&findings);
        bail!("{} is not a valid configuration", input.display());
    }

    println!("This configuration is valid.");
    print_findings(&findings);
    print_hints();

    Ok(())
}
