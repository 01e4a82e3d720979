use crate::services::output::{print_findings, read_document};
use anyhow::{Context, Result, bail};
use rcfg::lint::{Finding, Severity};
use rcfg::signing::canonical_json;
use rcfg::signing::generator::{decode_private_key, sign_payload};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes `input` as compact JSON with sorted keys, inside a signed envelope when a private key
/// is given.
///
/// # Errors
/// Returns an error if the input is not a JSON object, the key is invalid, or a file operation
/// fails.
pub fn prepare_config(input: &Path, output: &Path, private_key: Option<&str>) -> Result<()> {
    let document: Value = serde_json::from_slice(&read_document(input)?).context("Expected a JSON file")?;
    if !document.is_object() {
        bail!("Expected a dictionary with string keys");
    }

    let payload = canonical_json(&document)?;

    let (bytes, notes) = match private_key {
        Some(encoded) => {
            let signing_key = decode_private_key(encoded)?;
            (sign_payload(&signing_key, payload).to_vec()?, Vec::new())
        },
        None => (payload, vec![Finding::new(Severity::Info, "The configuration is not signed.", "")]),
    };

    fs::write(output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), signed = notes.is_empty(), "Configuration prepared");

    println!("This configuration is prepared.");
    print_findings(&notes);

    Ok(())
}
