//! # Envelope Issuance
//!
//! Key generation and signing, for authoring tools only. Gated behind the `issuance` feature so
//! clients that only open envelopes never link private-key handling.
//!
//! ## Security Warnings
//! * Private keys printed by `care keygen` must never be committed or shipped with an app.
//! * Ed25519 signatures are deterministic: the same key and document always give the same
//!   envelope.

use crate::canonical::canonical_json;
use crate::error::EnvelopeError;
use crate::{SignedEnvelope, decode_key};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use getrandom::fill;
use serde_json::Value;
use zeroize::Zeroize;

/// Creates a new Ed25519 keypair from operating system entropy.
///
/// The seed is wiped from memory once the keys are derived.
///
/// # Errors
/// Returns [`EnvelopeError::Internal`] if the system RNG fails.
pub fn generate_keypair() -> Result<(SigningKey, VerifyingKey), EnvelopeError> {
    let mut seed = [0u8; 32];

    fill(&mut seed).map_err(|e| EnvelopeError::Internal {
        message: e.to_string().into(),
        context: Some("Failed to generate seed".into()),
    })?;

    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();

    seed.zeroize();

    Ok((signing_key, verifying_key))
}

/// Decodes a base64 private key (32-byte seed).
///
/// # Errors
/// [`EnvelopeError::InvalidKey`] when the text is not base64 or not 32 bytes long.
pub fn decode_private_key(encoded: &str) -> Result<SigningKey, EnvelopeError> {
    let mut seed = decode_key(encoded, "private key")?;
    let signing_key = SigningKey::from_bytes(&seed);
    seed.zeroize();
    Ok(signing_key)
}

/// Signs `payload` as-is.
#[must_use]
pub fn sign_payload(private_key: &SigningKey, payload: Vec<u8>) -> SignedEnvelope {
    let sig = private_key.sign(&payload).to_bytes().to_vec();
    SignedEnvelope { d: payload, sig }
}

/// Signs the canonical form of `document` (see [`canonical_json`]).
///
/// # Errors
/// [`EnvelopeError::Json`] if the document cannot be serialized.
pub fn sign_document(private_key: &SigningKey, document: &Value) -> Result<SignedEnvelope, EnvelopeError> {
    Ok(sign_payload(private_key, canonical_json(document)?))
}
