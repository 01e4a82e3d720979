//! # Signed Envelopes
//!
//! A remote config document can travel inside a signed envelope:
//!
//! ```json
//! { "d": "<base64 of the document bytes>", "sig": "<base64 signature over those bytes>" }
//! ```
//!
//! The signature covers the exact decoded payload bytes, so the document is parsed only after it
//! has been verified.
//!
//! ## Architecture
//!
//! 1.  **Verification ([`verifier`]):** the [`SignatureVerifier`] seam plus the production
//!     [`Ed25519Verifier`]. Lightweight and always compiled.
//! 2.  **Issuance ([`generator`]):** key generation and signing for authoring tools. Gated behind
//!     the `issuance` feature.
//!
//! ## Example
//!
//! ```rust
//! use rcfg_signing::{Ed25519Verifier, RemoteConfigExt, SignedEnvelope, open_envelope};
//! use rcfg_engine::RemoteConfig;
//!
//! let always = |_: &[u8], _: &[u8], _: &[u8]| true;
//! let envelope = SignedEnvelope { d: br#"{"settings":{"a":1}}"#.to_vec(), sig: vec![0; 64] };
//! let bytes = envelope.to_vec().unwrap();
//!
//! assert_eq!(open_envelope(&bytes, &[0; 32], &always).unwrap(), envelope.d);
//! assert!(RemoteConfig::from_signed(&bytes, &[0; 32], &Ed25519Verifier).is_err());
//! ```

mod canonical;
mod error;
#[cfg(feature = "issuance")]
pub mod generator;
pub mod verifier;

pub use crate::canonical::canonical_json;
pub use crate::error::{EnvelopeError, EnvelopeErrorExt};
pub use crate::verifier::{Ed25519Verifier, SignatureVerifier};
use base64::Engine as _;
use rcfg_domain::constants::{ENVELOPE_DATA, ENVELOPE_SIGNATURE, ROOT};
use rcfg_engine::{ConfigError, RemoteConfig};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// A payload and its detached signature, both base64 strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedEnvelope {
    /// Document bytes exactly as signed.
    #[serde(with = "bytes_as_base64")]
    pub d: Vec<u8>,
    #[serde(with = "bytes_as_base64")]
    pub sig: Vec<u8>,
}

impl SignedEnvelope {
    /// # Errors
    /// Returns [`EnvelopeError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).context("Encoding envelope")
    }

    /// # Errors
    /// Returns [`EnvelopeError::Json`] if serialization fails.
    pub fn to_vec(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).context("Encoding envelope")
    }

    /// Reads an envelope without verifying it. See [`open_envelope`] for the checked path.
    ///
    /// # Errors
    /// Same classification as [`open_envelope`], minus signature checks.
    pub fn from_json(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_slice(bytes).context("Reading envelope")?;
        let Value::Object(root) = value else {
            return Err(ConfigError::UnexpectedTypeForKey { key: Cow::Borrowed(ROOT), context: None })
                .context("Envelope root");
        };

        Ok(Self { d: base64_field(&root, ENVELOPE_DATA)?, sig: base64_field(&root, ENVELOPE_SIGNATURE)? })
    }

    /// Whether `bytes` are a JSON object carrying both `d` and `sig`. Field contents are not
    /// checked, so a `true` here can still fail in [`open_envelope`].
    #[must_use]
    pub fn is_envelope(bytes: &[u8]) -> bool {
        serde_json::from_slice::<Value>(bytes).is_ok_and(|value| {
            value
                .as_object()
                .is_some_and(|root| root.contains_key(ENVELOPE_DATA) && root.contains_key(ENVELOPE_SIGNATURE))
        })
    }
}

/// Verifies an envelope and returns the inner document bytes.
///
/// # Errors
/// * [`EnvelopeError::Json`] when `bytes` is not JSON.
/// * [`EnvelopeError::Document`] when the envelope root is not an object.
/// * [`EnvelopeError::Base64DecodingFailed`] when `d` or `sig` is missing, not a string, or not
///   base64.
/// * [`EnvelopeError::InvalidSignature`] when `verifier` rejects the signature.
pub fn open_envelope<V>(bytes: &[u8], public_key: &[u8], verifier: &V) -> Result<Vec<u8>, EnvelopeError>
where
    V: SignatureVerifier + ?Sized,
{
    let envelope = SignedEnvelope::from_json(bytes)?;

    if !verifier.is_valid_signature(&envelope.d, &envelope.sig, public_key) {
        debug!(payload = envelope.d.len(), "Envelope signature rejected");
        return Err(EnvelopeError::InvalidSignature { context: None });
    }

    Ok(envelope.d)
}

/// Builds documents from signed envelopes.
pub trait RemoteConfigExt: Sized {
    /// [`open_envelope`] followed by [`RemoteConfig::from_slice`] on the payload.
    ///
    /// # Errors
    /// Any [`open_envelope`] error, or [`EnvelopeError::Document`] for a bad payload.
    fn from_signed<V>(bytes: &[u8], public_key: &[u8], verifier: &V) -> Result<Self, EnvelopeError>
    where
        V: SignatureVerifier + ?Sized;
}

impl RemoteConfigExt for RemoteConfig {
    fn from_signed<V>(bytes: &[u8], public_key: &[u8], verifier: &V) -> Result<Self, EnvelopeError>
    where
        V: SignatureVerifier + ?Sized,
    {
        let payload = open_envelope(bytes, public_key, verifier)?;
        Self::from_slice(&payload).context("Signed payload")
    }
}

/// Decodes a base64 public key (32 bytes).
///
/// # Errors
/// [`EnvelopeError::InvalidKey`] when the text is not base64 or not 32 bytes long.
pub fn decode_public_key(encoded: &str) -> Result<[u8; 32], EnvelopeError> {
    decode_key(encoded, "public key")
}

/// Encodes key material as padded standard base64.
#[must_use]
pub fn encode_key(key: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(key)
}

pub(crate) fn decode_key(encoded: &str, what: &'static str) -> Result<[u8; 32], EnvelopeError> {
    let bytes = bytes_as_base64::LENIENT.decode(encoded.trim()).map_err(|e| EnvelopeError::InvalidKey {
        message: e.to_string().into(),
        context: Some(what.into()),
    })?;

    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| EnvelopeError::InvalidKey {
        message: format!("expected 32 bytes, got {}", bytes.len()).into(),
        context: Some(what.into()),
    })
}

fn base64_field(root: &serde_json::Map<String, Value>, field: &'static str) -> Result<Vec<u8>, EnvelopeError> {
    let failed = |reason: &'static str| EnvelopeError::Base64DecodingFailed {
        field: Cow::Borrowed(field),
        context: Some(reason.into()),
    };

    let encoded = match root.get(field) {
        Some(Value::String(encoded)) => encoded,
        Some(_) => return Err(failed("not a string")),
        None => return Err(failed("missing")),
    };

    bytes_as_base64::LENIENT.decode(encoded).map_err(|e| {
        debug!(field, error = %e, "Envelope field is not base64");
        failed("not base64")
    })
}

/// Writes byte buffers as padded standard base64. `LENIENT` reads them back with optional padding.
#[allow(clippy::redundant_pub_crate)]
pub mod bytes_as_base64 {
    use base64::alphabet;
    use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose};
    use base64::Engine as _;
    use serde::{Serialize, Serializer};

    pub(crate) const LENIENT: GeneralPurpose = GeneralPurpose::new(
        &alphabet::STANDARD,
        GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );

    pub(super) fn serialize<S: Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
        String::serialize(&general_purpose::STANDARD.encode(v), s)
    }
}
