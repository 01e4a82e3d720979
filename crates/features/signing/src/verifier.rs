//! # Signature Verification
//!
//! Opening an envelope only needs a yes/no answer for `(payload, signature, public key)`.
//! [`SignatureVerifier`] is that seam; [`Ed25519Verifier`] is the implementation used in
//! production, and any `Fn(&[u8], &[u8], &[u8]) -> bool` can stand in for it.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use tracing::debug;

/// Verifies a detached signature over the exact payload bytes.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `false` for any failure, including malformed keys and signatures.
    fn is_valid_signature(&self, payload: &[u8], signature: &[u8], public_key: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&[u8], &[u8], &[u8]) -> bool + Send + Sync,
{
    fn is_valid_signature(&self, payload: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        self(payload, signature, public_key)
    }
}

/// Ed25519 signatures with 32-byte public keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn is_valid_signature(&self, payload: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        let Ok(key_bytes) = <&[u8; 32]>::try_from(public_key) else {
            debug!(len = public_key.len(), "Public key has the wrong length");
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(key_bytes) else {
            debug!("Public key is not a curve point");
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            debug!(len = signature.len(), "Signature has the wrong length");
            return false;
        };

        verifying_key.verify(payload, &signature).is_ok()
    }
}
