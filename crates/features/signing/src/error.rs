use rcfg_engine::ConfigError;
use std::borrow::Cow;

/// Errors raised while opening or producing a signed envelope.
#[rcfg_derive::rcfg_error]
pub enum EnvelopeError {
    /// `d` or `sig` is missing, not a string, or not base64.
    #[error("Base64 decoding of '{field}' failed{}", format_context(.context))]
    Base64DecodingFailed { field: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Signature verification failed{}", format_context(.context))]
    InvalidSignature { context: Option<Cow<'static, str>> },

    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The envelope or its payload is not a usable document.
    #[error("Document error{}: {source}", format_context(.context))]
    Document { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal signing error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
