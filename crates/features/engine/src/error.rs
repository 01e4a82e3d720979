use std::borrow::Cow;

/// Errors raised while building a document or one of its values.
///
/// Content problems inside conditions and schedules never end up here; those degrade to
/// never-matching values instead.
#[rcfg_derive::rcfg_error]
pub enum ConfigError {
    #[error("Not a semantic version{}: '{input}'", format_context(.context))]
    NonSemanticVersion { input: String, context: Option<Cow<'static, str>> },

    #[error("Invalid version range{}: '{input}'", format_context(.context))]
    InvalidVersionRange { input: String, context: Option<Cow<'static, str>> },

    /// A structural key holds a value of the wrong JSON type (`root` for the document itself).
    #[error("Unexpected type for key '{key}'{}", format_context(.context))]
    UnexpectedTypeForKey { key: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed JSON{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl ConfigError {
    pub(crate) fn unexpected_type(key: &'static str) -> Self {
        Self::UnexpectedTypeForKey { key: Cow::Borrowed(key), context: None }
    }
}
