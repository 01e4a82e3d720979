//! # Domain Values
//!
//! Pure value types shared by the engine, the linter and the `care` tool.
//! Keep it lean: no I/O or parsing of whole documents here, just tokens and defaults.

pub mod build_variant;
pub mod constants;
pub mod platform;
pub mod settings;

pub use build_variant::BuildVariant;
pub use platform::Platform;
