//! # Resolution Engine
//!
//! Decides which settings a client should use. A [`RemoteConfig`] document holds default settings
//! and an ordered list of [`Override`]s; each override is gated by client [`Condition`]s and an
//! optional [`Schedule`]. [`RemoteConfig::resolve`] folds the passing overrides over the defaults.
//! [`RemoteConfig::relevant_resolution_dates`] lists the instants at which that answer may change.
//!
//! ## Failure modes
//!
//! * **Structural** problems (root or `settings` not an object, malformed JSON, bad version
//!   text passed to [`Version::parse`] or [`VersionRange::parse`]) are returned as
//!   [`ConfigError`].
//! * **Content** problems inside conditions and schedules (unknown keys, wrong types,
//!   unparseable ranges or timestamps) never error. The affected condition or schedule simply
//!   never matches, so resolution is total over any document that was built.
//!
//! The engine reads no clock and touches no I/O: the caller passes the date and the
//! [`ResolutionContext`] in.

pub mod condition;
pub mod constraint;
pub mod context;
pub mod document;
mod error;
pub mod overrides;
pub mod range;
mod resolve;
pub mod schedule;
pub mod version;

pub use crate::condition::Condition;
pub use crate::constraint::Constraint;
pub use crate::context::ResolutionContext;
pub use crate::document::RemoteConfig;
pub use crate::error::{ConfigError, ConfigErrorExt};
pub use crate::overrides::Override;
pub use crate::range::{Bound, VersionRange};
pub use crate::schedule::Schedule;
pub use crate::version::Version;

/// String-keyed JSON settings, as found under `settings` and `meta`.
pub type Settings = serde_json::Map<String, serde_json::Value>;
