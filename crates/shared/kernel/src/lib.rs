//! Kernel capabilities shared across slices.
//! Keep this crate lightweight: layered settings loading and the clock the callers of the engine
//! read "now" from. The engine itself never asks for the time.
//!
//! ## Settings loading
//! ```rust,no_run
//! use rcfg_kernel::config::load_config;
//! use rcfg_kernel::domain::settings::CareSettings;
//!
//! let settings: CareSettings = load_config("care.toml", false).unwrap_or_default();
//! ```
//!
//! ## Clock
//! ```rust
//! use rcfg_kernel::clock::{Clock, FixedClock};
//!
//! let clock = FixedClock::from_rfc3339("2024-08-21T00:00:00Z").unwrap();
//! assert_eq!(clock.now().to_rfc3339(), "2024-08-21T00:00:00+00:00");
//! ```
pub mod clock;
pub mod config;

pub use rcfg_domain as domain;
