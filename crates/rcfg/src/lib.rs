//! Facade crate for remote config clients and tools.
//! Re-exports the engine, domain values, the clock capability and signed envelopes.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `rcfg`; enable `issuance` to sign documents and `lint` to check them.
//! - Build a [`RemoteConfig`], then call [`RemoteConfig::resolve`] with a date from a
//!   [`kernel::clock::Clock`] and a [`ResolutionContext`].

pub use rcfg_domain as domain;
pub use rcfg_engine as engine;
pub use rcfg_kernel as kernel;
#[cfg(feature = "lint")]
pub use rcfg_lint as lint;
pub use rcfg_signing as signing;

pub use rcfg_domain::{BuildVariant, Platform};
pub use rcfg_engine::{ConfigError, RemoteConfig, ResolutionContext, Settings, Version, VersionRange};
pub use rcfg_signing::{Ed25519Verifier, EnvelopeError, RemoteConfigExt, SignatureVerifier, SignedEnvelope};

/// Build-time feature introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "issuance")]
        "issuance",
        #[cfg(feature = "lint")]
        "lint",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::clock::{Clock, FixedClock};
    use serde_json::json;

    #[test]
    fn resolves_through_the_facade() {
        let config = RemoteConfig::from_value(json!({
            "settings": { "banner": false },
            "overrides": [{
                "matching": [{ "platform": "Android" }],
                "schedule": { "from": "2024-01-01T00:00:00Z" },
                "settings": { "banner": true }
            }]
        }))
        .unwrap();
        let context = ResolutionContext::builder()
            .platform(Platform::AndroidTablet)
            .platform_version(Version::new(14, 0, 0))
            .app_version(Version::new(2, 1, 0))
            .build_variant(BuildVariant::Release)
            .build();
        let clock = FixedClock::from_rfc3339("2024-06-01T00:00:00Z").unwrap();

        assert_eq!(config.resolve(&clock.now(), &context).get("banner"), Some(&json!(true)));
    }

    #[test]
    fn unknown_features_are_disabled() {
        assert!(!features::is_enabled("server"));
        assert_eq!(features::is_enabled("lint"), cfg!(feature = "lint"));
    }
}
