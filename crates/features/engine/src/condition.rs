use crate::constraint::Constraint;
use crate::context::ResolutionContext;
use crate::range::VersionRange;
use rcfg_domain::constants::{
    APP_VERSION, BUILD_VARIANT, CONDITION_KEYS, LANGUAGE, PLATFORM, PLATFORM_VERSION, VARIANT,
};
use rcfg_domain::{BuildVariant, Platform};
use serde_json::{Map, Value};
use tracing::debug;

/// A conjunction of optional client predicates.
///
/// A condition read from JSON that carries an unknown key, or a field of the wrong type, can
/// never match. Newer documents therefore stay inert on older clients instead of matching
/// too broadly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition {
    pub platform: Constraint<Platform>,
    pub platform_version: Constraint<VersionRange>,
    pub app_version: Constraint<VersionRange>,
    /// Matches when the client variant contains this text.
    pub variant: Constraint<String>,
    pub build_variant: Constraint<BuildVariant>,
    /// Matches when the client language starts with this text.
    pub language: Constraint<String>,
}

impl Condition {
    /// A condition that matches no client.
    #[must_use]
    pub const fn never() -> Self {
        Self {
            platform: Constraint::Unsatisfiable,
            platform_version: Constraint::Unsatisfiable,
            app_version: Constraint::Unsatisfiable,
            variant: Constraint::Unsatisfiable,
            build_variant: Constraint::Unsatisfiable,
            language: Constraint::Unsatisfiable,
        }
    }

    /// Reads a condition object. Never fails; bad input yields a condition that never matches.
    #[must_use]
    pub fn from_json(json: &Map<String, Value>) -> Self {
        if let Some(key) = json.keys().find(|key| !CONDITION_KEYS.contains(&key.as_str())) {
            debug!(key = %key, "Unrecognised condition key, condition disabled");
            return Self::never();
        }

        Self {
            platform: field(json, PLATFORM, |value| value.as_str().map(Platform::from_raw)),
            platform_version: field(json, PLATFORM_VERSION, parse_range),
            app_version: field(json, APP_VERSION, parse_range),
            variant: field(json, VARIANT, |value| value.as_str().map(str::to_owned)),
            build_variant: field(json, BUILD_VARIANT, |value| {
                value.as_str().map(BuildVariant::from_raw)
            }),
            language: field(json, LANGUAGE, |value| value.as_str().map(str::to_owned)),
        }
    }

    /// Whether any field can never be satisfied.
    #[must_use]
    pub const fn is_never(&self) -> bool {
        self.platform.is_unsatisfiable()
            || self.platform_version.is_unsatisfiable()
            || self.app_version.is_unsatisfiable()
            || self.variant.is_unsatisfiable()
            || self.build_variant.is_unsatisfiable()
            || self.language.is_unsatisfiable()
    }

    /// Variant and language are only checked when the client reports them.
    #[must_use]
    pub fn matches(&self, context: &ResolutionContext) -> bool {
        if self.is_never() {
            return false;
        }

        self.platform.admits(|platform| platform.applies(context.platform))
            && self.platform_version.admits(|range| range.contains(&context.platform_version))
            && self.app_version.admits(|range| range.contains(&context.app_version))
            && context
                .variant
                .as_deref()
                .is_none_or(|variant| self.variant.admits(|wanted| variant.contains(wanted.as_str())))
            && self.build_variant.admits(|build_variant| *build_variant == context.build_variant)
            && context.language.as_deref().is_none_or(|language| {
                self.language.admits(|wanted| language.starts_with(wanted.as_str()))
            })
    }
}

fn parse_range(value: &Value) -> Option<VersionRange> {
    value.as_str().and_then(|raw| raw.parse().ok())
}

fn field<T>(
    json: &Map<String, Value>,
    key: &'static str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Constraint<T> {
    match json.get(key) {
        None => Constraint::Unconstrained,
        Some(value) => read(value).map_or_else(
            || {
                debug!(key, %value, "Unusable condition field, condition disabled");
                Constraint::Unsatisfiable
            },
            Constraint::Required,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;
    use serde_json::json;

    fn condition(value: Value) -> Condition {
        match value {
            Value::Object(map) => Condition::from_json(&map),
            other => panic!("not an object: {other}"),
        }
    }

    fn context() -> ResolutionContext {
        ResolutionContext::builder()
            .platform(Platform::IosPhone)
            .platform_version(Version::new(17, 0, 0))
            .app_version(Version::new(1, 2, 0))
            .build_variant(BuildVariant::Release)
            .variant("store-eu")
            .language("nl-BE")
            .build()
    }

    #[test]
    fn empty_condition_matches_everyone() {
        assert!(condition(json!({})).matches(&context()));
    }

    #[test]
    fn all_fields_are_anded() {
        let full = condition(json!({
            "platform": "iOS",
            "platformVersion": ">=16",
            "appVersion": "1.0-2.0",
            "variant": "eu",
            "buildVariant": "release",
            "language": "nl"
        }));
        assert!(full.matches(&context()));

        let wrong_build = condition(json!({ "platform": "iOS", "buildVariant": "debug" }));
        assert!(!wrong_build.matches(&context()));
    }

    #[test]
    fn unknown_key_disables_the_condition() {
        let poisoned = condition(json!({ "platform": "iOS", "region": "EU" }));
        assert!(poisoned.is_never());
        assert_eq!(poisoned, Condition::never());
        assert!(!poisoned.matches(&context()));
    }

    #[test]
    fn wrong_types_disable_the_condition() {
        for raw in [
            json!({ "platform": 1 }),
            json!({ "platformVersion": "soon" }),
            json!({ "appVersion": ["1.0"] }),
            json!({ "variant": null }),
            json!({ "buildVariant": true }),
            json!({ "language": {} }),
        ] {
            let parsed = condition(raw.clone());
            assert!(parsed.is_never(), "{raw}");
            assert!(!parsed.matches(&context()), "{raw}");
        }
    }

    #[test]
    fn member_condition_does_not_match_family_context() {
        let mut family_client = context();
        family_client.platform = Platform::Ios;

        assert!(!condition(json!({ "platform": "iOS.iPhone" })).matches(&family_client));
        assert!(condition(json!({ "platform": "iOS" })).matches(&family_client));
    }

    #[test]
    fn unknown_platform_literal_never_applies() {
        let parsed = condition(json!({ "platform": "Symbian" }));
        assert_eq!(parsed.platform, Constraint::Required(Platform::Unknown));
        assert!(!parsed.matches(&context()));
    }

    #[test]
    fn unknown_build_variant_matches_only_unknown_clients() {
        let parsed = condition(json!({ "buildVariant": "nightly" }));
        assert!(!parsed.matches(&context()));

        let mut unknown_client = context();
        unknown_client.build_variant = BuildVariant::Unknown;
        assert!(parsed.matches(&unknown_client));
    }

    #[test]
    fn variant_is_a_substring_of_the_client_variant() {
        assert!(condition(json!({ "variant": "eu" })).matches(&context()));
        assert!(condition(json!({ "variant": "store-eu" })).matches(&context()));
        assert!(!condition(json!({ "variant": "store-eu-beta" })).matches(&context()));
    }

    #[test]
    fn language_is_a_prefix_of_the_client_language() {
        assert!(condition(json!({ "language": "nl" })).matches(&context()));
        assert!(!condition(json!({ "language": "BE" })).matches(&context()));
    }

    #[test]
    fn absent_client_variant_and_language_skip_those_checks() {
        let mut bare = context();
        bare.variant = None;
        bare.language = None;

        assert!(condition(json!({ "variant": "anything", "language": "fr" })).matches(&bare));
    }
}
