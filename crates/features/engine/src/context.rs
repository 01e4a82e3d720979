use crate::version::Version;
use rcfg_domain::{BuildVariant, Platform};
use typed_builder::TypedBuilder;

/// The running client, as seen by condition matching.
///
/// ```rust
/// use rcfg_engine::{ResolutionContext, Version};
/// use rcfg_domain::{BuildVariant, Platform};
///
/// let context = ResolutionContext::builder()
///     .platform(Platform::IosPhone)
///     .platform_version(Version::new(17, 4, 0))
///     .app_version(Version::new(2, 1, 0))
///     .build_variant(BuildVariant::Release)
///     .language("nl-BE")
///     .build();
///
/// assert!(context.variant.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct ResolutionContext {
    pub platform: Platform,
    pub platform_version: Version,
    pub app_version: Version,
    #[builder(default, setter(into, strip_option))]
    pub variant: Option<String>,
    pub build_variant: BuildVariant,
    /// Language code, optionally with a region (`nl`, `nl-BE`).
    #[builder(default, setter(into, strip_option))]
    pub language: Option<String>,
}
