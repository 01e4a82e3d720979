use crate::context::ResolutionContext;
use crate::document::RemoteConfig;
use crate::schedule::Schedule;
use crate::Settings;
use chrono::{DateTime, Utc};
use tracing::trace;

impl RemoteConfig {
    /// Effective settings for `context` at `date`.
    ///
    /// Starts from a copy of the defaults and applies every override whose gates pass, in
    /// document order, so a later override wins a key over an earlier one. Total and pure:
    /// the same arguments always give the same map.
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use rcfg_domain::{BuildVariant, Platform};
    /// use rcfg_engine::{RemoteConfig, ResolutionContext, Version};
    /// use serde_json::json;
    ///
    /// let config = RemoteConfig::from_value(json!({
    ///     "settings": { "theme": "light" },
    ///     "overrides": [{ "matching": [{ "platform": "Android" }], "settings": { "theme": "dark" } }]
    /// }))
    /// .unwrap();
    ///
    /// let context = ResolutionContext::builder()
    ///     .platform(Platform::AndroidTablet)
    ///     .platform_version(Version::new(14, 0, 0))
    ///     .app_version(Version::new(1, 0, 0))
    ///     .build_variant(BuildVariant::Release)
    ///     .build();
    ///
    /// assert_eq!(config.resolve(&Utc::now(), &context)["theme"], "dark");
    /// ```
    #[must_use]
    pub fn resolve(&self, date: &DateTime<Utc>, context: &ResolutionContext) -> Settings {
        self.overrides().iter().enumerate().filter(|(_, item)| item.applies(date, context)).fold(
            self.settings().clone(),
            |mut resolved, (index, item)| {
                trace!(index, keys = item.settings.len(), "Applying override");
                resolved.extend(item.settings.iter().map(|(key, value)| (key.clone(), value.clone())));
                resolved
            },
        )
    }

    /// Schedule bounds of the overrides whose conditions match `context`, sorted ascending.
    ///
    /// These are the instants at which [`RemoteConfig::resolve`] may change its answer.
    /// Duplicates are kept.
    #[must_use]
    pub fn relevant_resolution_dates(&self, context: &ResolutionContext) -> Vec<DateTime<Utc>> {
        let mut dates: Vec<DateTime<Utc>> = self
            .overrides()
            .iter()
            .filter(|item| item.is_matched(context))
            .filter_map(|item| item.schedule.as_ref())
            .flat_map(Schedule::boundaries)
            .collect();
        dates.sort_unstable();
        dates
    }

    /// [`RemoteConfig::relevant_resolution_dates`] strictly after `now`.
    #[must_use]
    pub fn upcoming_resolution_dates(
        &self,
        now: &DateTime<Utc>,
        context: &ResolutionContext,
    ) -> Vec<DateTime<Utc>> {
        let mut dates = self.relevant_resolution_dates(context);
        dates.retain(|date| date > now);
        dates
    }

    /// The earliest instant after `now` at which the settings may change.
    #[must_use]
    pub fn next_resolution_date(
        &self,
        now: &DateTime<Utc>,
        context: &ResolutionContext,
    ) -> Option<DateTime<Utc>> {
        self.overrides()
            .iter()
            .filter(|item| item.is_matched(context))
            .filter_map(|item| item.schedule.as_ref())
            .flat_map(Schedule::boundaries)
            .filter(|date| date > now)
            .min()
    }
}
