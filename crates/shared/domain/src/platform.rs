use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Runtime platforms known to condition matching.
///
/// Raw values are dotted: a family token (`iOS`, `Android`) and members refining it
/// (`iOS.iPhone`, `Android.tablet`). A family matches its members, never the other way around.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Platform {
    #[strum(serialize = "iOS")]
    Ios,
    #[strum(serialize = "iOS.iPhone")]
    IosPhone,
    #[strum(serialize = "iOS.iPad")]
    IosPad,
    #[strum(serialize = "iOS.TV")]
    IosTv,
    #[strum(serialize = "iOS.CarPlay")]
    IosCarPlay,
    #[strum(serialize = "iOS.Mac")]
    IosMac,
    #[strum(serialize = "macOS")]
    MacOs,
    #[strum(serialize = "watchOS")]
    WatchOs,
    #[strum(serialize = "visionOS")]
    VisionOs,
    #[strum(serialize = "Linux")]
    Linux,
    #[strum(serialize = "Windows")]
    Windows,
    #[strum(serialize = "Android")]
    Android,
    #[strum(serialize = "Android.phone")]
    AndroidPhone,
    #[strum(serialize = "Android.tablet")]
    AndroidTablet,
    #[strum(serialize = "Android.TV")]
    AndroidTv,
    #[strum(serialize = "WearOS")]
    WearOs,
    #[default]
    #[strum(serialize = "unknown")]
    Unknown,
}

impl Platform {
    /// Lenient parse: anything unrecognised becomes [`Platform::Unknown`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    #[must_use]
    pub fn raw_value(&self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn is_family(&self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }

    /// Whether a condition naming `self` covers a client reporting `other`.
    ///
    /// ```rust
    /// use rcfg_domain::Platform;
    ///
    /// assert!(Platform::Ios.applies(Platform::IosPhone));
    /// assert!(!Platform::IosPhone.applies(Platform::Ios));
    /// assert!(!Platform::Unknown.applies(Platform::Unknown));
    /// ```
    #[must_use]
    pub fn applies(&self, other: Self) -> bool {
        match self {
            Self::Unknown => false,
            family if family.is_family() => other.raw_value().starts_with(family.raw_value()),
            _ => *self == other,
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.raw_value())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}
