use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Build flavour of the running client. Compared by equality only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum BuildVariant {
    Release,
    Debug,
    #[default]
    Unknown,
}

impl BuildVariant {
    /// Lenient parse: anything other than `release` or `debug` becomes [`BuildVariant::Unknown`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    #[must_use]
    pub fn raw_value(&self) -> &'static str {
        self.into()
    }
}

impl Serialize for BuildVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.raw_value())
    }
}

impl<'de> Deserialize<'de> for BuildVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_variants() {
        assert_eq!(BuildVariant::from_raw("release"), BuildVariant::Release);
        assert_eq!(BuildVariant::from_raw("debug"), BuildVariant::Debug);
        assert_eq!(BuildVariant::Debug.raw_value(), "debug");
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(BuildVariant::from_raw("Release"), BuildVariant::Unknown);
        assert_eq!(BuildVariant::from_raw("beta"), BuildVariant::Unknown);
        assert_eq!(BuildVariant::Unknown.to_string(), "unknown");
    }
}
