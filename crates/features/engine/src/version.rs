use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` version, always padded to three components.
///
/// Ordering is lexicographic on the three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// Parses a loosely written version.
    ///
    /// Characters other than digits and `.` are trimmed from both ends, the rest is split on `.`,
    /// and the first three integer parts are kept. Parts that are not integers are skipped.
    ///
    /// ```rust
    /// use rcfg_engine::Version;
    ///
    /// assert_eq!(Version::parse("v2.1").unwrap(), Version::new(2, 1, 0));
    /// assert_eq!(Version::parse("1.0.0-test").unwrap(), Version::new(1, 0, 0));
    /// assert!(Version::parse("latest").is_err());
    /// ```
    ///
    /// # Errors
    /// [`ConfigError::NonSemanticVersion`] when no integer part is found.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim_matches(|c: char| !(c.is_ascii_digit() || c == '.'));
        let mut parts = trimmed.split('.').filter_map(|part| part.parse::<u64>().ok());

        let Some(major) = parts.next() else {
            return Err(ConfigError::NonSemanticVersion { input: raw.to_owned(), context: None });
        };

        Ok(Self { major, minor: parts.next().unwrap_or(0), patch: parts.next().unwrap_or(0) })
    }

    /// Canonical `M.m.p` text.
    #[must_use]
    pub fn raw_value(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Version {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u64, u64, u64)> for Version {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Self { major, minor, patch }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_missing_components() {
        for raw in ["1", "1.0", "1.0.0", "1.0.0-test", " 1.0.0 "] {
            assert_eq!(Version::parse(raw).unwrap().raw_value(), "1.0.0", "input {raw:?}");
        }
    }

    #[test]
    fn keeps_only_three_components() {
        assert_eq!(Version::parse("4.5.6.7").unwrap(), Version::new(4, 5, 6));
    }

    #[test]
    fn skips_parts_that_are_not_integers() {
        assert_eq!(Version::parse("1..2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(Version::parse("1.x.3").unwrap(), Version::new(1, 3, 0));
    }

    #[test]
    fn trims_prefixes_and_suffixes() {
        assert_eq!(Version::parse("v17.4.1").unwrap(), Version::new(17, 4, 1));
        assert_eq!(Version::parse("Android 14").unwrap(), Version::new(14, 0, 0));
        assert_eq!(Version::parse("=2.0").unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn rejects_text_without_numbers() {
        for raw in ["", ".", "...", "latest", "-"] {
            let err = Version::parse(raw).unwrap_err();
            assert!(
                matches!(&err, ConfigError::NonSemanticVersion { input, .. } if input == raw),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn orders_lexicographically() {
        assert!(Version::new(1, 2, 3) < Version::new(1, 2, 4));
        assert!(Version::new(1, 9, 9) < Version::new(2, 0, 0));
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 99));
        assert_eq!(Version::from((3, 0, 1)), "3.0.1".parse().unwrap());
    }
}
