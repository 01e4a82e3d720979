use crate::error::{ConfigError, ConfigErrorExt};
use crate::version::Version;
use std::fmt;
use std::str::FromStr;

/// One end of a [`VersionRange::Between`] interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

impl Bound {
    #[must_use]
    pub const fn new(version: Version, inclusive: bool) -> Self {
        Self { version, inclusive }
    }
}

/// A predicate over [`Version`], written in a compact text form.
///
/// | Text            | Range                                   |
/// |-----------------|-----------------------------------------|
/// | `1.0.0`, `=1.0` | exactly `1.0.0`                         |
/// | `<1.0`, `<=1.0` | below, optionally including, `1.0.0`    |
/// | `>1.0`, `>=1.0` | above, optionally including, `1.0.0`    |
/// | `1.0-2.0`       | `1.0.0` up to `2.0.0`, both included     |
/// | `1.0>-<2.0`     | strictly between `1.0.0` and `2.0.0`    |
///
/// `=<` and `=>` are accepted as spellings of `<=` and `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionRange {
    Equal(Version),
    LessThan { version: Version, inclusive: bool },
    GreaterThan { version: Version, inclusive: bool },
    Between { lower: Bound, upper: Bound },
}

impl VersionRange {
    /// Parses the range text. See the type docs for the grammar.
    ///
    /// # Errors
    /// * [`ConfigError::InvalidVersionRange`] when the text has no part or more than two parts
    ///   around `-`.
    /// * [`ConfigError::NonSemanticVersion`] when a bound is not a version.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = raw.split('-').filter(|part| !part.is_empty()).collect();

        match parts.as_slice() {
            [lower, upper] => {
                let (lower, lower_inclusive) =
                    lower.strip_suffix('>').map_or((*lower, true), |rest| (rest, false));
                let (upper, upper_inclusive) =
                    upper.strip_prefix('<').map_or((*upper, true), |rest| (rest, false));

                Ok(Self::Between {
                    lower: Bound::new(Version::parse(lower).context("lower bound")?, lower_inclusive),
                    upper: Bound::new(Version::parse(upper).context("upper bound")?, upper_inclusive),
                })
            },
            [single] => Self::parse_single(single),
            _ => Err(ConfigError::InvalidVersionRange { input: raw.to_owned(), context: None }),
        }
    }

    fn parse_single(part: &str) -> Result<Self, ConfigError> {
        if let Some(rest) = part.strip_prefix("<=").or_else(|| part.strip_prefix("=<")) {
            return Ok(Self::LessThan { version: Version::parse(rest)?, inclusive: true });
        }
        if let Some(rest) = part.strip_prefix('<') {
            return Ok(Self::LessThan { version: Version::parse(rest)?, inclusive: false });
        }
        if let Some(rest) = part.strip_prefix(">=").or_else(|| part.strip_prefix("=>")) {
            return Ok(Self::GreaterThan { version: Version::parse(rest)?, inclusive: true });
        }
        if let Some(rest) = part.strip_prefix('>') {
            return Ok(Self::GreaterThan { version: Version::parse(rest)?, inclusive: false });
        }

        Ok(Self::Equal(Version::parse(part.strip_prefix('=').unwrap_or(part))?))
    }

    #[must_use]
    pub fn contains(&self, candidate: &Version) -> bool {
        match *self {
            Self::Equal(version) => *candidate == version,
            Self::LessThan { version, inclusive } => {
                if inclusive { *candidate <= version } else { *candidate < version }
            },
            Self::GreaterThan { version, inclusive } => {
                if inclusive { *candidate >= version } else { *candidate > version }
            },
            Self::Between { lower, upper } => {
                let above = if lower.inclusive {
                    *candidate >= lower.version
                } else {
                    *candidate > lower.version
                };
                let below = if upper.inclusive {
                    *candidate <= upper.version
                } else {
                    *candidate < upper.version
                };
                above && below
            },
        }
    }

    /// Canonical text with fully padded versions, e.g. `1.0.0>-<2.0.0`.
    #[must_use]
    pub fn raw_value(&self) -> String {
        self.to_string()
    }
}

impl FromStr for VersionRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal(version) => write!(f, "{version}"),
            Self::LessThan { version, inclusive } => {
                write!(f, "{}{version}", if *inclusive { "<=" } else { "<" })
            },
            Self::GreaterThan { version, inclusive } => {
                write!(f, "{}{version}", if *inclusive { ">=" } else { ">" })
            },
            Self::Between { lower, upper } => write!(
                f,
                "{}{}-{}{}",
                lower.version,
                if lower.inclusive { "" } else { ">" },
                if upper.inclusive { "" } else { "<" },
                upper.version,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: &str) -> Version {
        Version::parse(raw).unwrap()
    }

    fn range(raw: &str) -> VersionRange {
        VersionRange::parse(raw).unwrap()
    }

    #[test]
    fn parses_every_form() {
        assert_eq!(range("1.2"), VersionRange::Equal(v("1.2.0")));
        assert_eq!(range("=1.2"), VersionRange::Equal(v("1.2.0")));
        assert_eq!(range("<1"), VersionRange::LessThan { version: v("1"), inclusive: false });
        assert_eq!(range("<=1"), VersionRange::LessThan { version: v("1"), inclusive: true });
        assert_eq!(range("=<1"), VersionRange::LessThan { version: v("1"), inclusive: true });
        assert_eq!(range(">1"), VersionRange::GreaterThan { version: v("1"), inclusive: false });
        assert_eq!(range(">=1"), VersionRange::GreaterThan { version: v("1"), inclusive: true });
        assert_eq!(range("=>1"), VersionRange::GreaterThan { version: v("1"), inclusive: true });
        assert_eq!(
            range("1>-<2"),
            VersionRange::Between {
                lower: Bound::new(v("1"), false),
                upper: Bound::new(v("2"), false),
            }
        );
        assert_eq!(
            range("1-<2"),
            VersionRange::Between { lower: Bound::new(v("1"), true), upper: Bound::new(v("2"), false) }
        );
    }

    #[test]
    fn raw_value_pads_versions() {
        assert_eq!(range("1.0-2.0").raw_value(), "1.0.0-2.0.0");
        assert_eq!(range("1>-2").raw_value(), "1.0.0>-2.0.0");
        assert_eq!(range("=<3.1").raw_value(), "<=3.1.0");
        assert_eq!(range("=4").raw_value(), "4.0.0");
    }

    #[test]
    fn raw_value_parses_back_to_the_same_range() {
        for raw in ["1", "<1", "<=1", ">1", ">=1", "1-2", "1>-2", "1-<2", "1>-<2"] {
            let parsed = range(raw);
            assert_eq!(range(&parsed.raw_value()), parsed, "input {raw:?}");
        }
    }

    #[test]
    fn equal_contains_only_itself() {
        let equal = range("1.0.0");
        assert!(equal.contains(&v("1.0.0")));
        for other in ["0.9.9", "1.0.1", "2.0.0"] {
            assert!(!equal.contains(&v(other)), "{other}");
        }
    }

    #[test]
    fn exclusive_between_drops_both_ends() {
        let between = range("1.0.0>-<2.0.0");
        assert!(between.contains(&v("1.0.1")));
        assert!(between.contains(&v("1.9.0")));
        assert!(!between.contains(&v("1.0.0")));
        assert!(!between.contains(&v("2.0.0")));
    }

    #[test]
    fn half_open_between() {
        let lower_open = range("1.0.0>-2.0.0");
        assert!(!lower_open.contains(&v("1.0.0")));
        assert!(lower_open.contains(&v("2.0.0")));

        let upper_open = range("1.0.0-<2.0.0");
        assert!(upper_open.contains(&v("1.0.0")));
        assert!(!upper_open.contains(&v("2.0.0")));
    }

    #[test]
    fn inclusive_less_than() {
        let at_most = range("<=1.0.0");
        assert!(at_most.contains(&v("0.9.9")));
        assert!(at_most.contains(&v("1.0.0")));
        assert!(!at_most.contains(&v("1.0.1")));

        let below = range("<1.0.0");
        assert!(!below.contains(&v("1.0.0")));
    }

    #[test]
    fn greater_than() {
        assert!(range(">1.0.0").contains(&v("1.0.1")));
        assert!(!range(">1.0.0").contains(&v("1.0.0")));
        assert!(range(">=1.0.0").contains(&v("1.0.0")));
    }

    #[test]
    fn wrong_part_count_is_invalid() {
        for raw in ["", "-", "--", "1-2-3", "1.0-2.0-3.0"] {
            assert!(
                matches!(VersionRange::parse(raw), Err(ConfigError::InvalidVersionRange { .. })),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn bad_bounds_are_not_versions() {
        let err = VersionRange::parse("x-2.0").unwrap_err();
        assert!(matches!(err, ConfigError::NonSemanticVersion { context: Some(_), .. }));
        assert!(matches!(VersionRange::parse("<=beta"), Err(ConfigError::NonSemanticVersion { .. })));
    }
}
