use crate::constraint::Constraint;
use chrono::{DateTime, Utc};
use rcfg_domain::constants::{FROM, UNTIL};
use serde_json::{Map, Value};
use tracing::debug;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// A time window: `from` inclusive, `until` exclusive.
///
/// A window without any bound, or with a bound that is not a timestamp, contains no instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    from: Constraint<DateTime<Utc>>,
    until: Constraint<DateTime<Utc>>,
}

impl Schedule {
    #[must_use]
    pub fn new(from: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Self {
        Self { from: from.into(), until: until.into() }
    }

    /// A window that contains no instant.
    #[must_use]
    pub const fn never() -> Self {
        Self { from: Constraint::Unsatisfiable, until: Constraint::Unsatisfiable }
    }

    /// Reads a schedule object. Never fails; bad input yields [`Schedule::never`]-like behavior.
    #[must_use]
    pub fn from_json(json: &Map<String, Value>) -> Self {
        Self { from: bound(json, FROM), until: bound(json, UNTIL) }
    }

    #[must_use]
    pub const fn is_never(&self) -> bool {
        self.from.is_unsatisfiable()
            || self.until.is_unsatisfiable()
            || (self.from.is_unconstrained() && self.until.is_unconstrained())
    }

    #[must_use]
    pub const fn from(&self) -> Option<&DateTime<Utc>> {
        self.from.required()
    }

    #[must_use]
    pub const fn until(&self) -> Option<&DateTime<Utc>> {
        self.until.required()
    }

    #[must_use]
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        !self.is_never()
            && self.from.admits(|from| date >= from)
            && self.until.admits(|until| date < until)
    }

    /// The bounds at which [`Schedule::contains`] flips. Empty for a window that never opens.
    pub fn boundaries(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        let bounds = if self.is_never() { [None, None] } else { [self.from(), self.until()] };
        bounds.into_iter().flatten().copied()
    }
}

/// Parses an ISO-8601 timestamp with a `Z`, `+hh:mm` or `+hhmm` offset into UTC.
///
/// ```rust
/// use rcfg_engine::schedule::parse_timestamp;
///
/// let date = parse_timestamp("2024-08-21T00:00:00+0100").unwrap();
/// assert_eq!(date.to_rfc3339(), "2024-08-20T23:00:00+00:00");
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS.iter().find_map(|format| DateTime::parse_from_str(raw, format).ok())
        })
        .map(|date| date.with_timezone(&Utc))
}

fn bound(json: &Map<String, Value>, key: &'static str) -> Constraint<DateTime<Utc>> {
    match json.get(key) {
        None => Constraint::Unconstrained,
        Some(value) => value.as_str().and_then(parse_timestamp).map_or_else(
            || {
                debug!(key, %value, "Unusable schedule bound, schedule disabled");
                Constraint::Unsatisfiable
            },
            Constraint::Required,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn schedule(value: Value) -> Schedule {
        match value {
            Value::Object(map) => Schedule::from_json(&map),
            other => panic!("not an object: {other}"),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn from_is_inclusive_and_until_is_exclusive() {
        let window = schedule(json!({
            "from": "2024-01-01T00:00:00Z",
            "until": "2024-01-02T00:00:00Z"
        }));

        assert!(!window.contains(&(at(2024, 1, 1, 0) - chrono::Duration::seconds(1))));
        assert!(window.contains(&at(2024, 1, 1, 0)));
        assert!(window.contains(&at(2024, 1, 1, 23)));
        assert!(!window.contains(&at(2024, 1, 2, 0)));
    }

    #[test]
    fn open_ended_windows() {
        let since = schedule(json!({ "from": "2024-01-01T00:00:00Z" }));
        assert!(since.contains(&at(2030, 1, 1, 0)));
        assert!(!since.contains(&at(2023, 12, 31, 0)));

        let before = schedule(json!({ "until": "2024-01-01T00:00:00Z" }));
        assert!(before.contains(&at(2000, 1, 1, 0)));
        assert!(!before.contains(&at(2024, 1, 1, 0)));
    }

    #[test]
    fn window_without_bounds_never_opens() {
        let empty = schedule(json!({}));
        assert!(empty.is_never());
        assert!(!empty.contains(&at(2024, 1, 1, 0)));
        assert_eq!(empty.boundaries().count(), 0);
    }

    #[test]
    fn unparseable_bound_disables_the_window() {
        for raw in [
            json!({ "from": "tomorrow", "until": "2024-01-02T00:00:00Z" }),
            json!({ "from": "2024-01-01T00:00:00Z", "until": 1_704_153_600 }),
            json!({ "from": "2024-01-01" }),
        ] {
            let window = schedule(raw.clone());
            assert!(window.is_never(), "{raw}");
            assert!(!window.contains(&at(2024, 1, 1, 12)), "{raw}");
            assert_eq!(window.boundaries().count(), 0, "{raw}");
        }
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        assert_eq!(parse_timestamp("2024-08-21T00:00:00+0100"), Some(at(2024, 8, 20, 23)));
        assert_eq!(parse_timestamp("2024-09-11T00:00:00-09:00"), Some(at(2024, 9, 11, 9)));
        assert_eq!(parse_timestamp("2024-09-11T09:00:00Z"), Some(at(2024, 9, 11, 9)));
        assert_eq!(
            parse_timestamp("2024-09-11T09:00:00.250+0000"),
            Some(at(2024, 9, 11, 9) + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_timestamp("11/09/2024"), None);
    }

    #[test]
    fn programmatic_windows() {
        let window = Schedule::new(Some(at(2024, 1, 1, 0)), None);
        assert_eq!(window.from(), Some(&at(2024, 1, 1, 0)));
        assert_eq!(window.until(), None);
        assert_eq!(window.boundaries().collect::<Vec<_>>(), vec![at(2024, 1, 1, 0)]);
        assert!(Schedule::never().is_never());
    }
}
