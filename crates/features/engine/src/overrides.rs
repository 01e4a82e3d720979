use crate::condition::Condition;
use crate::context::ResolutionContext;
use crate::schedule::Schedule;
use crate::Settings;
use chrono::{DateTime, Utc};
use rcfg_domain::constants::{MATCHING, SCHEDULE, SETTINGS};
use serde_json::{Map, Value};
use tracing::debug;

/// Settings patched over the defaults when both gates pass.
///
/// * Condition gate: no `matching` list, or at least one of its conditions matches. A present but
///   empty list never passes.
/// * Schedule gate: no `schedule`, or the schedule contains the evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Override {
    pub conditions: Option<Vec<Condition>>,
    pub schedule: Option<Schedule>,
    pub settings: Settings,
}

impl Override {
    /// Reads an override object.
    ///
    /// A `matching` value that is not a list, or a list entry that is not an object, becomes a
    /// condition that never matches. A `schedule` that is not an object never opens.
    /// A `settings` value that is not an object counts as no settings.
    #[must_use]
    pub fn from_json(mut json: Map<String, Value>) -> Self {
        let conditions = json.get(MATCHING).map(|matching| match matching {
            Value::Array(entries) => entries.iter().map(condition_entry).collect(),
            other => {
                debug!(kind = json_kind(other), "Override matching is not a list, override disabled");
                vec![Condition::never()]
            },
        });

        let schedule = json.get(SCHEDULE).map(|schedule| match schedule {
            Value::Object(bounds) => Schedule::from_json(bounds),
            other => {
                debug!(kind = json_kind(other), "Override schedule is not an object, override disabled");
                Schedule::never()
            },
        });

        let settings = match json.remove(SETTINGS) {
            Some(Value::Object(settings)) => settings,
            Some(other) => {
                debug!(kind = json_kind(&other), "Override settings is not an object, ignored");
                Settings::new()
            },
            None => Settings::new(),
        };

        Self { conditions, schedule, settings }
    }

    #[must_use]
    pub fn is_matched(&self, context: &ResolutionContext) -> bool {
        self.conditions
            .as_ref()
            .is_none_or(|conditions| conditions.iter().any(|condition| condition.matches(context)))
    }

    #[must_use]
    pub fn is_scheduled(&self, date: &DateTime<Utc>) -> bool {
        self.schedule.as_ref().is_none_or(|schedule| schedule.contains(date))
    }

    #[must_use]
    pub fn applies(&self, date: &DateTime<Utc>, context: &ResolutionContext) -> bool {
        self.is_scheduled(date) && self.is_matched(context)
    }
}

fn condition_entry(entry: &Value) -> Condition {
    entry.as_object().map_or_else(
        || {
            debug!(kind = json_kind(entry), "Condition entry is not an object, condition disabled");
            Condition::never()
        },
        Condition::from_json,
    )
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
