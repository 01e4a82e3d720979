/// State of one optional field of a condition or schedule.
///
/// Keeps "not specified" apart from "specified but unusable": the first imposes nothing,
/// the second can never be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Constraint<T> {
    #[default]
    Unconstrained,
    Required(T),
    Unsatisfiable,
}

impl<T> Constraint<T> {
    /// Whether the constraint lets a value through, `check` deciding for [`Constraint::Required`].
    pub fn admits(&self, check: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::Required(value) => check(value),
            Self::Unsatisfiable => false,
        }
    }

    #[must_use]
    pub const fn is_unsatisfiable(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }

    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        matches!(self, Self::Unconstrained)
    }

    #[must_use]
    pub const fn required(&self) -> Option<&T> {
        match self {
            Self::Required(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Constraint<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unconstrained, Self::Required)
    }
}
