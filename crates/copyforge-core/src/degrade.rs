//! Tagged degrade wrapper for best-effort operations.
//!
//! Components with an offline fallback (LSI suggestion, meta tags) always
//! return a usable value; the tag records whether the primary path was taken
//! so the reason can be logged without forcing callers to branch.

/// A value produced either by the primary path or by a fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Degradable<T> {
    /// The primary (backend-assisted) path succeeded.
    Full(T),
    /// The fallback produced the value; the string says why.
    Degraded(T, String),
}

impl<T> Degradable<T> {
    pub fn value(&self) -> &T {
        match self {
            Degradable::Full(v) | Degradable::Degraded(v, _) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Degradable::Full(v) | Degradable::Degraded(v, _) => v,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Degradable::Degraded(..))
    }

    /// The degradation reason, if the fallback was used.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Degradable::Full(_) => None,
            Degradable::Degraded(_, reason) => Some(reason),
        }
    }
}
