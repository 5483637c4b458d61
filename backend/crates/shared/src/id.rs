//! Common ID Types
//!
//! Type-safe wrappers around the `BIGSERIAL` primary keys used by every table.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

/// Rejected textual ID (path segment, JWT subject)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id: {0:?}")]
pub struct InvalidId(pub String);

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{EmployeeId, Id};
///
/// let id: EmployeeId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<EmployeeId>().is_err());
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a database key
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Raw key for binding into queries
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls so the marker type needs no bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = InvalidId;

    /// Accepts positive decimal integers only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self::new(value)),
            _ => Err(InvalidId(s.to_string())),
        }
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for `users.id`
    pub enum User {}

    /// Marker for `employees.id`
    pub enum Employee {}
}

pub type UserId = Id<markers::User>;
pub type EmployeeId = Id<markers::Employee>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        let id: UserId = " 17 ".parse().unwrap();
        assert_eq!(id.get(), 17);
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<EmployeeId>().is_err());
        assert!("-3".parse::<EmployeeId>().is_err());
        assert!("0".parse::<EmployeeId>().is_err());
        assert!("".parse::<EmployeeId>().is_err());
        assert_eq!(
            "1.5".parse::<EmployeeId>().unwrap_err(),
            InvalidId("1.5".to_string())
        );
    }

    #[test]
    fn test_copy_and_eq_without_marker_bounds() {
        let a = EmployeeId::new(5);
        let b = a;
        assert_eq!(a, b);
        assert!(EmployeeId::new(1) < EmployeeId::new(2));
    }
}
