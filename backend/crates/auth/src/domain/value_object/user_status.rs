//! User Status and Type
//!
//! Both are stored as upper-case text columns.
//! Only `ACTIVATED` users may log in.

use derive_more::Display;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum UserStatus {
    #[display("PENDING")]
    Pending,

    /// Registered users start here
    #[default]
    #[display("ACTIVATED")]
    Activated,

    #[display("SUSPENDED")]
    Suspended,
}

impl UserStatus {
    /// Text stored in `users.status`
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Activated => "ACTIVATED",
            Self::Suspended => "SUSPENDED",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(Self::Pending),
            "ACTIVATED" => Some(Self::Activated),
            "SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }

    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Activated)
    }
}

/// Who created the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum UserType {
    #[display("INTERNAL")]
    Internal,

    /// Self-registered
    #[default]
    #[display("EXTERNAL")]
    External,
}

impl UserType {
    /// Text stored in `users.user_type`
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Internal => "INTERNAL",
            Self::External => "EXTERNAL",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INTERNAL" => Some(Self::Internal),
            "EXTERNAL" => Some(Self::External),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        for status in [UserStatus::Pending, UserStatus::Activated, UserStatus::Suspended] {
            assert_eq!(UserStatus::from_code(status.code()), Some(status));
            assert_eq!(status.to_string(), status.code());
        }
        assert_eq!(UserStatus::from_code("activated"), None);
    }

    #[test]
    fn test_only_activated_can_login() {
        assert!(UserStatus::Activated.can_login());
        assert!(!UserStatus::Pending.can_login());
        assert!(!UserStatus::Suspended.can_login());
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(UserType::default(), UserType::External);
        assert_eq!(UserType::from_code("INTERNAL"), Some(UserType::Internal));
        assert_eq!(UserType::External.to_string(), "EXTERNAL");
        assert_eq!(UserType::from_code("ADMIN"), None);
    }
}
