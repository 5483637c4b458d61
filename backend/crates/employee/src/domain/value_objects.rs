//! Domain Value Objects
//!
//! Enumerated employee columns. Both are stored as text exactly as their
//! `Display` output.

use derive_more::Display;

/// Employee gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EmployeeStatus {
    #[display("ACTIVE")]
    Active,
    #[display("INACTIVE")]
    Inactive,
    #[display("PENDING")]
    Pending,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::Inactive,
        EmployeeStatus::Pending,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Pending => "PENDING",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Bootstrap badge color
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Active => "success",
            Self::Inactive => "secondary",
            Self::Pending => "warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_display() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_code(&gender.to_string()), Some(gender));
        }
        for status in EmployeeStatus::ALL {
            assert_eq!(EmployeeStatus::from_code(&status.to_string()), Some(status));
        }
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert_eq!(Gender::from_code("male"), None);
        assert_eq!(EmployeeStatus::from_code("active"), None);
        assert_eq!(EmployeeStatus::from_code(""), None);
    }
}
