//! Value Object Module

pub mod email;
pub mod user_name;
pub mod user_status;

pub use email::Email;
pub use user_name::Username;
pub use user_status::{UserStatus, UserType};
