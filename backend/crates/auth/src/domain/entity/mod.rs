//! Entity Module

pub mod user;

pub use user::{AccountChanges, NewUser, User};
