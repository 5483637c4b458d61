//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment configuration getters with defaults
//! - Cookie building and bearer token extraction
//! - Base64 and random byte helpers
//! - Password hashing (Argon2id)
//! - JWT issuing and validation (HS256)
//! - Avatar upload storage

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
pub mod upload;
