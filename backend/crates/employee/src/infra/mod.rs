//! Infrastructure Layer
//!
//! Database implementations.

pub mod postgres;

#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgEmployeeRepository;
