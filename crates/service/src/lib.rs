//! Service layer for user records.
//! - Enforces the business invariants (case-insensitive email uniqueness, existence before mutation).
//! - Talks to persistence only through the `UserRepository` store gateway.
//! - Returns structured errors; status mapping belongs to the HTTP boundary.

pub mod errors;
pub mod pagination;
pub mod users;
#[cfg(test)]
pub mod test_support;

pub use users::UserService;
