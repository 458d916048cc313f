//! Pieces shared by every crate of the workspace: wire types that are not owned by a domain
//! and the tracing subscriber setup.

pub mod types;
pub mod utils;
