//! Users module: three-layer architecture (domain, repository, service).
//!
//! The service composes store gateway calls in strict sequence and owns every invariant on user
//! records; the gateways in `repo` only persist.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{NewUser, User, UserId, UserPatch};
pub use errors::{FieldViolation, UserError};
pub use repository::UserRepository;
pub use service::UserService;
