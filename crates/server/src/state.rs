use std::sync::Arc;

use service::users::{UserRepository, UserService};

/// Shared handler state. The store gateway is chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService<dyn UserRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { users: UserService::new(repo) }
    }
}
