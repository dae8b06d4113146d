// Application state (AppState)

use crate::core::config::{Config, RuntimeMode};
use crate::stores::user_store::UserStore;
use std::sync::Arc;

/// Shared application state
///
/// Handed to every request handler; the user store lives here rather than in
/// a process-wide global.
#[derive(Clone)]
pub struct AppState {
    /// Registered users
    pub users: Arc<UserStore>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by the fixture users
    pub fn new(config: Config) -> Self {
        Self::with_store(config, UserStore::with_seed_data())
    }

    pub fn with_store(config: Config, users: UserStore) -> Self {
        Self {
            users: Arc::new(users),
            config: Arc::new(config),
        }
    }

    pub fn mode(&self) -> RuntimeMode {
        self.config.server.mode
    }
}
