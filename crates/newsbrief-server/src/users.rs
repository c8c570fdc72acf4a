//! User persistence behind a trait.
//!
//! The real deployment would back this with a database; the server only
//! needs the narrow surface below. Users come into existence at first
//! successful authentication.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::info;

use newsbrief_core::{Preferences, User};

/// Storage for user accounts.
pub trait UserStore: Send + Sync {
    /// Returns a user by id.
    fn get(&self, user_id: &str) -> Option<User>;

    /// Returns the user, creating one from the identity on first sight.
    fn get_or_create(&self, user_id: &str, email: &str) -> User;

    /// Replaces a user's preferences. Returns the updated user, or `None`
    /// when the user does not exist.
    fn update_preferences(&self, user_id: &str, preferences: Preferences) -> Option<User>;
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, user_id: &str) -> Option<User> {
        self.users.read().unwrap().get(user_id).cloned()
    }

    fn get_or_create(&self, user_id: &str, email: &str) -> User {
        let mut users = self.users.write().unwrap();
        users
            .entry(user_id.to_string())
            .or_insert_with(|| {
                // local part of the email doubles as the username
                let username = email.split('@').next().unwrap_or(user_id);
                info!(user_id, "created user account");
                User::new(user_id, username, email)
            })
            .clone()
    }

    fn update_preferences(&self, user_id: &str, preferences: Preferences) -> Option<User> {
        let mut users = self.users.write().unwrap();
        let user = users.get_mut(user_id)?;
        user.preferences = preferences;
        Some(user.clone())
    }
}
