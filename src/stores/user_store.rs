use crate::models::user::{Club, NewUser, UserRecord};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::{uuid, Uuid};

/// Fixture records present at startup so the listing is never empty on first run
pub const SEED_USERS: [(Uuid, &str, &str, Club, &str); 2] = [
    (
        uuid!("3c8da4d5-1597-46e7-baa1-e402aed70d80"),
        "sallyStudent",
        "c00d1ng1sc00l",
        Club::CacheValleyStoneSociety,
        "true",
    ),
    (
        uuid!("ce20079c-2326-4f17-8ac4-f617bfd28b7f"),
        "johnBlocton",
        "veryg00dpassw0rd",
        Club::SaltCityCurlingClub,
        "false",
    ),
];

/// Insertion-ordered, in-memory collection of registered users
///
/// Every mutation takes the write lock for its whole read-then-write, so a
/// reader never observes a half-applied create or delete.
pub struct UserStore {
    users: RwLock<Vec<Arc<UserRecord>>>,
}

impl UserStore {
    /// Create an empty UserStore
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding the fixture users
    pub fn with_seed_data() -> Self {
        let users = SEED_USERS
            .iter()
            .map(|(id, username, password, club, news_letter)| {
                Arc::new(UserRecord::new(
                    *id,
                    NewUser {
                        username: username.to_string(),
                        password: password.to_string(),
                        favorite_club: *club,
                        news_letter: Value::String(news_letter.to_string()),
                    },
                ))
            })
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }

    /// Store an already validated user under a freshly generated id
    pub fn create(&self, user: NewUser) -> Arc<UserRecord> {
        let mut users = self.write();

        let mut id = Uuid::new_v4();
        while users.iter().any(|u| u.id == id) {
            id = Uuid::new_v4();
        }

        let record = Arc::new(UserRecord::new(id, user));
        users.push(Arc::clone(&record));
        record
    }

    /// Remove the user with the given id
    /// Returns false, leaving the store untouched, when no such user exists
    pub fn delete_by_id(&self, id: Uuid) -> bool {
        let mut users = self.write();

        match users.iter().position(|u| u.id == id) {
            Some(index) => {
                users.remove(index);
                true
            }
            None => false,
        }
    }

    /// Get a user by id
    pub fn get(&self, id: Uuid) -> Option<Arc<UserRecord>> {
        self.read().iter().find(|u| u.id == id).map(Arc::clone)
    }

    /// Snapshot of every user in insertion order
    pub fn list(&self) -> Vec<Arc<UserRecord>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // No critical section can leave the vector half-modified, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<UserRecord>>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<UserRecord>>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
