//! In-memory store gateway for local runs, tests and doc examples.
//!
//! Applies the same case-insensitive email constraint as the `users` table, so races and
//! conflicts behave as they do against PostgreSQL.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use crate::errors::StoreError;
use crate::users::domain::{emails_match, User, UserId};
use crate::users::repository::UserRepository;

const EMAIL_CONSTRAINT: &str = "uniq_users_email_lower";

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, User>>, // key: id, iteration order is the natural order
    last_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self { Self::default() }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.users.read().map_err(|_| StoreError::Backend("user map lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.users.write().map_err(|_| StoreError::Backend("user map lock poisoned".into()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    fn find_all(&self) -> BoxStream<'static, Result<User, StoreError>> {
        // Snapshot at call time; later writes are not observed by this stream.
        match self.read() {
            Ok(users) => stream::iter(users.values().cloned().map(Ok).collect::<Vec<_>>()).boxed(),
            Err(e) => stream::once(async move { Err(e) }).boxed(),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.write()?;
        let clash = users
            .values()
            .any(|u| u.id != user.id && emails_match(&u.email, &user.email));
        if clash {
            return Err(StoreError::Integrity(EMAIL_CONSTRAINT.into()));
        }
        let id = match user.id {
            Some(id) if users.contains_key(&id) => id,
            Some(id) => return Err(StoreError::Backend(format!("no user row with id {id} to update"))),
            None => self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), StoreError> {
        self.write()?.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, StoreError> {
        Ok(self.read()?.contains_key(&id))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.len() as u64)
    }

    async fn exists_by_email_ignore_case(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.read()?.values().any(|u| emails_match(&u.email, email)))
    }

    async fn find_by_email_ignore_case(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.values().find(|u| emails_match(&u.email, email)).cloned())
    }
}
