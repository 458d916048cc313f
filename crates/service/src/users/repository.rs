use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};

use super::domain::{User, UserId};
use crate::errors::StoreError;

/// Store gateway for user records.
///
/// Every call may suspend; none may block the executor. `save` inserts when `id` is `None` and
/// updates otherwise, and reports a violated email constraint as `StoreError::Integrity`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lazily stream every user in the store's natural order.
    fn find_all(&self) -> BoxStream<'static, Result<User, StoreError>>;

    /// At most `take` users after skipping `skip`, in `find_all` order.
    ///
    /// The default walks `find_all`, so its cost grows with `skip`. Backends with native
    /// offset/limit should override it.
    async fn find_window(&self, skip: u64, take: u64) -> Result<Vec<User>, StoreError> {
        self.find_all()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(take).unwrap_or(usize::MAX))
            .try_collect()
            .await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
    async fn save(&self, user: User) -> Result<User, StoreError>;
    async fn delete_by_id(&self, id: UserId) -> Result<(), StoreError>;
    async fn exists_by_id(&self, id: UserId) -> Result<bool, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
    async fn exists_by_email_ignore_case(&self, email: &str) -> Result<bool, StoreError>;
    async fn find_by_email_ignore_case(&self, email: &str) -> Result<Option<User>, StoreError>;
}
