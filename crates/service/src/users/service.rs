use std::sync::Arc;

use tracing::{debug, instrument};

use super::domain::{emails_match, merge, NewUser, User, UserId, UserPatch};
use super::errors::UserError;
use super::repository::UserRepository;
use crate::pagination::{paginate, PageRequest, PagedResult};

/// User business service independent of web framework.
///
/// Each operation issues its store calls one after another; a later call always depends on the
/// result of an earlier one. Nothing is cached between operations.
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// One page of users. `page` is clamped to at least 0 and `size` to at least 1.
    #[instrument(skip(self))]
    pub async fn list(&self, page: i64, size: i64) -> Result<Vec<User>, UserError> {
        self.window(PageRequest::new(page, size)).await
    }

    /// One page of users with its pagination metadata.
    ///
    /// The count and the page are two separate reads; a write landing between them can make the
    /// total disagree with the page contents.
    ///
    /// # Examples
    /// ```
    /// use service::users::{repo::InMemoryUserRepository, NewUser, UserService};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
    /// for i in 0..3 {
    ///     let input = NewUser { name: "N".into(), username: format!("u{i}"), email: format!("u{i}@example.com"), ..Default::default() };
    ///     tokio_test::block_on(svc.create(input)).unwrap();
    /// }
    /// let page = tokio_test::block_on(svc.list_paged(1, 2)).unwrap();
    /// assert_eq!(page.items.len(), 1);
    /// assert_eq!(page.pagination.total_pages, 2);
    /// assert!(page.pagination.has_previous && !page.pagination.has_next);
    /// ```
    #[instrument(skip(self))]
    pub async fn list_paged(&self, page: i64, size: i64) -> Result<PagedResult<User>, UserError> {
        let req = PageRequest::new(page, size);
        let total = self.repo.count().await?;
        let items = self.window(req).await?;
        Ok(PagedResult { items, pagination: paginate(req.page(), req.size(), total) })
    }

    async fn window(&self, req: PageRequest) -> Result<Vec<User>, UserError> {
        let users = self.repo.find_window(req.offset(), req.size()).await?;
        debug!(count = users.len(), offset = req.offset(), "page fetched");
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: UserId) -> Result<User, UserError> {
        self.repo.find_by_id(id).await?.ok_or(UserError::NotFound(id))
    }

    /// Create a user with a store-assigned identifier.
    ///
    /// # Examples
    /// ```
    /// use service::users::{repo::InMemoryUserRepository, NewUser, UserError, UserService};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
    /// let input = NewUser { id: Some(99), name: "Leanne Graham".into(), username: "Bret".into(), email: "Sincere@april.biz".into(), ..Default::default() };
    /// let user = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// assert_eq!(user.id, Some(1));
    /// let again = NewUser { email: "sincere@APRIL.biz".into(), ..input };
    /// assert!(matches!(tokio_test::block_on(svc.create(again)), Err(UserError::Conflict(_))));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewUser) -> Result<User, UserError> {
        if self.repo.exists_by_email_ignore_case(&input.email).await? {
            debug!("email already taken");
            return Err(UserError::Conflict(input.email));
        }
        let email = input.email.clone();
        let saved = self
            .repo
            .save(input.into_entity())
            .await
            .map_err(|e| UserError::from_save(e, &email))?;
        debug!(user_id = ?saved.id, "user_created");
        Ok(saved)
    }

    /// Apply the present fields of `patch` to user `id`.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, UserError> {
        let existing = self.repo.find_by_id(id).await?.ok_or(UserError::NotFound(id))?;

        if let Some(new_email) = patch.email.as_deref() {
            if !emails_match(new_email, &existing.email) {
                if let Some(owner) = self.repo.find_by_email_ignore_case(new_email).await? {
                    if owner.id != Some(id) {
                        debug!(owner = ?owner.id, "email owned by another user");
                        return Err(UserError::Conflict(new_email.to_string()));
                    }
                }
            }
        }

        let email = patch.email.clone().unwrap_or_else(|| existing.email.clone());
        let saved = self
            .repo
            .save(merge(existing, patch))
            .await
            .map_err(|e| UserError::from_save(e, &email))?;
        debug!("user_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), UserError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }
        self.repo.delete_by_id(id).await?;
        debug!("user_deleted");
        Ok(())
    }
}
