use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use tracing::debug;

use models::user;

use crate::errors::StoreError;
use crate::pagination::MAX_WINDOW;
use crate::users::domain::{User, UserId};
use crate::users::repository::UserRepository;

/// Rows fetched per round trip while streaming the whole table.
const SCAN_BATCH: u64 = 256;

/// SeaORM-backed store gateway over the `users` table.
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        User { id: Some(m.id), name: m.name, username: m.username, email: m.email, phone: m.phone, website: m.website }
    }
}

// Both sides go through SQL LOWER so the lookup folds case like `uniq_users_email_lower`.
fn by_email_ignore_case(email: &str) -> Select<user::Entity> {
    user::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(user::Column::Email))).eq(Func::lower(Expr::val(email))))
}

// OFFSET and LIMIT are bound as BIGINT.
fn window(skip: u64, take: u64) -> Select<user::Entity> {
    user::Entity::find()
        .order_by_asc(user::Column::Id)
        .offset(skip.min(MAX_WINDOW))
        .limit(take.min(MAX_WINDOW))
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    /// Keyset scan in id order, `SCAN_BATCH` rows per query. Nothing is fetched until polled.
    fn find_all(&self) -> BoxStream<'static, Result<User, StoreError>> {
        let db = self.db.clone();
        // state: None = exhausted, Some(None) = first batch, Some(Some(id)) = resume after id
        let batches = stream::try_unfold(Some(None::<UserId>), move |cursor| {
            let db = db.clone();
            async move {
                let Some(after) = cursor else { return Ok(None) };
                let mut query = user::Entity::find().order_by_asc(user::Column::Id).limit(SCAN_BATCH);
                if let Some(after) = after {
                    query = query.filter(user::Column::Id.gt(after));
                }
                let rows = query.all(&db).await.map_err(StoreError::from)?;
                let next = if (rows.len() as u64) < SCAN_BATCH { None } else { rows.last().map(|r| Some(r.id)) };
                Ok::<_, StoreError>(Some((rows, next)))
            }
        });
        batches
            .map_ok(|rows| stream::iter(rows.into_iter().map(|m| Ok(User::from(m)))))
            .try_flatten()
            .boxed()
    }

    /// OFFSET/LIMIT pushed down to PostgreSQL, same order as `find_all`.
    async fn find_window(&self, skip: u64, take: u64) -> Result<Vec<User>, StoreError> {
        let rows = window(skip, take).all(&self.db).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let res = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(res.map(User::from))
    }

    async fn save(&self, u: User) -> Result<User, StoreError> {
        let am = user::ActiveModel {
            id: match u.id { Some(id) => Unchanged(id), None => NotSet },
            name: Set(u.name),
            username: Set(u.username),
            email: Set(u.email),
            phone: Set(u.phone),
            website: Set(u.website),
        };
        let saved = match u.id {
            Some(_) => am.update(&self.db).await?,
            None => am.insert(&self.db).await?,
        };
        debug!(user_id = saved.id, "user row written");
        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), StoreError> {
        user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, StoreError> {
        let n = user::Entity::find_by_id(id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(user::Entity::find().count(&self.db).await?)
    }

    async fn exists_by_email_ignore_case(&self, email: &str) -> Result<bool, StoreError> {
        let n = by_email_ignore_case(email).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn find_by_email_ignore_case(&self, email: &str) -> Result<Option<User>, StoreError> {
        let res = by_email_ignore_case(email).one(&self.db).await?;
        Ok(res.map(User::from))
    }
}
