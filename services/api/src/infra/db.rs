use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect, SqlErr, TransactionTrait,
    sea_query::OnConflict,
};
use uuid::Uuid;

use rmuse_api_schema::{follows, media, users};
use rmuse_domain::user::UserRole;

use crate::domain::repository::{FollowRepository, MediumRepository, UserRepository};
use crate::domain::types::{Medium, User};
use crate::domain::validation::{MediumConflicts, UserConflicts, ValidationErrors};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn insert_checked<F>(&self, email: &str, username: &str, build: F) -> Result<User, ApiError>
    where
        F: FnOnce(UserConflicts) -> Result<User, ValidationErrors> + Send,
    {
        let txn = self.db.begin().await.context("begin user insert")?;
        let conflicts = user_conflicts(&txn, None, email, username).await?;
        let user = build(conflicts)?;

        user_active_model(&user)
            .insert(&txn)
            .await
            .map_err(|e| user_write_error(e, &user, "insert user"))?;
        txn.commit().await.context("commit user insert")?;
        Ok(user)
    }

    async fn update_checked<F>(
        &self,
        id: Uuid,
        email: Option<&str>,
        username: Option<&str>,
        build: F,
    ) -> Result<User, ApiError>
    where
        F: FnOnce(User, UserConflicts) -> Result<User, ValidationErrors> + Send,
    {
        let txn = self.db.begin().await.context("begin user update")?;
        let stored = users::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock user for update")?
            .ok_or(ApiError::Unauthorized)?;
        let stored = user_from_model(stored)?;

        let email = email.unwrap_or(stored.email.as_str()).to_owned();
        let username = username.unwrap_or(stored.username.as_str()).to_owned();
        let conflicts = user_conflicts(&txn, Some(id), &email, &username).await?;
        let user = build(stored, conflicts)?;

        let mut am = user_active_model(&user);
        am.created_at = sea_orm::ActiveValue::NotSet;
        am.update(&txn)
            .await
            .map_err(|e| user_write_error(e, &user, "update user"))?;
        txn.commit().await.context("commit user update")?;
        Ok(user)
    }
}

async fn user_conflicts<C: ConnectionTrait>(
    conn: &C,
    exclude: Option<Uuid>,
    email: &str,
    username: &str,
) -> Result<UserConflicts, ApiError> {
    let mut query = users::Entity::find().filter(
        Condition::any()
            .add(users::Column::Email.eq(email))
            .add(users::Column::Username.eq(username)),
    );
    if let Some(id) = exclude {
        query = query.filter(users::Column::Id.ne(id));
    }
    let rows = query.all(conn).await.context("find conflicting users")?;
    Ok(UserConflicts {
        email_taken: rows.iter().any(|u| u.email == email),
        username_taken: rows.iter().any(|u| u.username == username),
    })
}

fn user_write_error(err: DbErr, user: &User, action: &'static str) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => user_unique_violation(&detail, user),
        _ => anyhow::Error::new(err).context(action).into(),
    }
}

/// Map a lost race on `users_email_key` / `users_username_key` back to the
/// field error the conflict lookup would have produced.
fn user_unique_violation(detail: &str, user: &User) -> ApiError {
    let conflicts = UserConflicts {
        email_taken: names_constraint(detail, USERS_EMAIL_KEY),
        username_taken: names_constraint(detail, USERS_USERNAME_KEY),
    };
    let errors = conflicts.errors(&user.email, &user.username);
    if errors.is_empty() {
        return anyhow::anyhow!("insert user: unexpected unique violation: {detail}").into();
    }
    ApiError::Validation(errors)
}

const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_USERNAME_KEY: &str = "users_username_key";
const MEDIA_URI_KEY: &str = "media_uri_key";

/// Postgres quotes the violated index name in the message.
fn names_constraint(detail: &str, constraint: &str) -> bool {
    detail.contains(&format!("\"{constraint}\""))
}

fn user_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        email: Set(user.email.clone()),
        username: Set(user.username.clone()),
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        role: Set(user.role.as_str().to_owned()),
        password_hash: Set(user.password_hash.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has invalid role", model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        role,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Medium repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMediumRepository {
    pub db: DatabaseConnection,
}

impl MediumRepository for DbMediumRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Medium>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = media::Entity::find()
            .filter(media::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find media by ids")?;
        Ok(models.into_iter().map(medium_from_model).collect())
    }

    async fn insert_checked<F>(&self, uri: &str, build: F) -> Result<Medium, ApiError>
    where
        F: FnOnce(MediumConflicts) -> Result<Medium, ValidationErrors> + Send,
    {
        let txn = self.db.begin().await.context("begin medium insert")?;
        let existing = media::Entity::find()
            .filter(media::Column::Uri.eq(uri))
            .one(&txn)
            .await
            .context("find medium by uri")?;
        let medium = build(MediumConflicts {
            uri_taken: existing.is_some(),
        })?;

        media::ActiveModel {
            id: Set(medium.id),
            user_id: Set(medium.user_id),
            uri: Set(medium.uri.clone()),
            file_type: Set(medium.file_type.clone()),
            permission: Set(medium.permission.clone()),
            x: Set(medium.x),
            y: Set(medium.y),
            created_at: Set(medium.created_at),
            updated_at: Set(medium.updated_at),
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                medium_unique_violation(&detail, &medium)
            }
            _ => anyhow::Error::new(e).context("insert medium").into(),
        })?;
        txn.commit().await.context("commit medium insert")?;
        Ok(medium)
    }
}

fn medium_unique_violation(detail: &str, medium: &Medium) -> ApiError {
    if !names_constraint(detail, MEDIA_URI_KEY) {
        return anyhow::anyhow!("insert medium: unexpected unique violation: {detail}").into();
    }
    ApiError::Validation(MediumConflicts { uri_taken: true }.errors(&medium.uri))
}

fn medium_from_model(model: media::Model) -> Medium {
    Medium {
        id: model.id,
        user_id: model.user_id,
        uri: model.uri,
        file_type: model.file_type,
        permission: model.permission,
        x: model.x,
        y: model.y,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError> {
        let edge = follows::Entity::find_by_id((follower_id, followed_id))
            .one(&self.db)
            .await
            .context("find follow edge")?;
        Ok(edge.is_some())
    }

    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError> {
        let inserted = follows::Entity::insert(follows::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
            created_at: Set(chrono::Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::FollowerId, follows::Column::FollowedId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert follow edge")?;
        Ok(inserted > 0)
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowedId.eq(followed_id))
            .exec(&self.db)
            .await
            .context("delete follow edge")?;
        Ok(result.rows_affected > 0)
    }
}
