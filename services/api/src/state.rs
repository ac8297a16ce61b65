use std::sync::Arc;

use sea_orm::DatabaseConnection;

use rmuse_auth_types::key::KeySource;

use crate::domain::credential::Credentials;
use crate::infra::db::{DbFollowRepository, DbMediumRepository, DbUserRepository};
use crate::usecase::session::AuthenticateUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub keys: KeySource,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn medium_repo(&self) -> DbMediumRepository {
        DbMediumRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn authenticate(&self) -> AuthenticateUseCase<DbUserRepository> {
        AuthenticateUseCase {
            users: self.user_repo(),
            keys: self.keys.clone(),
        }
    }
}
