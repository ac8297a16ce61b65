use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{FollowRepository, MediumRepository};
use crate::domain::types::{Medium, User};
use crate::domain::validation::validate_medium;
use crate::domain::visibility::can_read;
use crate::error::ApiError;

// ── UploadMedium ─────────────────────────────────────────────────────────────

pub struct UploadMediumInput {
    pub uri: String,
    pub file_type: String,
    pub permission: Option<String>,
    pub x: i32,
    pub y: i32,
}

pub struct UploadMediumUseCase<M: MediumRepository> {
    pub media: M,
}

impl<M: MediumRepository> UploadMediumUseCase<M> {
    pub async fn execute(
        &self,
        uploader: &User,
        input: UploadMediumInput,
    ) -> Result<Medium, ApiError> {
        if !uploader.role.can_upload() {
            return Err(ApiError::ArtistRequired);
        }

        let uri = input.uri;
        let medium = self
            .media
            .insert_checked(&uri, |conflicts| {
                let tier = validate_medium(
                    &uri,
                    &input.file_type,
                    input.permission.as_deref(),
                    conflicts,
                )?;
                let now = Utc::now();
                Ok(Medium {
                    id: Uuid::now_v7(),
                    user_id: uploader.id,
                    uri: uri.clone(),
                    file_type: input.file_type,
                    permission: tier.as_str().to_owned(),
                    x: input.x,
                    y: input.y,
                    created_at: now,
                    updated_at: now,
                })
            })
            .await?;

        tracing::info!(medium_id = %medium.id, user_id = %uploader.id, "medium uploaded");
        Ok(medium)
    }
}

// ── FetchMedia ───────────────────────────────────────────────────────────────

pub struct FetchMediaUseCase<M: MediumRepository, F: FollowRepository> {
    pub media: M,
    pub follows: F,
}

impl<M: MediumRepository, F: FollowRepository> FetchMediaUseCase<M, F> {
    /// Return the readable media among `ids`, in request order.
    ///
    /// Malformed, duplicate, missing, and unreadable IDs are dropped without
    /// distinction. If IDs were requested but none survive, the result is
    /// [`ApiError::Unauthorized`]; an empty request yields an empty list.
    pub async fn execute(
        &self,
        requester: Option<&User>,
        ids: &[String],
    ) -> Result<Vec<Medium>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut seen = HashSet::new();
        let wanted: Vec<Uuid> = ids
            .iter()
            .filter_map(|raw| raw.trim().parse::<Uuid>().ok())
            .filter(|id| seen.insert(*id))
            .collect();

        let mut found = self.media.find_by_ids(&wanted).await?;
        found.sort_by_key(|m| wanted.iter().position(|id| *id == m.id));

        let mut readable = Vec::with_capacity(found.len());
        for medium in found {
            if can_read(&self.follows, requester, &medium).await? {
                readable.push(medium);
            }
        }

        if readable.is_empty() {
            return Err(ApiError::Unauthorized);
        }
        Ok(readable)
    }
}
