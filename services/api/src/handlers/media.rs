use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::Medium;
use crate::error::ApiError;
use crate::extract::{CurrentUser, MaybeUser};
use crate::state::AppState;
use crate::usecase::media::{FetchMediaUseCase, UploadMediumInput, UploadMediumUseCase};

#[derive(Serialize)]
pub struct MediumResponse {
    pub id: String,
    pub userid: String,
    pub uri: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub permission: String,
    pub x: i32,
    pub y: i32,
    #[serde(serialize_with = "rmuse_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "rmuse_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Medium> for MediumResponse {
    fn from(medium: Medium) -> Self {
        Self {
            id: medium.id.to_string(),
            userid: medium.user_id.to_string(),
            uri: medium.uri,
            file_type: medium.file_type,
            permission: medium.permission,
            x: medium.x,
            y: medium.y,
            created_at: medium.created_at,
            updated_at: medium.updated_at,
        }
    }
}

// ── POST /api/1/media ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UploadMediumRequest {
    #[serde(default)]
    pub uri: String,
    #[serde(default, rename = "type")]
    pub file_type: String,
    pub permission: Option<String>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

pub async fn upload_medium(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UploadMediumRequest>,
) -> Result<(StatusCode, Json<MediumResponse>), ApiError> {
    let usecase = UploadMediumUseCase {
        media: state.medium_repo(),
    };
    let medium = usecase
        .execute(
            &user,
            UploadMediumInput {
                uri: body.uri,
                file_type: body.file_type,
                permission: body.permission,
                x: body.x,
                y: body.y,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(medium.into())))
}

// ── GET /api/1/media?id=..&id=.. ─────────────────────────────────────────────

/// Collect every `id` / `id[]` value, in order.
pub fn requested_ids(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return vec![];
    };
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "id" || key == "id[]")
        .map(|(_, value)| value.into_owned())
        .collect()
}

pub async fn get_media(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<MediumResponse>>, ApiError> {
    let ids = requested_ids(query.as_deref());
    let usecase = FetchMediaUseCase {
        media: state.medium_repo(),
        follows: state.follow_repo(),
    };
    let media = usecase.execute(user.as_ref(), &ids).await?;
    Ok(Json(media.into_iter().map(MediumResponse::from).collect()))
}
