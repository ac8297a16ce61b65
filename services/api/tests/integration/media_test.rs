use rmuse_api::domain::types::{Medium, User};
use rmuse_api::error::ApiError;
use rmuse_api::usecase::media::{FetchMediaUseCase, UploadMediumInput, UploadMediumUseCase};
use rmuse_domain::user::UserRole;
use uuid::Uuid;

use crate::helpers::{
    MockFollowRepo, MockMediumRepo, test_medium, test_user, validation_fields, validation_messages,
};

fn upload(uri: &str, permission: Option<&str>) -> UploadMediumInput {
    UploadMediumInput {
        uri: uri.to_owned(),
        file_type: "image/jpeg".to_owned(),
        permission: permission.map(str::to_owned),
        x: 10,
        y: 20,
    }
}

// ── UploadMediumUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_upload_as_artist_with_public_default() {
    let artist = test_user("ada", UserRole::Artist).await;
    let media = MockMediumRepo::empty();
    let usecase = UploadMediumUseCase {
        media: media.clone(),
    };

    let medium = usecase
        .execute(&artist, upload("s3://bucket/one.jpg", None))
        .await
        .unwrap();

    assert_eq!(medium.user_id, artist.id);
    assert_eq!(medium.permission, "public");
    assert_eq!((medium.x, medium.y), (10, 20));
    assert_eq!(media.count(), 1);
}

#[tokio::test]
async fn should_forbid_follower_role_upload() {
    let follower = test_user("bob", UserRole::Follower).await;
    let media = MockMediumRepo::empty();
    let usecase = UploadMediumUseCase {
        media: media.clone(),
    };

    let err = usecase
        .execute(&follower, upload("s3://bucket/one.jpg", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ArtistRequired));
    assert_eq!(err.to_string(), "must be artist to upload media");
    assert_eq!(media.count(), 0);
}

#[tokio::test]
async fn should_reject_duplicate_uri() {
    let artist = test_user("ada", UserRole::Artist).await;
    let usecase = UploadMediumUseCase {
        media: MockMediumRepo::new(vec![test_medium(artist.id, "s3://bucket/one.jpg", "public")]),
    };

    let err = usecase
        .execute(&artist, upload("s3://bucket/one.jpg", Some("follower")))
        .await
        .unwrap_err();

    assert_eq!(
        validation_messages(&err),
        vec!["there is already a file with URI s3://bucket/one.jpg"]
    );
}

#[tokio::test]
async fn should_reject_unknown_permission_and_empty_fields() {
    let artist = test_user("ada", UserRole::Artist).await;
    let usecase = UploadMediumUseCase {
        media: MockMediumRepo::empty(),
    };

    let mut input = upload("", Some("private"));
    input.file_type = String::new();
    let err = usecase.execute(&artist, input).await.unwrap_err();

    assert_eq!(validation_fields(&err), vec!["uri", "type", "permission"]);
}

// ── FetchMediaUseCase ────────────────────────────────────────────────────────

struct World {
    owner: User,
    fan: User,
    stranger: User,
    public: Medium,
    followers_only: Medium,
    unknown_tier: Medium,
    usecase: FetchMediaUseCase<MockMediumRepo, MockFollowRepo>,
}

async fn world() -> World {
    let owner = test_user("owner", UserRole::Artist).await;
    let fan = test_user("fan", UserRole::Follower).await;
    let stranger = test_user("stranger", UserRole::Follower).await;
    let public = test_medium(owner.id, "s3://b/public.png", "public");
    let followers_only = test_medium(owner.id, "s3://b/followers.png", "follower");
    let unknown_tier = test_medium(owner.id, "s3://b/private.png", "private");

    let usecase = FetchMediaUseCase {
        media: MockMediumRepo::new(vec![
            public.clone(),
            followers_only.clone(),
            unknown_tier.clone(),
        ]),
        follows: MockFollowRepo::new(&[(fan.id, owner.id)]),
    };
    World {
        owner,
        fan,
        stranger,
        public,
        followers_only,
        unknown_tier,
        usecase,
    }
}

fn ids(media: &[&Medium]) -> Vec<String> {
    media.iter().map(|m| m.id.to_string()).collect()
}

#[tokio::test]
async fn should_return_empty_list_when_no_ids_requested() {
    let w = world().await;
    let media = w.usecase.execute(None, &[]).await.unwrap();
    assert!(media.is_empty());
}

#[tokio::test]
async fn should_show_public_medium_to_everyone() {
    let w = world().await;
    let requested = ids(&[&w.public]);

    for requester in [None, Some(&w.owner), Some(&w.fan), Some(&w.stranger)] {
        let media = w.usecase.execute(requester, &requested).await.unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].id, w.public.id);
    }
}

#[tokio::test]
async fn should_show_follower_medium_to_owner_and_followers_only() {
    let w = world().await;
    let requested = ids(&[&w.followers_only]);

    assert_eq!(
        w.usecase.execute(Some(&w.owner), &requested).await.unwrap()[0].id,
        w.followers_only.id
    );
    assert_eq!(
        w.usecase.execute(Some(&w.fan), &requested).await.unwrap()[0].id,
        w.followers_only.id
    );
    assert!(matches!(
        w.usecase.execute(None, &requested).await,
        Err(ApiError::Unauthorized)
    ));
    assert!(matches!(
        w.usecase.execute(Some(&w.stranger), &requested).await,
        Err(ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn should_deny_unrecognised_tier_even_to_owner() {
    let w = world().await;
    let requested = ids(&[&w.unknown_tier]);

    assert!(matches!(
        w.usecase.execute(Some(&w.owner), &requested).await,
        Err(ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn should_filter_mixed_request_in_request_order() {
    let w = world().await;
    let mut requested = ids(&[&w.followers_only, &w.unknown_tier, &w.public]);
    requested.push("not-a-uuid".to_owned());
    requested.push(Uuid::now_v7().to_string());
    requested.push(w.public.id.to_string());

    let media = w.usecase.execute(Some(&w.stranger), &requested).await.unwrap();
    assert_eq!(media.iter().map(|m| m.id).collect::<Vec<_>>(), vec![w.public.id]);

    let media = w.usecase.execute(Some(&w.fan), &requested).await.unwrap();
    assert_eq!(
        media.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![w.followers_only.id, w.public.id]
    );
}

#[tokio::test]
async fn should_not_distinguish_missing_from_unreadable() {
    let w = world().await;

    let missing = w
        .usecase
        .execute(None, &[Uuid::now_v7().to_string()])
        .await
        .unwrap_err();
    let malformed = w
        .usecase
        .execute(None, &["garbage".to_owned()])
        .await
        .unwrap_err();
    let unreadable = w
        .usecase
        .execute(None, &ids(&[&w.followers_only]))
        .await
        .unwrap_err();

    for err in [missing, malformed, unreadable] {
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
