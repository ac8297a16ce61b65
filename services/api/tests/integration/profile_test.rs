use rmuse_api::domain::credential::Password;
use rmuse_api::error::ApiError;
use rmuse_api::usecase::session::{LoginInput, LoginUseCase};
use rmuse_api::usecase::user::{UpdateProfileInput, UpdateProfileUseCase};
use rmuse_domain::user::UserRole;

use crate::helpers::{
    MockUserRepo, PASSWORD, credentials, keys, test_user, validation_messages,
};

fn update_usecase(users: MockUserRepo) -> UpdateProfileUseCase<MockUserRepo> {
    UpdateProfileUseCase {
        users,
        credentials: credentials(),
    }
}

#[tokio::test]
async fn should_update_given_fields_only() {
    let user = test_user("ada", UserRole::Follower).await;
    let users = MockUserRepo::new(vec![user.clone()]);

    let updated = update_usecase(users.clone())
        .execute(
            user.clone(),
            Password::new(PASSWORD),
            UpdateProfileInput {
                first_name: Some("Augusta".to_owned()),
                role: Some("artist".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.role, UserRole::Artist);
    assert_eq!(updated.last_name, user.last_name);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.created_at, user.created_at);
    assert_eq!(users.get(user.id).unwrap().first_name, "Augusta");
}

#[tokio::test]
async fn should_require_current_password() {
    let user = test_user("ada", UserRole::Follower).await;
    let users = MockUserRepo::new(vec![user.clone()]);

    let err = update_usecase(users.clone())
        .execute(
            user.clone(),
            Password::new("wrong"),
            UpdateProfileInput {
                username: Some("hacked".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(users.get(user.id).unwrap().username, "ada");
}

#[tokio::test]
async fn should_keep_own_email_and_username_without_conflict() {
    let user = test_user("ada", UserRole::Follower).await;
    let users = MockUserRepo::new(vec![user.clone()]);

    let updated = update_usecase(users)
        .execute(
            user.clone(),
            Password::new(PASSWORD),
            UpdateProfileInput {
                email: Some(user.email.to_uppercase()),
                username: Some(user.username.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, user.email);
}

#[tokio::test]
async fn should_reject_username_held_by_another_user() {
    let ada = test_user("ada", UserRole::Follower).await;
    let bob = test_user("bob", UserRole::Artist).await;
    let users = MockUserRepo::new(vec![ada.clone(), bob]);

    let err = update_usecase(users)
        .execute(
            ada,
            Password::new(PASSWORD),
            UpdateProfileInput {
                username: Some("bob".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(validation_messages(&err), vec!["username bob is already in use"]);
}

#[tokio::test]
async fn should_rehash_new_password() {
    let user = test_user("ada", UserRole::Follower).await;
    let users = MockUserRepo::new(vec![user.clone()]);

    update_usecase(users.clone())
        .execute(
            user.clone(),
            Password::new(PASSWORD),
            UpdateProfileInput {
                new_password: Some(Password::new("brand-new")),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let login = LoginUseCase {
        users,
        credentials: credentials(),
        keys: keys(),
    };
    let old = login
        .execute(LoginInput {
            email: user.email.clone(),
            password: Password::new(PASSWORD),
        })
        .await;
    let new = login
        .execute(LoginInput {
            email: user.email.clone(),
            password: Password::new("brand-new"),
        })
        .await;

    assert!(matches!(old, Err(ApiError::InvalidCredentials)));
    assert!(new.is_ok());
}

#[tokio::test]
async fn should_keep_both_updates_made_from_the_same_snapshot() {
    let user = test_user("ada", UserRole::Follower).await;
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = update_usecase(users.clone());

    // Both requests authenticated before either write landed.
    let (first, second) = tokio::join!(
        usecase.execute(
            user.clone(),
            Password::new(PASSWORD),
            UpdateProfileInput {
                first_name: Some("Augusta".to_owned()),
                ..Default::default()
            },
        ),
        usecase.execute(
            user.clone(),
            Password::new(PASSWORD),
            UpdateProfileInput {
                last_name: Some("King".to_owned()),
                ..Default::default()
            },
        ),
    );
    first.unwrap();
    second.unwrap();

    let stored = users.get(user.id).unwrap();
    assert_eq!(stored.first_name, "Augusta");
    assert_eq!(stored.last_name, "King");
}

#[tokio::test]
async fn should_reject_update_for_vanished_user() {
    let user = test_user("ada", UserRole::Follower).await;
    let users = MockUserRepo::empty();

    let err = update_usecase(users)
        .execute(
            user,
            Password::new(PASSWORD),
            UpdateProfileInput {
                first_name: Some("Augusta".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
}
