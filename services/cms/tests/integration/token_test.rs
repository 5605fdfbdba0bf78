use uuid::Uuid;

use folio_auth_types::token::{validate_access_token, validate_refresh_token};
use folio_cms::domain::types::{BLANK, REQUIRED};
use folio_cms::error::CmsServiceError;
use folio_cms::usecase::token::{
    AuthenticateUseCase, LoginInput, LoginUseCase, RefreshTokenUseCase,
};
use folio_testing::auth::MockAuth;

use crate::helpers::{
    MockUserRepo, TEST_PASSWORD, TEST_SECRET, admin, author, jwt_settings,
};

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_pair_for_valid_credentials() {
    let user = author();
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt: jwt_settings(),
    };

    let pair = uc
        .execute(LoginInput {
            email: Some(user.email.clone()),
            password: Some(TEST_PASSWORD.to_owned()),
        })
        .await
        .unwrap();

    let access = validate_access_token(&pair.access, TEST_SECRET).unwrap();
    let refresh = validate_refresh_token(&pair.refresh, TEST_SECRET).unwrap();
    assert_eq!(access.user_id, user.id);
    assert_eq!(refresh.user_id, user.id);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let user = author();
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt: jwt_settings(),
    };
    let result = uc
        .execute(LoginInput {
            email: Some(user.email.clone()),
            password: Some("Wrong@123".to_owned()),
        })
        .await;
    assert!(
        matches!(result, Err(CmsServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_email_like_wrong_password() {
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![author()]),
        jwt: jwt_settings(),
    };
    let result = uc
        .execute(LoginInput {
            email: Some("nobody@example.com".to_owned()),
            password: Some(TEST_PASSWORD.to_owned()),
        })
        .await;
    assert!(matches!(result, Err(CmsServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_require_login_fields() {
    let uc = LoginUseCase {
        users: MockUserRepo::empty(),
        jwt: jwt_settings(),
    };
    let result = uc
        .execute(LoginInput {
            email: None,
            password: Some(String::new()),
        })
        .await;
    match result {
        Err(CmsServiceError::Validation(errors)) => {
            assert_eq!(errors.messages("email"), [REQUIRED]);
            assert_eq!(errors.messages("password"), [BLANK]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_exchange_refresh_token_for_access_token() {
    let user = author();
    let auth = MockAuth::new(user.id, TEST_SECRET);
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt: jwt_settings(),
    };

    let access = uc.execute(Some(&auth.refresh_token())).await.unwrap();

    let info = validate_access_token(&access, TEST_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
}

#[tokio::test]
async fn should_not_accept_access_token_as_refresh_token() {
    let user = author();
    let auth = MockAuth::new(user.id, TEST_SECRET);
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt: jwt_settings(),
    };
    let result = uc.execute(Some(&auth.access_token())).await;
    assert!(matches!(result, Err(CmsServiceError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_reject_refresh_token_for_deleted_user() {
    let auth = MockAuth::new(Uuid::now_v7(), TEST_SECRET);
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        jwt: jwt_settings(),
    };
    let result = uc.execute(Some(&auth.refresh_token())).await;
    assert!(matches!(result, Err(CmsServiceError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_reject_refresh_token_signed_with_other_secret() {
    let user = author();
    let auth = MockAuth::new(user.id, "other-secret");
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt: jwt_settings(),
    };
    let result = uc.execute(Some(&auth.refresh_token())).await;
    assert!(matches!(result, Err(CmsServiceError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_require_refresh_field() {
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        jwt: jwt_settings(),
    };
    match uc.execute(None).await {
        Err(CmsServiceError::Validation(errors)) => {
            assert_eq!(errors.messages("refresh"), [REQUIRED]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_authenticate_bearer_access_token() {
    let user = admin();
    let auth = MockAuth::new(user.id, TEST_SECRET);
    let uc = AuthenticateUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_SECRET.to_owned(),
    };

    let caller = uc.execute(Some(&auth.access_token())).await.unwrap();

    assert_eq!(caller.id, user.id);
    assert_eq!(caller.email, user.email);
    assert!(caller.is_admin, "admin flag comes from the stored user");
}

#[tokio::test]
async fn should_reject_missing_or_refresh_bearer() {
    let user = author();
    let auth = MockAuth::new(user.id, TEST_SECRET);
    let uc = AuthenticateUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_SECRET.to_owned(),
    };

    assert!(matches!(uc.execute(None).await, Err(CmsServiceError::InvalidToken)));
    assert!(matches!(
        uc.execute(Some(&auth.refresh_token())).await,
        Err(CmsServiceError::InvalidToken)
    ));
    assert!(matches!(
        uc.execute(Some("garbage")).await,
        Err(CmsServiceError::InvalidToken)
    ));
}
