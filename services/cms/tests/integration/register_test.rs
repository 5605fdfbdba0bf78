use folio_domain::field_errors::FieldErrors;

use folio_cms::domain::password::{ENTIRELY_NUMERIC, TOO_COMMON, TOO_SHORT, verify_password};
use folio_cms::domain::types::{BLANK, INVALID_BOOLEAN, INVALID_EMAIL, REQUIRED};
use folio_cms::error::CmsServiceError;
use folio_cms::usecase::register::{EMAIL_TAKEN, RegisterInput, RegisterUseCase, USERNAME_TAKEN};

use crate::helpers::{MockUserRepo, TEST_PASSWORD, author};

fn valid_input() -> RegisterInput {
    RegisterInput {
        email: Some("author@example.com".to_owned()),
        username: Some("author".to_owned()),
        password: Some(TEST_PASSWORD.to_owned()),
        phone: Some("1234567890".to_owned()),
        pincode: Some("123456".to_owned()),
        address: Some("Some Address".to_owned()),
        city: Some("Some City".to_owned()),
        state: Some("Some State".to_owned()),
        country: Some("Some Country".to_owned()),
        is_admin: None,
    }
}

fn field_errors(result: Result<impl std::fmt::Debug, CmsServiceError>) -> FieldErrors {
    match result {
        Err(CmsServiceError::Validation(errors)) => errors,
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_register_user_with_hashed_password() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let uc = RegisterUseCase { users: repo };

    let user = uc.execute(valid_input()).await.unwrap();

    assert_eq!(user.email, "author@example.com");
    assert_eq!(user.username, "author");
    assert!(!user.is_admin, "is_admin defaults to false");
    assert_ne!(user.password_hash, TEST_PASSWORD);
    assert!(verify_password(TEST_PASSWORD, &user.password_hash).unwrap());
    assert_eq!(users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_register_admin_when_requested() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let user = uc
        .execute(RegisterInput {
            is_admin: Some("true".to_owned()),
            ..valid_input()
        })
        .await
        .unwrap();
    assert!(user.is_admin);
}

#[tokio::test]
async fn should_accept_missing_optional_address_fields() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let user = uc
        .execute(RegisterInput {
            address: None,
            city: None,
            state: None,
            country: None,
            ..valid_input()
        })
        .await
        .unwrap();
    assert_eq!(user.city, None);
}

#[tokio::test]
async fn should_lowercase_email_domain() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let user = uc
        .execute(RegisterInput {
            email: Some("Author@Example.COM".to_owned()),
            ..valid_input()
        })
        .await
        .unwrap();
    assert_eq!(user.email, "Author@example.com");
}

#[tokio::test]
async fn should_report_every_missing_required_field() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let uc = RegisterUseCase { users: repo };

    let errors = field_errors(uc.execute(RegisterInput::default()).await);

    for field in ["email", "username", "password", "phone", "pincode"] {
        assert_eq!(errors.messages(field), [REQUIRED], "field {field}");
    }
    assert!(!errors.contains("address"));
    assert!(users.lock().unwrap().is_empty(), "nothing is persisted");
}

#[tokio::test]
async fn should_reject_blank_required_fields() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let errors = field_errors(
        uc.execute(RegisterInput {
            phone: Some("   ".to_owned()),
            ..valid_input()
        })
        .await,
    );
    assert_eq!(errors.messages("phone"), [BLANK]);
}

#[tokio::test]
async fn should_reject_invalid_email() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let errors = field_errors(
        uc.execute(RegisterInput {
            email: Some("not-an-email".to_owned()),
            ..valid_input()
        })
        .await,
    );
    assert_eq!(errors.messages("email"), [INVALID_EMAIL]);
}

#[tokio::test]
async fn should_reject_overlong_phone_and_pincode() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let errors = field_errors(
        uc.execute(RegisterInput {
            phone: Some("12345678901".to_owned()),
            pincode: Some("1234567".to_owned()),
            ..valid_input()
        })
        .await,
    );
    assert!(errors.contains("phone"));
    assert!(errors.contains("pincode"));
}

#[tokio::test]
async fn should_reject_weak_password_with_every_reason() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let errors = field_errors(
        uc.execute(RegisterInput {
            password: Some("123456".to_owned()),
            ..valid_input()
        })
        .await,
    );
    let messages = errors.messages("password");
    assert!(messages.iter().any(|m| m == TOO_SHORT));
    assert!(messages.iter().any(|m| m == TOO_COMMON));
    assert!(messages.iter().any(|m| m == ENTIRELY_NUMERIC));
}

#[tokio::test]
async fn should_reject_duplicate_email_and_username() {
    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![author()]),
    };
    let errors = field_errors(uc.execute(valid_input()).await);
    assert_eq!(errors.messages("email"), [EMAIL_TAKEN]);
    assert_eq!(errors.messages("username"), [USERNAME_TAKEN]);
}

#[tokio::test]
async fn should_report_non_boolean_admin_flag_with_other_errors() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let uc = RegisterUseCase { users: repo };

    let errors = field_errors(
        uc.execute(RegisterInput {
            is_admin: Some("{\"nested\":true}".to_owned()),
            phone: None,
            ..valid_input()
        })
        .await,
    );

    assert_eq!(errors.messages("is_admin"), [INVALID_BOOLEAN]);
    assert_eq!(errors.messages("phone"), [REQUIRED]);
    assert!(users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_accept_digits_sent_as_numbers() {
    // Numeric JSON values arrive as their text form.
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };
    let user = uc
        .execute(RegisterInput {
            phone: Some(serde_json::json!(1234567890).to_string()),
            pincode: Some(serde_json::json!(123456).to_string()),
            is_admin: Some(serde_json::json!(false).to_string()),
            ..valid_input()
        })
        .await
        .unwrap();
    assert_eq!(user.phone, "1234567890");
    assert_eq!(user.pincode, "123456");
    assert!(!user.is_admin);
}
