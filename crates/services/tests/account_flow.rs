use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use practice_core::model::{
    Credentials, EmailAddress, LoginDraft, Password, PasswordResetDraft, ProfileDraft,
    ProfileUpdate, Registration, RegistrationDraft, UserId,
};
use services::{
    Account, AccountError, AccountService, AuthGateway, AuthUser, AvatarUpload, GatewayError,
    UserProfile,
};

#[derive(Default)]
struct FakeGateway {
    user: Option<AuthUser>,
    reject_sign_in: Option<&'static str>,
    fail_profile_insert: bool,
    fail_avatar_upload: bool,
    uploads: Mutex<Vec<String>>,
    profiles: Mutex<Vec<UserProfile>>,
    verified: Mutex<Vec<(String, String)>>,
}

impl FakeGateway {
    fn with_user() -> Self {
        Self {
            user: Some(AuthUser {
                id: UserId::random(),
                email: "ada@example.com".into(),
                email_confirmed: true,
            }),
            ..Self::default()
        }
    }
}

#[async_trait]
impl AuthGateway for FakeGateway {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<Option<AuthUser>, GatewayError> {
        if let Some(message) = self.reject_sign_in {
            return Err(GatewayError::new(message));
        }
        Ok(self.user.clone())
    }

    async fn sign_up(&self, _registration: &Registration) -> Result<Option<AuthUser>, GatewayError> {
        Ok(self.user.clone())
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        Err(GatewayError::new("network down"))
    }

    async fn request_password_reset(&self, _email: &EmailAddress) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn update_password(&self, _password: &Password) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn resend_verification(&self, _email: &EmailAddress) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn verify_email(
        &self,
        token: &str,
        kind: &str,
    ) -> Result<Option<AuthUser>, GatewayError> {
        self.verified
            .lock()
            .unwrap()
            .push((token.to_string(), kind.to_string()));
        Ok(self.user.clone())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError> {
        Ok(self.user.clone())
    }

    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), GatewayError> {
        if self.fail_profile_insert {
            return Err(GatewayError::new("duplicate key"));
        }
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn fetch_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, GatewayError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == Some(user_id))
            .cloned())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, GatewayError> {
        Ok(UserProfile {
            user_id: Some(user_id),
            first_name: update.first_name.clone(),
            website: update.website.as_ref().map(ToString::to_string),
            avatar_url: update.avatar_url.clone(),
            ..UserProfile::default()
        })
    }

    async fn upload_avatar(
        &self,
        user_id: UserId,
        avatar: &AvatarUpload,
    ) -> Result<String, GatewayError> {
        if self.fail_avatar_upload {
            return Err(GatewayError::new("bucket not found"));
        }
        let path = avatar.object_path(user_id);
        self.uploads.lock().unwrap().push(path.clone());
        Ok(format!("https://cdn.example.com/{path}"))
    }
}

fn registration() -> RegistrationDraft {
    RegistrationDraft {
        email: "ada@example.com".into(),
        password: "Secret123".into(),
        confirm_password: "Secret123".into(),
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
    }
}

#[tokio::test]
async fn register_creates_profile_with_display_name() {
    let gateway = Arc::new(FakeGateway::with_user());
    let service = AccountService::new(gateway.clone());

    let notice = service.register(registration()).await.unwrap();
    assert_eq!(notice.message, "Please check your email to verify your account");

    let profiles = gateway.profiles.lock().unwrap().clone();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].display_name.as_deref(), Some("Ada Lovelace"));

    let account = service.current_account().await.unwrap().unwrap();
    assert_eq!(account.profile.unwrap().first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn profile_failure_does_not_fail_registration() {
    let gateway = FakeGateway {
        fail_profile_insert: true,
        ..FakeGateway::with_user()
    };
    let service = AccountService::new(Arc::new(gateway));
    assert!(service.register(registration()).await.is_ok());
}

#[tokio::test]
async fn registration_without_user_fails_with_message() {
    let service = AccountService::new(Arc::new(FakeGateway::default()));
    let err = service.register(registration()).await.unwrap_err();
    assert_eq!(err.message(), "Registration failed");
}

#[tokio::test]
async fn login_validates_before_calling_backend() {
    let service = AccountService::new(Arc::new(FakeGateway::with_user()));
    let err = service
        .login(LoginDraft {
            email: "not-an-email".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Please enter a valid email address");
}

#[tokio::test]
async fn login_surfaces_backend_message() {
    let gateway = FakeGateway {
        reject_sign_in: Some("Invalid login credentials"),
        ..FakeGateway::with_user()
    };
    let service = AccountService::new(Arc::new(gateway));
    let err = service
        .login(LoginDraft {
            email: "ada@example.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Remote(_)));
    assert_eq!(err.message(), "Invalid login credentials");
}

#[tokio::test]
async fn verification_link_is_parsed_and_forwarded() {
    let gateway = Arc::new(FakeGateway::with_user());
    let service = AccountService::new(gateway.clone());

    let notice = service
        .handle_verification_link("practice://auth/verify?token=t0k&type=signup")
        .await
        .unwrap();
    assert_eq!(notice.message, "Email verified successfully");
    assert_eq!(
        gateway.verified.lock().unwrap().as_slice(),
        &[("t0k".to_string(), "signup".to_string())]
    );

    let err = service
        .handle_verification_link("practice://auth/verify?type=signup")
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Invalid verification link");
}

#[tokio::test]
async fn reset_profile_and_logout() {
    let service = AccountService::new(Arc::new(FakeGateway::with_user()));

    let notice = service
        .reset_password(PasswordResetDraft {
            email: "ada@example.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(
        notice.message,
        "Password reset email sent. Please check your inbox."
    );

    let profile = service
        .update_profile(
            &account_with_avatar(None),
            ProfileDraft {
                first_name: Some("Ada".into()),
                website: Some("https://ada.example.com".into()),
                ..ProfileDraft::default()
            },
            None,
        )
        .await
        .unwrap()
        .value;
    assert_eq!(profile.website.as_deref(), Some("https://ada.example.com/"));

    // sign-out errors are swallowed
    service.logout().await;
}

fn account_with_avatar(avatar_url: Option<&str>) -> Account {
    let id = UserId::random();
    Account {
        user: AuthUser {
            id,
            email: "ada@example.com".into(),
            email_confirmed: true,
        },
        profile: Some(UserProfile {
            user_id: Some(id),
            avatar_url: avatar_url.map(str::to_string),
            ..UserProfile::default()
        }),
    }
}

#[tokio::test]
async fn new_avatar_is_uploaded_and_linked() {
    let gateway = Arc::new(FakeGateway::with_user());
    let service = AccountService::new(gateway.clone());
    let account = account_with_avatar(Some("https://cdn.example.com/old.png"));

    let notice = service
        .update_profile(
            &account,
            ProfileDraft::default(),
            Some(AvatarUpload::new(vec![1, 2, 3], ".JPG")),
        )
        .await
        .unwrap();

    let path = format!("avatars/{}.jpg", account.user.id);
    assert_eq!(gateway.uploads.lock().unwrap().as_slice(), &[path.clone()]);
    assert_eq!(
        notice.value.avatar_url,
        Some(format!("https://cdn.example.com/{path}"))
    );
    assert_eq!(notice.message, "Your profile has been successfully updated.");
}

#[tokio::test]
async fn failed_avatar_upload_keeps_current_avatar() {
    let gateway = FakeGateway {
        fail_avatar_upload: true,
        ..FakeGateway::with_user()
    };
    let service = AccountService::new(Arc::new(gateway));
    let account = account_with_avatar(Some("https://cdn.example.com/old.png"));

    let profile = service
        .update_profile(
            &account,
            ProfileDraft {
                first_name: Some("Ada".into()),
                ..ProfileDraft::default()
            },
            Some(AvatarUpload::new(vec![0xff], "png")),
        )
        .await
        .unwrap()
        .value;
    assert_eq!(
        profile.avatar_url.as_deref(),
        Some("https://cdn.example.com/old.png")
    );
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn profile_edit_without_new_avatar_keeps_current_one() {
    let gateway = Arc::new(FakeGateway::with_user());
    let service = AccountService::new(gateway.clone());
    let account = account_with_avatar(Some("https://cdn.example.com/old.png"));

    let profile = service
        .update_profile(&account, ProfileDraft::default(), None)
        .await
        .unwrap()
        .value;
    assert!(gateway.uploads.lock().unwrap().is_empty());
    assert_eq!(
        profile.avatar_url.as_deref(),
        Some("https://cdn.example.com/old.png")
    );
}
