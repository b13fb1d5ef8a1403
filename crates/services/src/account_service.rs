use std::sync::Arc;

use async_trait::async_trait;

use practice_core::model::{
    Credentials, EmailAddress, LoginDraft, Password, PasswordResetDraft, PasswordUpdateDraft,
    ProfileDraft, ProfileUpdate, Registration, RegistrationDraft, UserId, VerificationLink,
};

use crate::error::{AccountError, GatewayError};

//
// ─── BACKEND TYPES ─────────────────────────────────────────────────────────────
//

/// Signed-in user as reported by the authentication backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub email_confirmed: bool,
}

/// Profile record stored next to the account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: Option<UserId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl UserProfile {
    /// The profile created right after sign-up.
    #[must_use]
    pub fn for_registration(user_id: UserId, registration: &Registration) -> Self {
        Self {
            user_id: Some(user_id),
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            display_name: registration.display_name(),
            ..Self::default()
        }
    }
}

/// Avatar image picked by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub bytes: Vec<u8>,
    /// File extension without the leading dot, lowercased.
    pub extension: String,
}

impl AvatarUpload {
    #[must_use]
    pub fn new(bytes: Vec<u8>, extension: &str) -> Self {
        Self {
            bytes,
            extension: extension.trim().trim_start_matches('.').to_ascii_lowercase(),
        }
    }

    /// Object path in the avatar bucket. One object per user, overwritten on
    /// each upload.
    #[must_use]
    pub fn object_path(&self, user_id: UserId) -> String {
        format!("avatars/{user_id}.{}", self.extension)
    }
}

/// The external authentication and profile backend.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<AuthUser>, GatewayError>;
    async fn sign_up(&self, registration: &Registration) -> Result<Option<AuthUser>, GatewayError>;
    async fn sign_out(&self) -> Result<(), GatewayError>;
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), GatewayError>;
    async fn update_password(&self, password: &Password) -> Result<(), GatewayError>;
    async fn resend_verification(&self, email: &EmailAddress) -> Result<(), GatewayError>;
    async fn verify_email(
        &self,
        token: &str,
        kind: &str,
    ) -> Result<Option<AuthUser>, GatewayError>;
    async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError>;
    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), GatewayError>;
    async fn fetch_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, GatewayError>;
    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, GatewayError>;
    /// Store the image at `avatar.object_path(user_id)`, replacing any previous
    /// one, and return its public URL.
    async fn upload_avatar(
        &self,
        user_id: UserId,
        avatar: &AvatarUpload,
    ) -> Result<String, GatewayError>;
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// A signed-in account with its profile, if one could be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
}

/// Successful account operation with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNotice<T> {
    pub value: T,
    pub message: &'static str,
}

impl<T> AccountNotice<T> {
    fn new(value: T, message: &'static str) -> Self {
        Self { value, message }
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Validates account forms and drives the authentication backend.
///
/// Backend failures are never retried; they surface as `AccountError` with
/// the backend's own message.
#[derive(Clone)]
pub struct AccountService {
    gateway: Arc<dyn AuthGateway>,
}

impl AccountService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// The current account, if the backend has a live session.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Remote` if the session cannot be read.
    pub async fn current_account(&self) -> Result<Option<Account>, AccountError> {
        let Some(user) = self.gateway.current_user().await? else {
            return Ok(None);
        };
        Ok(Some(self.with_profile(user).await))
    }

    /// # Errors
    ///
    /// Returns validation errors, the backend's message, or `Login failed`.
    pub async fn login(&self, draft: LoginDraft) -> Result<Account, AccountError> {
        let credentials = draft.validate()?;
        let user = self
            .gateway
            .sign_in(&credentials)
            .await?
            .ok_or(AccountError::Failed("Login failed"))?;
        tracing::info!(user_id = %user.id, "signed in");
        Ok(self.with_profile(user).await)
    }

    /// Create the account and its profile record.
    ///
    /// A failure to create the profile is logged and does not fail registration.
    ///
    /// # Errors
    ///
    /// Returns validation errors, the backend's message, or `Registration failed`.
    pub async fn register(
        &self,
        draft: RegistrationDraft,
    ) -> Result<AccountNotice<AuthUser>, AccountError> {
        let registration = draft.validate()?;
        let user = self
            .gateway
            .sign_up(&registration)
            .await?
            .ok_or(AccountError::Failed("Registration failed"))?;

        let profile = UserProfile::for_registration(user.id, &registration);
        if let Err(err) = self.gateway.insert_profile(&profile).await {
            tracing::warn!(user_id = %user.id, error = %err, "profile creation failed");
        }

        tracing::info!(user_id = %user.id, "registered");
        Ok(AccountNotice::new(
            user,
            "Please check your email to verify your account",
        ))
    }

    /// Sign out. Backend errors are logged and otherwise ignored.
    pub async fn logout(&self) {
        if let Err(err) = self.gateway.sign_out().await {
            tracing::error!(error = %err, "sign out failed");
        }
    }

    /// # Errors
    ///
    /// Returns validation errors or the backend's message.
    pub async fn reset_password(
        &self,
        draft: PasswordResetDraft,
    ) -> Result<AccountNotice<()>, AccountError> {
        let email = draft.validate()?;
        self.gateway.request_password_reset(&email).await?;
        Ok(AccountNotice::new(
            (),
            "Password reset email sent. Please check your inbox.",
        ))
    }

    /// # Errors
    ///
    /// Returns validation errors or the backend's message.
    pub async fn update_password(
        &self,
        draft: PasswordUpdateDraft,
    ) -> Result<AccountNotice<()>, AccountError> {
        let password = draft.validate()?;
        self.gateway.update_password(&password).await?;
        Ok(AccountNotice::new((), "Password updated successfully"))
    }

    /// # Errors
    ///
    /// Returns validation errors or the backend's message.
    pub async fn resend_verification(
        &self,
        email: &str,
    ) -> Result<AccountNotice<()>, AccountError> {
        let email = EmailAddress::parse(email)?;
        self.gateway.resend_verification(&email).await?;
        Ok(AccountNotice::new((), "Verification email sent successfully"))
    }

    /// # Errors
    ///
    /// Returns the backend's message or `Email verification failed`.
    pub async fn verify_email(
        &self,
        token: &str,
        kind: &str,
    ) -> Result<AccountNotice<Account>, AccountError> {
        let user = self
            .gateway
            .verify_email(token, kind)
            .await?
            .ok_or(AccountError::Failed("Email verification failed"))?;
        let account = self.with_profile(user).await;
        Ok(AccountNotice::new(account, "Email verified successfully"))
    }

    /// Verify using the token and type carried by a deep link.
    ///
    /// # Errors
    ///
    /// Returns `Invalid verification link` when the link lacks either
    /// parameter, otherwise as `verify_email`.
    pub async fn handle_verification_link(
        &self,
        link: &str,
    ) -> Result<AccountNotice<Account>, AccountError> {
        let link = VerificationLink::parse(link)?;
        self.verify_email(&link.token, &link.kind).await
    }

    /// Save profile edits for `account`, uploading a newly picked avatar first.
    ///
    /// A failed upload is logged and the profile keeps its current avatar.
    ///
    /// # Errors
    ///
    /// Returns validation errors or the backend's message.
    pub async fn update_profile(
        &self,
        account: &Account,
        draft: ProfileDraft,
        avatar: Option<AvatarUpload>,
    ) -> Result<AccountNotice<UserProfile>, AccountError> {
        let mut update = draft.validate()?;
        let user_id = account.user.id;

        update.avatar_url = account
            .profile
            .as_ref()
            .and_then(|profile| profile.avatar_url.clone());
        if let Some(avatar) = avatar {
            match self.gateway.upload_avatar(user_id, &avatar).await {
                Ok(url) => update.avatar_url = Some(url),
                Err(err) => {
                    tracing::error!(%user_id, error = %err, "avatar upload failed");
                }
            }
        }

        let profile = self.gateway.update_profile(user_id, &update).await?;
        Ok(AccountNotice::new(
            profile,
            "Your profile has been successfully updated.",
        ))
    }

    async fn with_profile(&self, user: AuthUser) -> Account {
        let profile = match self.gateway.fetch_profile(user.id).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::error!(user_id = %user.id, error = %err, "profile load failed");
                None
            }
        };
        Account { user, profile }
    }
}
