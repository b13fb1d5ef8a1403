use std::fmt;

use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Validation failures for account forms. Messages are shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccountValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("New password is required")]
    NewPasswordRequired,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number"
    )]
    WeakPassword,

    #[error("Please confirm your password")]
    ConfirmationRequired,

    #[error("Please confirm your new password")]
    NewPasswordConfirmationRequired,

    #[error("Passwords must match")]
    PasswordMismatch,

    #[error("{field} must be at least {MIN_NAME_CHARS} characters")]
    NameTooShort { field: &'static str },

    #[error("Bio must be less than {MAX_BIO_CHARS} characters")]
    BioTooLong,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Please enter a valid website URL")]
    InvalidWebsite,

    #[error("Invalid verification link")]
    InvalidVerificationLink,
}

const LOGIN_PASSWORD_MIN_CHARS: usize = 6;
const STRONG_PASSWORD_MIN_CHARS: usize = 8;
const MIN_NAME_CHARS: usize = 2;
const MAX_BIO_CHARS: usize = 500;
const MAX_PHONE_DIGITS: usize = 16;

//
// ─── VALIDATED VALUES ──────────────────────────────────────────────────────────
//

/// A syntactically valid, trimmed email address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and trim an email address.
    ///
    /// # Errors
    ///
    /// Returns `EmailRequired` for blank input and `InvalidEmail` when the
    /// address lacks a local part, an `@`, or a dotted domain.
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmailRequired);
        }
        if !looks_like_email(trimmed) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmailAddress({})", self.0)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A password that passed the form rules. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub credentials: Credentials,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Registration {
    /// `"first last"` when a first name was given.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref()?;
        let full = format!("{first} {}", self.last_name.as_deref().unwrap_or(""));
        Some(full.trim().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub website: Option<Url>,
    /// Public URL of the avatar image. Filled in by the account service.
    pub avatar_url: Option<String>,
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(self) -> Result<Credentials, AccountValidationError> {
        let email = EmailAddress::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(AccountValidationError::PasswordRequired);
        }
        if self.password.chars().count() < LOGIN_PASSWORD_MIN_CHARS {
            return Err(AccountValidationError::PasswordTooShort {
                min: LOGIN_PASSWORD_MIN_CHARS,
            });
        }
        Ok(Credentials {
            email,
            password: Password(self.password),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RegistrationDraft {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(self) -> Result<Registration, AccountValidationError> {
        let email = EmailAddress::parse(&self.email)?;
        let password = strong_password(
            self.password,
            &self.confirm_password,
            AccountValidationError::PasswordRequired,
            AccountValidationError::ConfirmationRequired,
        )?;
        let first_name = optional_name(self.first_name, "First name")?;
        let last_name = optional_name(self.last_name, "Last name")?;

        Ok(Registration {
            credentials: Credentials { email, password },
            first_name,
            last_name,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordResetDraft {
    pub email: String,
}

impl PasswordResetDraft {
    /// # Errors
    ///
    /// Returns `EmailRequired` or `InvalidEmail`.
    pub fn validate(self) -> Result<EmailAddress, AccountValidationError> {
        EmailAddress::parse(&self.email)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordUpdateDraft {
    pub password: String,
    pub confirm_password: String,
}

impl PasswordUpdateDraft {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(self) -> Result<Password, AccountValidationError> {
        strong_password(
            self.password,
            &self.confirm_password,
            AccountValidationError::NewPasswordRequired,
            AccountValidationError::NewPasswordConfirmationRequired,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl ProfileDraft {
    /// Validate and normalize the draft. Blank fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(self) -> Result<ProfileUpdate, AccountValidationError> {
        let first_name = optional_name(self.first_name, "First name")?;
        let last_name = optional_name(self.last_name, "Last name")?;
        let display_name = optional_name(self.display_name, "Display name")?;

        let bio = normalize_optional(self.bio);
        if bio
            .as_ref()
            .is_some_and(|b| b.chars().count() > MAX_BIO_CHARS)
        {
            return Err(AccountValidationError::BioTooLong);
        }

        let phone = normalize_optional(self.phone);
        if phone.as_deref().is_some_and(|p| !is_phone_number(p)) {
            return Err(AccountValidationError::InvalidPhone);
        }

        let website = normalize_optional(self.website)
            .map(|raw| parse_website(&raw))
            .transpose()?;

        Ok(ProfileUpdate {
            first_name,
            last_name,
            display_name,
            bio,
            phone,
            website,
            avatar_url: None,
        })
    }
}

//
// ─── VERIFICATION LINK ─────────────────────────────────────────────────────────
//

/// Token and verification type carried by an email-verification deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLink {
    pub token: String,
    pub kind: String,
}

impl VerificationLink {
    /// Extract `token` and `type` from a verification URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVerificationLink` if the URL cannot be parsed or either
    /// parameter is missing or empty.
    pub fn parse(link: &str) -> Result<Self, AccountValidationError> {
        let url =
            Url::parse(link.trim()).map_err(|_| AccountValidationError::InvalidVerificationLink)?;

        let mut token = None;
        let mut kind = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "token" if !value.is_empty() => token = Some(value.into_owned()),
                "type" if !value.is_empty() => kind = Some(value.into_owned()),
                _ => {}
            }
        }

        match (token, kind) {
            (Some(token), Some(kind)) => Ok(Self { token, kind }),
            _ => Err(AccountValidationError::InvalidVerificationLink),
        }
    }
}

//
// ─── HELPERS ───────────────────────────────────────────────────────────────────
//

fn strong_password(
    password: String,
    confirmation: &str,
    missing: AccountValidationError,
    missing_confirmation: AccountValidationError,
) -> Result<Password, AccountValidationError> {
    if password.is_empty() {
        return Err(missing);
    }
    if password.chars().count() < STRONG_PASSWORD_MIN_CHARS {
        return Err(AccountValidationError::PasswordTooShort {
            min: STRONG_PASSWORD_MIN_CHARS,
        });
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(AccountValidationError::WeakPassword);
    }
    if confirmation.is_empty() {
        return Err(missing_confirmation);
    }
    if confirmation != password {
        return Err(AccountValidationError::PasswordMismatch);
    }
    Ok(Password(password))
}

fn optional_name(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, AccountValidationError> {
    let value = normalize_optional(value);
    if value
        .as_ref()
        .is_some_and(|v| v.chars().count() < MIN_NAME_CHARS)
    {
        return Err(AccountValidationError::NameTooShort { field });
    }
    Ok(value)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

// Optional leading `+`, then 1..=16 digits not starting with zero.
fn is_phone_number(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    !digits.is_empty()
        && digits.len() <= MAX_PHONE_DIGITS
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

fn parse_website(raw: &str) -> Result<Url, AccountValidationError> {
    let url = Url::parse(raw).map_err(|_| AccountValidationError::InvalidWebsite)?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AccountValidationError::InvalidWebsite);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password: &str, confirm: &str) -> RegistrationDraft {
        RegistrationDraft {
            email: "ada@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            first_name: Some("Ada".into()),
            last_name: None,
        }
    }

    #[test]
    fn login_requires_email_and_six_char_password() {
        let err = LoginDraft {
            email: "  ".into(),
            password: "secret".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = LoginDraft {
            email: "ada@example".into(),
            password: "secret".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AccountValidationError::InvalidEmail);

        let err = LoginDraft {
            email: "ada@example.com".into(),
            password: "short".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        let creds = LoginDraft {
            email: " ada@example.com ".into(),
            password: "secret".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(creds.email.as_str(), "ada@example.com");
    }

    #[test]
    fn registration_enforces_strong_matching_password() {
        let err = registration("abcdefg1", "abcdefg1").validate().unwrap_err();
        assert_eq!(err, AccountValidationError::WeakPassword);

        let err = registration("Abcdef1", "Abcdef1").validate().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");

        let err = registration("Abcdefg1", "Abcdefg2").validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords must match");

        let err = registration("Abcdefg1", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please confirm your password");

        let ok = registration("Abcdefg1", "Abcdefg1").validate().unwrap();
        assert_eq!(ok.display_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn registration_names_need_two_chars() {
        let mut draft = registration("Abcdefg1", "Abcdefg1");
        draft.last_name = Some("L".into());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Last name must be at least 2 characters");
    }

    #[test]
    fn password_update_uses_new_password_wording() {
        let err = PasswordUpdateDraft::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "New password is required");

        let err = PasswordUpdateDraft {
            password: "Abcdefg1".into(),
            confirm_password: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Please confirm your new password");
    }

    #[test]
    fn profile_rules() {
        let ok = ProfileDraft {
            first_name: Some("  ".into()),
            phone: Some("+4915112345678".into()),
            website: Some("https://example.com/me".into()),
            ..ProfileDraft::default()
        }
        .validate()
        .unwrap();
        assert_eq!(ok.first_name, None);
        assert_eq!(ok.phone.as_deref(), Some("+4915112345678"));
        assert_eq!(ok.website.unwrap().host_str(), Some("example.com"));

        let bad_phone = ProfileDraft {
            phone: Some("0123".into()),
            ..ProfileDraft::default()
        };
        assert_eq!(
            bad_phone.validate().unwrap_err(),
            AccountValidationError::InvalidPhone
        );

        let bad_site = ProfileDraft {
            website: Some("not a url".into()),
            ..ProfileDraft::default()
        };
        assert_eq!(
            bad_site.validate().unwrap_err(),
            AccountValidationError::InvalidWebsite
        );

        let long_bio = ProfileDraft {
            bio: Some("x".repeat(501)),
            ..ProfileDraft::default()
        };
        assert_eq!(
            long_bio.validate().unwrap_err().to_string(),
            "Bio must be less than 500 characters"
        );
    }

    #[test]
    fn verification_link_needs_token_and_type() {
        let link =
            VerificationLink::parse("myapp://auth/verify?token=abc123&type=signup").unwrap();
        assert_eq!(link.token, "abc123");
        assert_eq!(link.kind, "signup");

        let err = VerificationLink::parse("myapp://auth/verify?token=abc123").unwrap_err();
        assert_eq!(err.to_string(), "Invalid verification link");
        assert!(VerificationLink::parse("not a link").is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let creds = LoginDraft {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        }
        .validate()
        .unwrap();
        assert!(!format!("{creds:?}").contains("hunter22"));
    }
}
