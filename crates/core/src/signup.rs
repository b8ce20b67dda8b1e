//! Signup and profile form validation.
//!
//! The submitted form is held in a single immutable [`SignupInput`]. Each
//! validator reads either the raw value (passwords, presence checks) or a
//! sanitized copy produced on demand by [`crate::sanitize::sanitize`]. A
//! failing validator appends a human-readable message and the overall result
//! is the logical AND of every validator that applies to the action.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::sanitize::sanitize;

/// Maximum accepted length of a first or last name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Maximum speaker photo upload size (5 MiB).
pub const MAX_PHOTO_BYTES: u64 = 5 * 1_048_576;

/// MIME types accepted for speaker photos.
pub const ALLOWED_PHOTO_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Value the code-of-conduct checkbox submits when ticked.
pub const COC_AGREED: &str = "agreed";

static JOINDIN_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://joind\.in/user/[a-zA-Z0-9]{1,25}").expect("valid regex")
});

/// Which form is being validated. Passwords and the code of conduct are only
/// checked when creating an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupAction {
    Create,
    Update,
}

/// An uploaded file as seen by the validator.
pub trait UploadedFile {
    /// Whether the upload completed without a transport error.
    fn is_valid(&self) -> bool;
    /// Human-readable description of the upload error, if any.
    fn error_message(&self) -> String;
    /// Size reported by the client, in bytes.
    fn size(&self) -> u64;
    /// Detected MIME type.
    fn mime_type(&self) -> &str;
}

/// Raw signup / profile form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub twitter: Option<String>,
    pub url: Option<String>,
    pub speaker_info: Option<String>,
    pub speaker_bio: Option<String>,
    pub agree_coc: Option<String>,
}

impl SignupInput {
    /// Sanitized copy of a free-text field; missing fields become empty.
    pub fn cleaned(raw: &Option<String>) -> String {
        raw.as_deref().map(sanitize).unwrap_or_default()
    }

    /// Twitter handle, sanitized and without a leading `@`.
    pub fn cleaned_twitter(&self) -> Option<String> {
        self.twitter
            .as_deref()
            .map(|raw| sanitize(raw.strip_prefix('@').unwrap_or(raw)))
    }

    /// Sanitized optional field, `None` when absent or blank.
    pub fn cleaned_optional(raw: &Option<String>) -> Option<String> {
        raw.as_deref()
            .map(sanitize)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Deployment-level validation settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupValidator {
    /// Require agreement to the code of conduct on signup.
    pub has_coc: bool,
}

impl SignupValidator {
    pub fn new(has_coc: bool) -> Self {
        Self { has_coc }
    }

    /// Run every applicable validator and collect their messages.
    pub fn validate(
        &self,
        input: &SignupInput,
        photo: Option<&dyn UploadedFile>,
        action: SignupAction,
    ) -> SignupValidation {
        let mut form = FormErrors::default();
        let mut valid = true;

        if action == SignupAction::Create {
            valid &= form.passwords(input);
            valid &= form.agree_coc(input, self.has_coc);
        }

        valid &= form.email(input);
        valid &= form.name(&input.first_name, "First name");
        valid &= form.name(&input.last_name, "Last name");
        valid &= form.url(input);
        valid &= form.speaker_photo(photo);

        if input.speaker_info.as_deref().is_some_and(|v| !v.is_empty()) {
            valid &= form.sanitized_not_empty(
                &input.speaker_info,
                "You submitted speaker info but it was empty after sanitizing",
            );
        }
        if input.speaker_bio.as_deref().is_some_and(|v| !v.is_empty()) {
            valid &= form.sanitized_not_empty(
                &input.speaker_bio,
                "You submitted speaker bio information but it was empty after sanitizing",
            );
        }

        SignupValidation {
            valid,
            errors: form.errors,
        }
    }
}

/// Accumulates messages while individual field validators run.
#[derive(Default)]
struct FormErrors {
    errors: Vec<String>,
}

impl FormErrors {
    fn fail(&mut self, message: impl Into<String>) -> bool {
        self.errors.push(message.into());
        false
    }

    fn email(&mut self, input: &SignupInput) -> bool {
        let Some(email) = input.email.as_ref().filter(|e| !e.is_empty()) else {
            return self.fail("Missing email");
        };
        if !email.validate_email() {
            return self.fail("Invalid email address format");
        }
        true
    }

    /// Passwords are compared raw: sanitizing would alter legitimate input.
    fn passwords(&mut self, input: &SignupInput) -> bool {
        let password = input.password.as_deref().unwrap_or_default();
        let confirm = input.password2.as_deref().unwrap_or_default();

        if password.is_empty() || confirm.is_empty() {
            return self.fail("Missing passwords");
        }
        if password != confirm {
            return self.fail("The submitted passwords do not match");
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return self.fail(format!(
                "The submitted password must be at least {MIN_PASSWORD_LENGTH} characters long"
            ));
        }
        if password.contains(' ') {
            return self.fail("The submitted password contains invalid characters");
        }
        true
    }

    /// Every failing rule reports its own message.
    fn name(&mut self, raw: &Option<String>, label: &str) -> bool {
        let raw_value = raw.as_deref().unwrap_or_default();
        let cleaned = sanitize(raw_value);
        let mut ok = true;

        if cleaned.is_empty() {
            ok = self.fail(format!("{label} cannot be blank"));
        }
        if cleaned.chars().count() > MAX_NAME_LENGTH {
            ok = self.fail(format!("{label} cannot exceed {MAX_NAME_LENGTH} characters"));
        }
        if cleaned != raw_value {
            ok = self.fail(format!("{label} contains unwanted characters"));
        }
        ok
    }

    fn url(&mut self, input: &SignupInput) -> bool {
        let url = SignupInput::cleaned(&input.url);
        if url.is_empty() || JOINDIN_URL_RE.is_match(&url) {
            return true;
        }
        self.fail("You did not enter a valid joind.in URL")
    }

    fn speaker_photo(&mut self, photo: Option<&dyn UploadedFile>) -> bool {
        let Some(photo) = photo else {
            return true;
        };
        if !photo.is_valid() {
            return self.fail(photo.error_message());
        }
        if photo.size() > MAX_PHOTO_BYTES {
            return self.fail("Speaker photo can not be larger than 5MB");
        }
        if !ALLOWED_PHOTO_MIME_TYPES.contains(&photo.mime_type()) {
            return self.fail("Speaker photo must be a jpg or png");
        }
        true
    }

    fn sanitized_not_empty(&mut self, raw: &Option<String>, message: &str) -> bool {
        if SignupInput::cleaned(raw).is_empty() {
            return self.fail(message);
        }
        true
    }

    fn agree_coc(&mut self, input: &SignupInput, has_coc: bool) -> bool {
        if !has_coc || SignupInput::cleaned(&input.agree_coc) == COC_AGREED {
            return true;
        }
        self.fail("You must agree to abide by our code of conduct in order to submit")
    }
}
