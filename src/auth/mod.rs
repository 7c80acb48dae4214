pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use guard::authorize_owner;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

lazy_static! {
    // Display names: 3-15 chars; alphanumerics, underscore, hyphen and spaces
    static ref USER_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9_ -]{3,15}$").unwrap();
    static ref HAS_DIGIT: regex::Regex = regex::Regex::new(r"[0-9]").unwrap();
    static ref HAS_UPPERCASE: regex::Regex = regex::Regex::new(r"[A-Z]").unwrap();
    static ref HAS_LOWERCASE: regex::Regex = regex::Regex::new(r"[a-z]").unwrap();
    static ref HAS_SPECIAL: regex::Regex = regex::Regex::new(r"[@$!#%*?&^ _-]").unwrap();
}

/// Password policy: at least 8 characters with a digit, an uppercase letter,
/// a lowercase letter, and a special character. The first failing rule wins,
/// so the client gets one actionable message at a time.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let msg = if password.chars().count() < 8 {
        Some("Make sure your password is at least 8 characters")
    } else if !HAS_DIGIT.is_match(password) {
        Some("Make sure your password has a number in it")
    } else if !HAS_UPPERCASE.is_match(password) {
        Some("Make sure your password has a capital letter in it")
    } else if !HAS_LOWERCASE.is_match(password) {
        Some("Make sure your password has a small letter in it")
    } else if !HAS_SPECIAL.is_match(password) {
        Some("Make sure your password has a special letter in it")
    } else {
        None
    };

    match msg {
        Some(msg) => {
            let mut err = ValidationError::new("password_policy");
            err.message = Some(msg.into());
            Err(err)
        }
        None => Ok(()),
    }
}

/// Represents the payload for a new account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address for the new account; also the account's primary key.
    #[validate(email)]
    pub email: String,
    /// Display name for the new account.
    #[validate(regex(
        path = "USER_NAME_REGEX",
        message = "User name must contain 3 to 15 characters and only alphanumerics, underscore, hyphen and spaces are allowed"
    ))]
    pub user_name: String,
    /// Password for the new account; checked against the password policy.
    #[validate(custom = "validate_password_strength")]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address of the account to authenticate.
    #[validate(email)]
    pub email: String,
    /// The account password. Policy checks apply only at signup and profile
    /// update; login accepts whatever was stored.
    pub password: String,
}

/// Represents the payload for a profile update; each field is independently optional.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(regex(
        path = "USER_NAME_REGEX",
        message = "User name must contain 3 to 15 characters and only alphanumerics, underscore, hyphen and spaces are allowed"
    ))]
    pub user_name: Option<String>,
    #[validate(custom = "validate_password_strength")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.password.is_none()
    }
}

/// Response structure after a successful login: the bearer token plus a
/// human-readable confirmation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub msg: String,
    pub jwt_token: String,
}
