//! Login, registration, and logout over the session state.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::session::{Session, UserAccount};

// Prefix-anchored `local@domain.tld` shape; deliberately loose beyond that.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("static email pattern"));

/// Input gathered from the registration form, validated as a unit.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Sign in with an exact credential match. Success records the user on the
/// session and restarts the image rotation; failure leaves the session
/// logged out.
pub fn login(session: &mut Session, username: &str, password: &str) -> Result<()> {
    if !session.users.validate_credentials(username, password) {
        warn!(username, "rejected login");
        return Err(Error::Auth("invalid username or password".to_string()));
    }
    session.set_current_user(Some(username.to_string()));
    info!(username, "login successful");
    Ok(())
}

/// Create an account. Field checks run in form order and the first failure
/// wins; a rejected registration leaves the directory untouched. Success
/// still leaves the session logged out; signing in is a separate step.
pub fn register(session: &mut Session, form: &RegistrationForm) -> Result<()> {
    if form.username.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm.is_empty()
    {
        return Err(Error::Validation("all fields required".to_string()));
    }
    if session.users.contains(&form.username) {
        return Err(Error::Validation("username already exists".to_string()));
    }
    if !EMAIL_RE.is_match(&form.email) {
        return Err(Error::Validation("invalid email format".to_string()));
    }
    if form.password != form.confirm {
        return Err(Error::Validation("passwords do not match".to_string()));
    }

    session.users.insert(UserAccount {
        username: form.username.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
    });
    info!(username = %form.username, "account registered");
    Ok(())
}

/// Drop back to the logged-out state and restart the rotation counter.
pub fn logout(session: &mut Session) {
    if let Some(username) = session.current_user() {
        info!(username, "logout");
    }
    session.set_current_user(None);
}
