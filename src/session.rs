//! Cookie-session keys and password hashing.
//!
//! Two independent flags live in the signed cookie session: `user_id` for
//! students and `is_admin` for the administrator. Neither implies the
//! other.

use actix_session::Session;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher};
use once_cell::sync::Lazy;

pub const KEY_USER_ID: &str = "user_id";
pub const KEY_USER_NAME: &str = "user_name";
pub const KEY_IS_ADMIN: &str = "is_admin";

static ARGON2: Lazy<Argon2<'static>> = Lazy::new(Argon2::default);

pub fn get_argon2() -> &'static Argon2<'static> {
    &ARGON2
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(get_argon2()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Constant-shape verification: a malformed stored hash behaves like a
/// mismatch instead of erroring.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => get_argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("verify_password: unparseable stored hash: {}", e);
            false
        }
    }
}

pub fn user_id(session: &Session) -> Option<i32> {
    session.get::<i32>(KEY_USER_ID).unwrap_or(None)
}

pub fn is_admin(session: &Session) -> bool {
    session.get::<bool>(KEY_IS_ADMIN).unwrap_or(None) == Some(true)
}

pub fn login_user(session: &Session, id: i32, name: &str) -> Result<(), actix_web::Error> {
    session
        .insert(KEY_USER_ID, id)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    session
        .insert(KEY_USER_NAME, name)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(())
}

pub fn logout_user(session: &Session) {
    session.remove(KEY_USER_ID);
    session.remove(KEY_USER_NAME);
}

pub fn login_admin(session: &Session) -> Result<(), actix_web::Error> {
    session
        .insert(KEY_IS_ADMIN, true)
        .map_err(actix_web::error::ErrorInternalServerError)
}

pub fn logout_admin(session: &Session) {
    session.remove(KEY_IS_ADMIN);
}

/// Fixed admin credential pair, overridable from the environment.
pub fn admin_credentials() -> (String, String) {
    (
        std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_owned()),
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_owned()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("hunter22").expect("hashing failed");
        assert!(verify_password(&hash, "hunter22"));
        assert!(!verify_password(&hash, "hunter2"));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }
}
