use crate::session::logout_user;
use actix_web::{get, Error, Responder};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_logout);
}

/// GET /logout - drop the student session keys and return to the login
/// page. The admin flag, if present, is untouched.
#[get("/logout")]
pub async fn view_logout(session: actix_session::Session) -> Result<impl Responder, Error> {
    logout_user(&session);
    Ok(super::redirect("/login"))
}
