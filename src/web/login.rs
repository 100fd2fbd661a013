use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::session::{login_user, verify_password};
use crate::user::find_by_email;
use actix_web::{error, get, post, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_login).service(view_login);
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub client: ClientCtx,
    pub error: String,
}

#[derive(Deserialize)]
pub struct FormData {
    email: String,
    password: String,
}

/// GET /login
#[get("/login")]
pub async fn view_login(client: ClientCtx) -> Result<impl Responder, Error> {
    if client.is_user() {
        return Ok(super::redirect("/dashboard"));
    }

    Ok(LoginTemplate {
        client,
        error: String::new(),
    }
    .to_response())
}

/// POST /login
///
/// The failure message never reveals whether the email or the password was
/// wrong.
#[post("/login")]
pub async fn post_login(
    client: ClientCtx,
    session: actix_session::Session,
    form: web::Form<FormData>,
) -> Result<impl Responder, Error> {
    let user = find_by_email(get_db_pool(), &form.email)
        .await
        .map_err(|e| {
            log::error!("post_login: {}", e);
            error::ErrorInternalServerError("DB error")
        })?;

    let user = match user {
        Some(user) if verify_password(&user.password_hash, form.password.trim()) => user,
        _ => {
            log::debug!("login failure for {}", form.email);
            return Ok(LoginTemplate {
                client,
                error: "Invalid email or password".to_owned(),
            }
            .to_response());
        }
    };

    login_user(&session, user.id, &user.name)?;
    Ok(super::redirect("/dashboard"))
}
