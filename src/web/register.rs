use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::users;
use crate::session::hash_password;
use crate::user::find_by_email;
use actix_web::{error, get, post, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::{EntityTrait, Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_register).service(view_register);
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub client: ClientCtx,
    pub error: String,
}

#[derive(Deserialize, Validate)]
pub struct FormData {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 1, max = 1000))]
    password: String,
}

/// GET /register
#[get("/register")]
pub async fn view_register(client: ClientCtx) -> Result<impl Responder, Error> {
    Ok(RegisterTemplate {
        client,
        error: String::new(),
    }
    .to_response())
}

/// POST /register
#[post("/register")]
pub async fn post_register(
    client: ClientCtx,
    form: web::Form<FormData>,
) -> Result<impl Responder, Error> {
    let name = form.name.trim();
    let email = form.email.trim().to_lowercase();
    let password = form.password.trim();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Ok(RegisterTemplate {
            client,
            error: "All fields are required".to_owned(),
        }
        .to_response());
    }

    if form.validate().is_err() {
        return Ok(RegisterTemplate {
            client,
            error: "Enter a valid email address".to_owned(),
        }
        .to_response());
    }

    let db = get_db_pool();
    let existing = find_by_email(db, &email).await.map_err(|e| {
        log::error!("post_register: {}", e);
        error::ErrorInternalServerError("DB error")
    })?;

    if existing.is_some() {
        return Ok(RegisterTemplate {
            client,
            error: "Email already registered".to_owned(),
        }
        .to_response());
    }

    let password_hash = hash_password(password).map_err(|e| {
        log::error!("post_register: hashing failed: {}", e);
        error::ErrorInternalServerError("Registration failed")
    })?;

    users::Entity::insert(users::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(email),
        password_hash: Set(password_hash),
        last_seen_admin_message_id: Set(0),
        ..Default::default()
    })
    .exec(db)
    .await
    .map_err(|e| {
        log::error!("post_register: insert failed: {}", e);
        error::ErrorInternalServerError("DB error")
    })?;

    Ok(super::redirect("/login"))
}
