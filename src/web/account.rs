use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::users;
use crate::session::{hash_password, KEY_USER_NAME};
use actix_web::{error, get, post, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(update_profile).service(view_profile);
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub client: ClientCtx,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct FormData {
    name: Option<String>,
    password: Option<String>,
}

/// GET /profile
#[get("/profile")]
pub async fn view_profile(client: ClientCtx) -> Result<impl Responder, Error> {
    let user = match client.get_user() {
        Some(user) => user.clone(),
        None => return Ok(super::redirect("/login")),
    };

    Ok(ProfileTemplate {
        client,
        name: user.name,
        email: user.email,
        message: String::new(),
    }
    .to_response())
}

/// POST /profile - blank fields leave the stored value untouched.
#[post("/profile")]
pub async fn update_profile(
    client: ClientCtx,
    session: actix_session::Session,
    form: web::Form<FormData>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;
    let db = get_db_pool();

    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such user."))?;

    let mut active: users::ActiveModel = user.clone().into();
    let mut changed = false;

    let name = form.name.as_deref().unwrap_or("").trim().to_owned();
    if !name.is_empty() {
        active.name = Set(name.clone());
        changed = true;
        session
            .insert(KEY_USER_NAME, name.clone())
            .map_err(error::ErrorInternalServerError)?;
    }

    let password = form.password.as_deref().unwrap_or("").trim();
    if !password.is_empty() {
        let password_hash = hash_password(password).map_err(|e| {
            log::error!("update_profile: hashing failed: {}", e);
            error::ErrorInternalServerError("Update failed")
        })?;
        active.password_hash = Set(password_hash);
        changed = true;
    }

    // An UPDATE with no changed columns is an error in sea-orm.
    let updated = if changed {
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?
    } else {
        user
    };

    Ok(ProfileTemplate {
        client,
        name: updated.name,
        email: updated.email,
        message: "Profile updated successfully".to_owned(),
    }
    .to_response())
}
