use crate::db::get_db_pool;
use crate::messaging;
use crate::middleware::ClientCtx;
use crate::orm::{messages, users};
use actix_web::{error, get, post, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::EntityTrait;
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_contact).service(view_contact);
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub client: ClientCtx,
    pub messages: Vec<messages::Model>,
    pub flash: String,
}

#[derive(Deserialize)]
pub struct FormData {
    message: String,
}

async fn load_user(user_id: i32) -> Result<users::Model, Error> {
    users::Entity::find_by_id(user_id)
        .one(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such user."))
}

/// Rendering the thread counts as reading it, so the admin-reply marker
/// advances before the page is built.
async fn render_thread(client: ClientCtx, user_id: i32, flash: String) -> Result<impl Responder, Error> {
    let user = load_user(user_id).await?;

    messaging::mark_admin_replies_seen(&user)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let thread = messaging::messages_for_user(user.id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(ContactTemplate {
        client,
        messages: thread,
        flash,
    }
    .to_response())
}

/// GET /contact
#[get("/contact")]
pub async fn view_contact(client: ClientCtx) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;
    render_thread(client, user_id, String::new()).await
}

/// POST /contact - append a student message; a blank message is skipped.
#[post("/contact")]
pub async fn post_contact(
    client: ClientCtx,
    form: web::Form<FormData>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;
    let text = form.message.trim();

    let flash = if text.is_empty() {
        String::new()
    } else {
        let user = load_user(user_id).await?;
        messaging::send_student_message(&user, text)
            .await
            .map_err(error::ErrorInternalServerError)?;
        "Message sent to admin".to_owned()
    };

    render_thread(client, user_id, flash).await
}
