/// Broadcast notification list.
///
/// Viewing the list is what marks notifications read; there is no separate
/// acknowledgement step for students.
use crate::middleware::ClientCtx;
use crate::notifications;
use crate::orm::notifications as notification_orm;
use actix_web::{error, get, Error, Responder};
use askama_actix::{Template, TemplateToResponse};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_notifications);
}

#[derive(Template)]
#[template(path = "notifications.html")]
pub struct NotificationsTemplate {
    pub client: ClientCtx,
    pub notifications: Vec<notification_orm::Model>,
}

/// GET /notifications
#[get("/notifications")]
pub async fn view_notifications(client: ClientCtx) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;

    let items = notifications::list_and_mark_read(user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(NotificationsTemplate {
        client,
        notifications: items,
    }
    .to_response())
}
