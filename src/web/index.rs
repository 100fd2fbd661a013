use crate::middleware::ClientCtx;
use actix_web::{get, Error, HttpResponse, Responder};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index).service(view_health);
}

/// GET / - the login page doubles as the landing page.
#[get("/")]
pub async fn view_index(client: ClientCtx) -> Result<impl Responder, Error> {
    if client.is_user() {
        return Ok(super::redirect("/dashboard"));
    }
    Ok(super::redirect("/login"))
}

/// GET /health - liveness probe.
#[get("/health")]
pub async fn view_health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
