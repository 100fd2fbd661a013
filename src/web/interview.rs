use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::{interview_preps, subjects};
use actix_web::{error, get, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::{entity::*, query::*};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_interview);
}

#[derive(Template)]
#[template(path = "interview.html")]
pub struct InterviewTemplate {
    pub client: ClientCtx,
    pub subject_name: String,
    pub items: Vec<interview_preps::Model>,
}

/// GET /subjects/{id}/interview - interview prep material, newest first.
#[get("/subjects/{id}/interview")]
pub async fn view_interview(
    client: ClientCtx,
    subject_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_login()?;
    let db = get_db_pool();

    let subject = subjects::Entity::find_by_id(*subject_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such subject."))?;

    let items = interview_preps::Entity::find()
        .filter(interview_preps::Column::SubjectId.eq(subject.id))
        .order_by_desc(interview_preps::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(InterviewTemplate {
        client,
        subject_name: subject.name,
        items,
    }
    .to_response())
}
