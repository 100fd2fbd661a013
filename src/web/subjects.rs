use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::{subjects, topics};
use crate::progress;
use actix_web::{error, get, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::{entity::*, query::*};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_dashboard)
        .service(view_subjects)
        .service(view_topics);
}

/// Subject row with the user's progress rollup.
pub struct SubjectOverview {
    pub id: i32,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: i32,
}

/// Topic row with the user's progress rollup.
pub struct TopicOverview {
    pub id: i32,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub done: bool,
}

#[derive(Template)]
#[template(path = "subjects.html")]
pub struct SubjectsTemplate {
    pub client: ClientCtx,
    pub subjects: Vec<SubjectOverview>,
}

#[derive(Template)]
#[template(path = "topics.html")]
pub struct TopicsTemplate {
    pub client: ClientCtx,
    pub subject_id: i32,
    pub subject_name: String,
    pub topics: Vec<TopicOverview>,
}

async fn render_subject_list(client: ClientCtx) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;
    let db = get_db_pool();

    let subject_rows = subjects::Entity::find()
        .order_by_asc(subjects::Column::Name)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let rollups = progress::progress_by_subject(user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let subjects = subject_rows
        .into_iter()
        .map(|subject| {
            let rollup = rollups.get(&subject.id).copied().unwrap_or_default();
            SubjectOverview {
                id: subject.id,
                name: subject.name,
                completed: rollup.completed,
                total: rollup.total,
                percent: rollup.percent,
            }
        })
        .collect();

    Ok(SubjectsTemplate { client, subjects }.to_response())
}

/// GET /dashboard - the subject list with progress bars.
#[get("/dashboard")]
pub async fn view_dashboard(client: ClientCtx) -> Result<impl Responder, Error> {
    render_subject_list(client).await
}

/// GET /subjects - same view, legacy path.
#[get("/subjects")]
pub async fn view_subjects(client: ClientCtx) -> Result<impl Responder, Error> {
    render_subject_list(client).await
}

/// GET /subjects/{id}/topics
#[get("/subjects/{id}/topics")]
pub async fn view_topics(
    client: ClientCtx,
    subject_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;
    let subject_id = *subject_id;
    let db = get_db_pool();

    let subject = subjects::Entity::find_by_id(subject_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such subject."))?;

    let topic_rows = topics::Entity::find()
        .filter(topics::Column::SubjectId.eq(subject_id))
        .order_by_asc(topics::Column::Name)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let rollups = progress::progress_by_topic(user_id, subject_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let topics = topic_rows
        .into_iter()
        .map(|topic| {
            let rollup = rollups.get(&topic.id).copied().unwrap_or_default();
            TopicOverview {
                id: topic.id,
                name: topic.name,
                completed: rollup.completed,
                total: rollup.total,
                done: rollup.done,
            }
        })
        .collect();

    Ok(TopicsTemplate {
        client,
        subject_id: subject.id,
        subject_name: subject.name,
        topics,
    }
    .to_response())
}
