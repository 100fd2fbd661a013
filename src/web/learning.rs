use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::{notes, questions, topics, videos};
use crate::progress;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpRequest, Responder};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::{entity::*, query::*};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_learning)
        .service(complete_topic)
        .service(complete_video)
        .service(uncomplete_video);
}

pub struct VideoDisplay {
    pub id: i32,
    pub title: String,
    pub youtube_id: String,
    pub completed: bool,
}

#[derive(Template)]
#[template(path = "learning.html")]
pub struct LearningTemplate {
    pub client: ClientCtx,
    pub topic_id: i32,
    pub topic_name: String,
    pub videos: Vec<VideoDisplay>,
    pub notes: Vec<notes::Model>,
    pub questions: Vec<questions::Model>,
    pub topic_completed: bool,
}

/// GET /topics/{id}/learning - videos, notes and questions for one topic.
#[get("/topics/{id}/learning")]
pub async fn view_learning(
    client: ClientCtx,
    topic_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;
    let topic_id = *topic_id;
    let db = get_db_pool();

    let topic = topics::Entity::find_by_id(topic_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such topic."))?;

    let video_rows = videos::Entity::find()
        .filter(videos::Column::TopicId.eq(topic_id))
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let note_rows = notes::Entity::find()
        .filter(notes::Column::TopicId.eq(topic_id))
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let question_rows = questions::Entity::find()
        .filter(questions::Column::TopicId.eq(topic_id))
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let completed_ids = progress::completed_video_ids(user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let video_ids: Vec<i32> = video_rows.iter().map(|video| video.id).collect();
    let topic_completed = progress::topic_done(&video_ids, &completed_ids);

    let videos = video_rows
        .into_iter()
        .map(|video| VideoDisplay {
            completed: completed_ids.contains(&video.id),
            id: video.id,
            title: video.title,
            youtube_id: video.youtube_id,
        })
        .collect();

    Ok(LearningTemplate {
        client,
        topic_id: topic.id,
        topic_name: topic.name,
        videos,
        notes: note_rows,
        questions: question_rows,
        topic_completed,
    }
    .to_response())
}

/// POST /topics/{id}/complete - idempotent.
#[post("/topics/{id}/complete")]
pub async fn complete_topic(
    client: ClientCtx,
    topic_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;

    progress::complete_topic(user_id, *topic_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(super::redirect(&format!("/topics/{}/learning", *topic_id)))
}

/// Send form posts back to the page that made them.
fn back_to_referer(req: &HttpRequest) -> actix_web::HttpResponse {
    let to = req
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/subjects");
    super::redirect(to)
}

/// POST /videos/{id}/complete - idempotent.
#[post("/videos/{id}/complete")]
pub async fn complete_video(
    client: ClientCtx,
    req: HttpRequest,
    video_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;

    progress::complete_video(user_id, *video_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(back_to_referer(&req))
}

/// POST /videos/{id}/uncomplete - no-op when not completed.
#[post("/videos/{id}/uncomplete")]
pub async fn uncomplete_video(
    client: ClientCtx,
    req: HttpRequest,
    video_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let user_id = client.require_login()?;

    progress::uncomplete_video(user_id, *video_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(back_to_referer(&req))
}
