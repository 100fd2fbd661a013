/// Administration dashboard.
///
/// Every content type is managed here: subjects, topics, videos, notes,
/// questions, broadcast notifications and interview prep, plus replies to
/// student messages. Each entity/action has its own endpoint. Validation
/// failures (blank fields, wrong file type, unparseable ids) skip the
/// write and redirect back to the dashboard without a user-facing message.
use crate::db::get_db_pool;
use crate::filesystem;
use crate::messaging::{self, MessageThread};
use crate::middleware::ClientCtx;
use crate::notifications;
use crate::orm::{interview_preps, notes, questions, subjects, topics, users, videos};
use crate::session;
use actix_multipart::Multipart;
use actix_web::{error, get, post, web, Error, HttpResponse, Responder};
use askama_actix::{Template, TemplateToResponse};
use futures::TryStreamExt;
use sea_orm::{entity::*, query::*};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_admin_login)
        .service(post_admin_login)
        .service(view_admin_logout)
        .service(create_subject)
        .service(edit_subject)
        .service(delete_subject)
        .service(create_topic)
        .service(edit_topic)
        .service(delete_topic)
        .service(create_video)
        .service(edit_video)
        .service(delete_video)
        .service(create_note)
        .service(edit_note)
        .service(delete_note)
        .service(create_question)
        .service(edit_question)
        .service(delete_question)
        .service(create_notification)
        .service(edit_notification)
        .service(delete_notification)
        .service(create_interview)
        .service(edit_interview)
        .service(delete_interview)
        .service(reply_to_student)
        .service(mark_thread_read)
        .service(view_admin);
}

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub client: ClientCtx,
    pub error: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub client: ClientCtx,
    pub subjects: Vec<subjects::Model>,
    pub topics: Vec<topics::Model>,
    pub videos: Vec<videos::Model>,
    pub notes: Vec<notes::Model>,
    pub questions: Vec<questions::Model>,
    pub students: Vec<StudentDisplay>,
    pub notifications: Vec<crate::orm::notifications::Model>,
    pub interviews: Vec<interview_preps::Model>,
    pub threads: Vec<MessageThread>,
    pub admin_unread_msg: bool,
}

/// Student row for the dashboard; the hash stays out of the template.
pub struct StudentDisplay {
    pub id: i32,
    pub name: String,
    pub email: String,
}

fn to_admin() -> HttpResponse {
    super::redirect("/admin")
}

// Auth

#[derive(Deserialize)]
pub struct AdminLoginForm {
    username: String,
    password: String,
}

/// GET /admin/login
#[get("/admin/login")]
pub async fn view_admin_login(client: ClientCtx) -> Result<impl Responder, Error> {
    if client.is_admin() {
        return Ok(to_admin());
    }

    Ok(AdminLoginTemplate {
        client,
        error: String::new(),
    }
    .to_response())
}

/// POST /admin/login - fixed credential pair, no user row involved.
#[post("/admin/login")]
pub async fn post_admin_login(
    client: ClientCtx,
    cookies: actix_session::Session,
    form: web::Form<AdminLoginForm>,
) -> Result<impl Responder, Error> {
    let (username, password) = session::admin_credentials();

    if form.username.trim() == username && form.password.trim() == password {
        session::login_admin(&cookies)?;
        return Ok(to_admin());
    }

    log::warn!("failed admin login attempt for {}", form.username.trim());
    Ok(AdminLoginTemplate {
        client,
        error: "Invalid admin credentials".to_owned(),
    }
    .to_response())
}

/// GET /admin/logout
#[get("/admin/logout")]
pub async fn view_admin_logout(cookies: actix_session::Session) -> Result<impl Responder, Error> {
    session::logout_admin(&cookies);
    Ok(super::redirect("/admin/login"))
}

// Dashboard

/// GET /admin - render everything, then advance the per-thread seen
/// markers: rendering the dashboard counts as reading every thread.
#[get("/admin")]
pub async fn view_admin(client: ClientCtx) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let subjects = subjects::Entity::find()
        .order_by_asc(subjects::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    let topics = topics::Entity::find()
        .order_by_asc(topics::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    let videos = videos::Entity::find()
        .order_by_asc(videos::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    let notes = notes::Entity::find()
        .order_by_asc(notes::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    let questions = questions::Entity::find()
        .order_by_asc(questions::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    let students = users::Entity::find()
        .order_by_asc(users::Column::Name)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .into_iter()
        .map(|user| StudentDisplay {
            id: user.id,
            name: user.name,
            email: user.email,
        })
        .collect();
    let notification_rows = notifications::list_all()
        .await
        .map_err(error::ErrorInternalServerError)?;
    let interviews = interview_preps::Entity::find()
        .order_by_desc(interview_preps::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let threads = messaging::admin_threads()
        .await
        .map_err(error::ErrorInternalServerError)?;
    let admin_unread_msg = threads.iter().any(|thread| thread.new);

    let response = AdminTemplate {
        client,
        subjects,
        topics,
        videos,
        notes,
        questions,
        students,
        notifications: notification_rows,
        interviews,
        admin_unread_msg,
        threads: threads.clone(),
    }
    .to_response();

    messaging::mark_threads_seen(&threads)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(response)
}

// Subjects

#[derive(Deserialize)]
pub struct SubjectForm {
    subject_name: String,
}

/// POST /admin/subjects
#[post("/admin/subjects")]
pub async fn create_subject(
    client: ClientCtx,
    form: web::Form<SubjectForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let name = form.subject_name.trim();

    if !name.is_empty() {
        subjects::Entity::insert(subjects::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/subjects/{id}/edit
#[post("/admin/subjects/{id}/edit")]
pub async fn edit_subject(
    client: ClientCtx,
    subject_id: web::Path<i32>,
    form: web::Form<SubjectForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let subject = subjects::Entity::find_by_id(*subject_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such subject."))?;

    let name = form.subject_name.trim();
    if !name.is_empty() {
        let mut active: subjects::ActiveModel = subject.into();
        active.name = Set(name.to_owned());
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/subjects/{id}/delete - children go with it via cascade.
#[post("/admin/subjects/{id}/delete")]
pub async fn delete_subject(
    client: ClientCtx,
    subject_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    subjects::Entity::delete_by_id(*subject_id)
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Topics

#[derive(Deserialize)]
pub struct TopicForm {
    topic_name: String,
    subject_id: Option<i32>,
}

/// POST /admin/topics
#[post("/admin/topics")]
pub async fn create_topic(
    client: ClientCtx,
    form: web::Form<TopicForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let name = form.topic_name.trim();

    if let (false, Some(subject_id)) = (name.is_empty(), form.subject_id) {
        topics::Entity::insert(topics::ActiveModel {
            name: Set(name.to_owned()),
            subject_id: Set(subject_id),
            ..Default::default()
        })
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/topics/{id}/edit
#[post("/admin/topics/{id}/edit")]
pub async fn edit_topic(
    client: ClientCtx,
    topic_id: web::Path<i32>,
    form: web::Form<TopicForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let topic = topics::Entity::find_by_id(*topic_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such topic."))?;

    let name = form.topic_name.trim();
    if !name.is_empty() {
        let mut active: topics::ActiveModel = topic.into();
        active.name = Set(name.to_owned());
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/topics/{id}/delete
#[post("/admin/topics/{id}/delete")]
pub async fn delete_topic(
    client: ClientCtx,
    topic_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    topics::Entity::delete_by_id(*topic_id)
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Videos

#[derive(Deserialize)]
pub struct VideoForm {
    video_title: String,
    youtube_id: String,
    topic_id: Option<i32>,
}

/// POST /admin/videos
#[post("/admin/videos")]
pub async fn create_video(
    client: ClientCtx,
    form: web::Form<VideoForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let title = form.video_title.trim();
    let youtube_id = form.youtube_id.trim();

    if !title.is_empty() && !youtube_id.is_empty() {
        if let Some(topic_id) = form.topic_id {
            videos::Entity::insert(videos::ActiveModel {
                title: Set(title.to_owned()),
                youtube_id: Set(youtube_id.to_owned()),
                topic_id: Set(topic_id),
                ..Default::default()
            })
            .exec(get_db_pool())
            .await
            .map_err(error::ErrorInternalServerError)?;
        }
    }

    Ok(to_admin())
}

/// POST /admin/videos/{id}/edit
#[post("/admin/videos/{id}/edit")]
pub async fn edit_video(
    client: ClientCtx,
    video_id: web::Path<i32>,
    form: web::Form<VideoForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let video = videos::Entity::find_by_id(*video_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such video."))?;

    let mut active: videos::ActiveModel = video.into();
    let mut changed = false;
    let title = form.video_title.trim();
    if !title.is_empty() {
        active.title = Set(title.to_owned());
        changed = true;
    }
    let youtube_id = form.youtube_id.trim();
    if !youtube_id.is_empty() {
        active.youtube_id = Set(youtube_id.to_owned());
        changed = true;
    }
    if changed {
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/videos/{id}/delete
#[post("/admin/videos/{id}/delete")]
pub async fn delete_video(
    client: ClientCtx,
    video_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    videos::Entity::delete_by_id(*video_id)
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Notes (PDF upload)

/// POST /admin/notes - multipart with note_title, topic_id and a PDF.
#[post("/admin/notes")]
pub async fn create_note(
    client: ClientCtx,
    mut payload: Multipart,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    let mut title = String::new();
    let mut topic_id: Option<i32> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_owned();
        match name.as_str() {
            "note_title" => title = filesystem::read_text_field(&mut field).await?,
            "topic_id" => {
                topic_id = filesystem::read_text_field(&mut field)
                    .await?
                    .trim()
                    .parse()
                    .ok();
            }
            "note_file" => {
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or_default()
                    .to_owned();
                let bytes = filesystem::read_file_field(&mut field).await?;
                if !filename.is_empty() {
                    upload = Some((filename, bytes));
                }
            }
            _ => {}
        }
    }

    let title = title.trim().to_owned();
    if let (false, Some(topic_id), Some((filename, bytes))) =
        (title.is_empty(), topic_id, upload)
    {
        if filesystem::is_pdf_filename(&filename) {
            let file_path = filesystem::save_pdf(filesystem::NOTES_SUBDIR, &filename, bytes).await?;
            notes::Entity::insert(notes::ActiveModel {
                title: Set(title),
                file_path: Set(file_path),
                topic_id: Set(topic_id),
                ..Default::default()
            })
            .exec(get_db_pool())
            .await
            .map_err(error::ErrorInternalServerError)?;
        }
    }

    Ok(to_admin())
}

#[derive(Deserialize)]
pub struct NoteEditForm {
    note_title: String,
}

/// POST /admin/notes/{id}/edit - title only; the file is immutable.
#[post("/admin/notes/{id}/edit")]
pub async fn edit_note(
    client: ClientCtx,
    note_id: web::Path<i32>,
    form: web::Form<NoteEditForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let note = notes::Entity::find_by_id(*note_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such note."))?;

    let title = form.note_title.trim();
    if !title.is_empty() {
        let mut active: notes::ActiveModel = note.into();
        active.title = Set(title.to_owned());
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/notes/{id}/delete - removes the stored file as well.
#[post("/admin/notes/{id}/delete")]
pub async fn delete_note(
    client: ClientCtx,
    note_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let note = notes::Entity::find_by_id(*note_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such note."))?;

    filesystem::remove_static_file(&note.file_path);
    notes::Entity::delete_by_id(note.id)
        .exec(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Questions

#[derive(Deserialize)]
pub struct QuestionForm {
    question_text: String,
    topic_id: Option<i32>,
}

/// POST /admin/questions
#[post("/admin/questions")]
pub async fn create_question(
    client: ClientCtx,
    form: web::Form<QuestionForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let text = form.question_text.trim();

    if let (false, Some(topic_id)) = (text.is_empty(), form.topic_id) {
        questions::Entity::insert(questions::ActiveModel {
            text: Set(text.to_owned()),
            topic_id: Set(topic_id),
            ..Default::default()
        })
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/questions/{id}/edit
#[post("/admin/questions/{id}/edit")]
pub async fn edit_question(
    client: ClientCtx,
    question_id: web::Path<i32>,
    form: web::Form<QuestionForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let question = questions::Entity::find_by_id(*question_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such question."))?;

    let text = form.question_text.trim();
    if !text.is_empty() {
        let mut active: questions::ActiveModel = question.into();
        active.text = Set(text.to_owned());
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/questions/{id}/delete
#[post("/admin/questions/{id}/delete")]
pub async fn delete_question(
    client: ClientCtx,
    question_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    questions::Entity::delete_by_id(*question_id)
        .exec(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Notifications

#[derive(Deserialize)]
pub struct NotificationForm {
    notification_title: String,
    notification_body: String,
}

/// POST /admin/notifications
#[post("/admin/notifications")]
pub async fn create_notification(
    client: ClientCtx,
    form: web::Form<NotificationForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let title = form.notification_title.trim();
    let body = form.notification_body.trim();

    if !title.is_empty() && !body.is_empty() {
        notifications::create_notification(title, body)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/notifications/{id}/edit
#[post("/admin/notifications/{id}/edit")]
pub async fn edit_notification(
    client: ClientCtx,
    notification_id: web::Path<i32>,
    form: web::Form<NotificationForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    notifications::update_notification(
        *notification_id,
        form.notification_title.trim(),
        form.notification_body.trim(),
    )
    .await
    .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

/// POST /admin/notifications/{id}/delete
#[post("/admin/notifications/{id}/delete")]
pub async fn delete_notification(
    client: ClientCtx,
    notification_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    notifications::delete_notification(*notification_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Interview prep

struct InterviewUpload {
    subject_id: Option<i32>,
    title: String,
    content: String,
    upload: Option<(String, Vec<u8>)>,
}

impl InterviewUpload {
    /// A form is insertable only with a subject, a title and content. The
    /// PDF stays optional.
    fn is_complete(&self) -> bool {
        self.subject_id.is_some() && !self.title.is_empty() && !self.content.is_empty()
    }
}

/// Drain a multipart interview form into memory. Nothing touches disk
/// until the caller has validated the form.
async fn read_interview_form(payload: &mut Multipart) -> Result<InterviewUpload, Error> {
    let mut form = InterviewUpload {
        subject_id: None,
        title: String::new(),
        content: String::new(),
        upload: None,
    };

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_owned();
        match name.as_str() {
            "subject_id" => {
                form.subject_id = filesystem::read_text_field(&mut field)
                    .await?
                    .trim()
                    .parse()
                    .ok();
            }
            "interview_title" => {
                form.title = filesystem::read_text_field(&mut field).await?.trim().to_owned();
            }
            "interview_content" => {
                form.content = filesystem::read_text_field(&mut field)
                    .await?
                    .trim()
                    .to_owned();
            }
            "interview_file" => {
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or_default()
                    .to_owned();
                let bytes = filesystem::read_file_field(&mut field).await?;
                if !filename.is_empty() && filesystem::is_pdf_filename(&filename) {
                    form.upload = Some((filename, bytes));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /admin/interview - multipart; the PDF is optional.
#[post("/admin/interview")]
pub async fn create_interview(
    client: ClientCtx,
    mut payload: Multipart,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    let form = read_interview_form(&mut payload).await?;
    if !form.is_complete() {
        return Ok(to_admin());
    }
    let subject_id = match form.subject_id {
        Some(id) => id,
        None => return Ok(to_admin()),
    };

    let pdf_path = match form.upload {
        Some((filename, bytes)) => Some(
            filesystem::save_pdf(filesystem::INTERVIEW_SUBDIR, &filename, bytes).await?,
        ),
        None => None,
    };

    interview_preps::Entity::insert(interview_preps::ActiveModel {
        subject_id: Set(subject_id),
        title: Set(form.title),
        content: Set(form.content),
        pdf_path: Set(pdf_path),
        ..Default::default()
    })
    .exec(get_db_pool())
    .await
    .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

/// POST /admin/interview/{id}/edit - blank fields keep the stored value;
/// a new PDF replaces the reference.
#[post("/admin/interview/{id}/edit")]
pub async fn edit_interview(
    client: ClientCtx,
    interview_id: web::Path<i32>,
    mut payload: Multipart,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let interview = interview_preps::Entity::find_by_id(*interview_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such interview item."))?;

    let form = read_interview_form(&mut payload).await?;
    let mut active: interview_preps::ActiveModel = interview.into();
    let mut changed = false;

    if !form.title.is_empty() {
        active.title = Set(form.title);
        changed = true;
    }
    if !form.content.is_empty() {
        active.content = Set(form.content);
        changed = true;
    }
    if let Some((filename, bytes)) = form.upload {
        let pdf_path =
            filesystem::save_pdf(filesystem::INTERVIEW_SUBDIR, &filename, bytes).await?;
        active.pdf_path = Set(Some(pdf_path));
        changed = true;
    }

    if changed {
        active
            .update(db)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/interview/{id}/delete - removes the stored file if any.
#[post("/admin/interview/{id}/delete")]
pub async fn delete_interview(
    client: ClientCtx,
    interview_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;
    let db = get_db_pool();

    let interview = interview_preps::Entity::find_by_id(*interview_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such interview item."))?;

    if let Some(pdf_path) = &interview.pdf_path {
        filesystem::remove_static_file(pdf_path);
    }
    interview_preps::Entity::delete_by_id(interview.id)
        .exec(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(to_admin())
}

// Messages

#[derive(Deserialize)]
pub struct ReplyForm {
    reply_text: String,
}

/// POST /admin/messages/{user_id}/reply
#[post("/admin/messages/{user_id}/reply")]
pub async fn reply_to_student(
    client: ClientCtx,
    user_id: web::Path<i32>,
    form: web::Form<ReplyForm>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    let user = users::Entity::find_by_id(*user_id)
        .one(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("No such student."))?;

    let text = form.reply_text.trim();
    if !text.is_empty() {
        messaging::send_admin_reply(&user, text)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    Ok(to_admin())
}

/// POST /admin/messages/{user_id}/mark_read
#[post("/admin/messages/{user_id}/mark_read")]
pub async fn mark_thread_read(
    client: ClientCtx,
    user_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    client.require_admin()?;

    messaging::mark_latest_student_seen(*user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::InterviewUpload;

    // An attached PDF must never make an otherwise invalid form
    // insertable; the file only gets written once this check passes.
    #[test]
    fn interview_upload_alone_does_not_complete_the_form() {
        let form = InterviewUpload {
            subject_id: None,
            title: String::new(),
            content: String::new(),
            upload: Some(("grid.pdf".to_owned(), vec![1, 2, 3])),
        };
        assert!(!form.is_complete());

        let form = InterviewUpload {
            subject_id: Some(1),
            title: "Grid questions".to_owned(),
            content: String::new(),
            upload: Some(("grid.pdf".to_owned(), vec![1, 2, 3])),
        };
        assert!(!form.is_complete());
    }

    #[test]
    fn interview_form_is_complete_without_a_pdf() {
        let form = InterviewUpload {
            subject_id: Some(1),
            title: "Grid questions".to_owned(),
            content: "Answer set.".to_owned(),
            upload: None,
        };
        assert!(form.is_complete());
    }
}
