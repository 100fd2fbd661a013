use crate::db::get_db_pool;
use crate::orm::users;
use crate::session;
use crate::user::Profile;
use crate::web::redirect;
use actix_session::Session;
use actix_web::dev::Payload;
use actix_web::{error, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sea_orm::EntityTrait;

/// Client data resolved once per request from the cookie session.
/// A `None` client is a guest. The admin flag is independent of the
/// student login; the admin is not a user row.
#[derive(Clone, Debug, Default)]
pub struct ClientCtxInner {
    pub client: Option<Profile>,
    pub is_admin: bool,
    /// Unread broadcast notifications for the logged-in student.
    pub unread_notifications: i64,
    /// Whether the latest admin reply postdates the student's seen marker.
    pub admin_reply_unread: bool,
}

/// Client context passed to routes and templates.
#[derive(Clone, Debug, Default)]
pub struct ClientCtx(ClientCtxInner);

impl ClientCtx {
    pub async fn from_session(session: &Session) -> Self {
        let mut inner = ClientCtxInner {
            is_admin: session::is_admin(session),
            ..Default::default()
        };

        if let Some(user_id) = session::user_id(session) {
            // A stale cookie for a deleted user degrades to a guest.
            match users::Entity::find_by_id(user_id).one(get_db_pool()).await {
                Ok(Some(user)) => {
                    // Unread badges degrade to zero/false rather than
                    // failing the whole request.
                    inner.unread_notifications = crate::notifications::count_unread(user.id)
                        .await
                        .unwrap_or_else(|e| {
                            log::error!("ClientCtx: unread notification count failed: {}", e);
                            0
                        });
                    inner.admin_reply_unread = crate::messaging::has_unread_admin_reply(&user)
                        .await
                        .unwrap_or_else(|e| {
                            log::error!("ClientCtx: admin reply check failed: {}", e);
                            false
                        });
                    inner.client = Some(user.into());
                }
                Ok(None) => {}
                Err(e) => log::error!("ClientCtx: user lookup failed: {}", e),
            }
        }

        Self(inner)
    }

    pub fn get_id(&self) -> Option<i32> {
        self.0.client.as_ref().map(|u| u.id)
    }

    pub fn get_user(&self) -> Option<&Profile> {
        self.0.client.as_ref()
    }

    /// Returns either the user's name or the word for guest.
    pub fn get_name(&self) -> String {
        match &self.0.client {
            Some(user) => user.name.to_owned(),
            None => "Guest".to_owned(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.0.client.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }

    pub fn get_unread_notifications(&self) -> i64 {
        self.0.unread_notifications
    }

    pub fn has_unread_admin_reply(&self) -> bool {
        self.0.admin_reply_unread
    }

    /// Require a logged-in student; guests are bounced to the login page.
    pub fn require_login(&self) -> Result<i32, Error> {
        match self.get_id() {
            Some(id) => Ok(id),
            None => Err(error::InternalError::from_response(
                "login required",
                redirect("/login"),
            )
            .into()),
        }
    }

    /// Require the admin session flag; otherwise bounce to the admin login.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.0.is_admin {
            Ok(())
        } else {
            Err(error::InternalError::from_response(
                "admin required",
                redirect("/admin/login"),
            )
            .into())
        }
    }
}

/// Provides the `client: ClientCtx` parameter of route functions.
impl FromRequest for ClientCtx {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = Session::extract(req).into_inner();

        Box::pin(async move {
            match session {
                Ok(session) => Ok(ClientCtx::from_session(&session).await),
                Err(e) => {
                    log::error!("ClientCtx: unable to extract session: {}", e);
                    Ok(ClientCtx::default())
                }
            }
        })
    }
}
