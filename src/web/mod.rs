pub mod account;
pub mod admin;
pub mod contact;
pub mod index;
pub mod interview;
pub mod learning;
pub mod login;
pub mod logout;
pub mod notifications;
pub mod register;
pub mod subjects;

use actix_web::http::header;
use actix_web::HttpResponse;

/// Configures the web app by adding services from each web file.
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    // Route resolution stops at the first match, so admin routes go first.
    admin::configure(conf);
    account::configure(conf);
    contact::configure(conf);
    index::configure(conf);
    interview::configure(conf);
    learning::configure(conf);
    login::configure(conf);
    logout::configure(conf);
    notifications::configure(conf);
    register::configure(conf);
    subjects::configure(conf);
}

pub fn redirect(to: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, to.to_owned()))
        .finish()
}
