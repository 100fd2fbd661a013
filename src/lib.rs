pub mod db;
pub mod filesystem;
pub mod messaging;
pub mod middleware;
pub mod notifications;
pub mod orm;
pub mod progress;
pub mod seed;
pub mod session;
pub mod user;
pub mod web;
