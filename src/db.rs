//! Database pool and one-time bootstrap.
//!
//! The pool is a process-wide singleton. Bootstrap (schema creation plus
//! seed content) runs at most once per process lifetime; `main` calls it
//! before binding the listener, and the double-checked guard keeps
//! concurrent first calls safe. A failed bootstrap is logged and the flag
//! left unset so the next call retries.

use crate::orm::{
    admin_message_reads, interview_preps, messages, notes, notification_reads, notifications,
    questions, subjects, topic_completions, topics, users, video_completions, videos,
};
use futures::lock::Mutex;
use once_cell::sync::{Lazy, OnceCell};
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::sync::atomic::{AtomicBool, Ordering};

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();
static BOOTSTRAPPED: AtomicBool = AtomicBool::new(false);
static BOOTSTRAP_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Connect the global pool. No-op if a pool is already set, so tests can
/// call this repeatedly.
pub async fn init_db(url: String) {
    if DB_POOL.get().is_some() {
        return;
    }

    let mut options = ConnectOptions::new(url.clone());
    options.sqlx_logging(false);
    if url.starts_with("sqlite") {
        // A pooled in-memory sqlite hands each connection its own database.
        options.max_connections(1);
    }

    let pool = Database::connect(options)
        .await
        .expect("Failed to connect to database.");

    if DB_POOL.set(pool).is_err() {
        log::warn!("init_db: pool was already initialized");
    }
}

pub fn get_db_pool() -> &'static DatabaseConnection {
    DB_POOL.get().expect("init_db() has not been called.")
}

/// Create all tables if they do not exist, then insert the seed catalogue
/// when the content store is empty. Idempotent.
pub async fn bootstrap(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_schema(db).await?;
    crate::seed::seed_content(db).await
}

/// Run [`bootstrap`] against the global pool at most once per process.
/// On failure the flag stays unset so a later call retries.
pub async fn ensure_bootstrapped() -> Result<(), DbErr> {
    if BOOTSTRAPPED.load(Ordering::Acquire) {
        return Ok(());
    }

    let _guard = BOOTSTRAP_LOCK.lock().await;
    if BOOTSTRAPPED.load(Ordering::Acquire) {
        return Ok(());
    }

    match bootstrap(get_db_pool()).await {
        Ok(()) => {
            BOOTSTRAPPED.store(true, Ordering::Release);
            log::info!("database bootstrap complete");
            Ok(())
        }
        Err(e) => {
            log::error!("database bootstrap failed: {}", e);
            Err(e)
        }
    }
}

/// Create every table from its entity definition. Parent tables first so
/// foreign keys resolve.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements: Vec<TableCreateStatement> = vec![
        schema.create_table_from_entity(subjects::Entity),
        schema.create_table_from_entity(topics::Entity),
        schema.create_table_from_entity(videos::Entity),
        schema.create_table_from_entity(notes::Entity),
        schema.create_table_from_entity(questions::Entity),
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(topic_completions::Entity),
        schema.create_table_from_entity(video_completions::Entity),
        schema.create_table_from_entity(messages::Entity),
        schema.create_table_from_entity(notifications::Entity),
        schema.create_table_from_entity(notification_reads::Entity),
        schema.create_table_from_entity(interview_preps::Entity),
        schema.create_table_from_entity(admin_message_reads::Entity),
    ];

    for statement in statements.iter_mut() {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}
