pub mod admin_message_reads;
pub mod interview_preps;
pub mod messages;
pub mod notes;
pub mod notification_reads;
pub mod notifications;
pub mod questions;
pub mod subjects;
pub mod topic_completions;
pub mod topics;
pub mod users;
pub mod video_completions;
pub mod videos;
