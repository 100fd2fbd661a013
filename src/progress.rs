//! Video and topic completion tracking.
//!
//! Percentages are derived, never stored: every page view re-queries the
//! video rows and intersects them with the user's completion set.

use crate::db::get_db_pool;
use crate::orm::{subjects, topic_completions, topics, video_completions, videos};
use sea_orm::{entity::*, query::*, DbErr, Set};
use std::collections::{HashMap, HashSet};

/// Per-subject rollup shown on the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubjectProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: i32,
}

/// Per-topic rollup shown on the topic list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopicProgress {
    pub completed: usize,
    pub total: usize,
    pub done: bool,
}

/// floor(completed / total * 100); 0 when there are no videos.
pub fn percent(completed: usize, total: usize) -> i32 {
    if total == 0 {
        0
    } else {
        ((completed * 100) / total) as i32
    }
}

/// Ids of every video the user has completed.
pub async fn completed_video_ids(user_id: i32) -> Result<HashSet<i32>, DbErr> {
    let rows = video_completions::Entity::find()
        .filter(video_completions::Column::UserId.eq(user_id))
        .all(get_db_pool())
        .await?;
    Ok(rows.into_iter().map(|row| row.video_id).collect())
}

/// Progress for every subject, keyed by subject id.
pub async fn progress_by_subject(user_id: i32) -> Result<HashMap<i32, SubjectProgress>, DbErr> {
    let db = get_db_pool();
    let completed_ids = completed_video_ids(user_id).await?;

    let mut progress = HashMap::new();
    for subject in subjects::Entity::find().all(db).await? {
        let topic_rows = topics::Entity::find()
            .filter(topics::Column::SubjectId.eq(subject.id))
            .all(db)
            .await?;

        let mut total = 0;
        let mut completed = 0;
        for topic in &topic_rows {
            let video_rows = videos::Entity::find()
                .filter(videos::Column::TopicId.eq(topic.id))
                .all(db)
                .await?;
            total += video_rows.len();
            completed += video_rows
                .iter()
                .filter(|video| completed_ids.contains(&video.id))
                .count();
        }

        progress.insert(
            subject.id,
            SubjectProgress {
                completed,
                total,
                percent: percent(completed, total),
            },
        );
    }

    Ok(progress)
}

/// Progress for every topic under one subject, keyed by topic id.
pub async fn progress_by_topic(
    user_id: i32,
    subject_id: i32,
) -> Result<HashMap<i32, TopicProgress>, DbErr> {
    let db = get_db_pool();
    let completed_ids = completed_video_ids(user_id).await?;

    let mut progress = HashMap::new();
    for topic in topics::Entity::find()
        .filter(topics::Column::SubjectId.eq(subject_id))
        .all(db)
        .await?
    {
        let video_rows = videos::Entity::find()
            .filter(videos::Column::TopicId.eq(topic.id))
            .all(db)
            .await?;
        let total = video_rows.len();
        let completed = video_rows
            .iter()
            .filter(|video| completed_ids.contains(&video.id))
            .count();

        progress.insert(
            topic.id,
            TopicProgress {
                completed,
                total,
                done: total > 0 && completed == total,
            },
        );
    }

    Ok(progress)
}

/// A topic is done iff it has at least one video and all are completed.
pub fn topic_done(video_ids: &[i32], completed_ids: &HashSet<i32>) -> bool {
    !video_ids.is_empty() && video_ids.iter().all(|id| completed_ids.contains(id))
}

/// Record a video completion. Idempotent: a second call is a no-op.
pub async fn complete_video(user_id: i32, video_id: i32) -> Result<(), DbErr> {
    let db = get_db_pool();
    let existing = video_completions::Entity::find()
        .filter(video_completions::Column::UserId.eq(user_id))
        .filter(video_completions::Column::VideoId.eq(video_id))
        .one(db)
        .await?;

    if existing.is_none() {
        video_completions::Entity::insert(video_completions::ActiveModel {
            user_id: Set(user_id),
            video_id: Set(video_id),
            ..Default::default()
        })
        .exec(db)
        .await?;
    }

    Ok(())
}

/// Remove a video completion. No-op when the pair does not exist.
pub async fn uncomplete_video(user_id: i32, video_id: i32) -> Result<(), DbErr> {
    video_completions::Entity::delete_many()
        .filter(video_completions::Column::UserId.eq(user_id))
        .filter(video_completions::Column::VideoId.eq(video_id))
        .exec(get_db_pool())
        .await?;
    Ok(())
}

/// Record a topic completion. Idempotent like [`complete_video`].
pub async fn complete_topic(user_id: i32, topic_id: i32) -> Result<(), DbErr> {
    let db = get_db_pool();
    let existing = topic_completions::Entity::find()
        .filter(topic_completions::Column::UserId.eq(user_id))
        .filter(topic_completions::Column::TopicId.eq(topic_id))
        .one(db)
        .await?;

    if existing.is_none() {
        topic_completions::Entity::insert(topic_completions::ActiveModel {
            user_id: Set(user_id),
            topic_id: Set(topic_id),
            ..Default::default()
        })
        .exec(db)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_floored() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 66);
        assert_eq!(percent(1, 2), 50);
    }

    #[test]
    fn percent_of_empty_topic_is_zero() {
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn percent_stays_in_bounds() {
        for total in 0..20usize {
            for completed in 0..=total {
                let p = percent(completed, total);
                assert!((0..=100).contains(&p), "percent({completed},{total})={p}");
            }
        }
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn topic_without_videos_is_never_done() {
        assert!(!topic_done(&[], &HashSet::new()));
    }

    #[test]
    fn topic_done_requires_every_video() {
        let completed: HashSet<i32> = [1, 2].into_iter().collect();
        assert!(topic_done(&[1, 2], &completed));
        assert!(!topic_done(&[1, 2, 3], &completed));
    }
}
