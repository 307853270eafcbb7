//! Bottom-up progress aggregation: concept → topic → course.
//!
//! The aggregation policy is deliberately uniform: topic progress counts
//! completed concepts discretely, and course progress is the plain
//! arithmetic mean of per-concept percentages. No time or complexity
//! weighting is applied at any level.

use chrono::Utc;

use super::record::{CourseProgress, CourseStatus, ProgressSnapshot};
use crate::course::{Course, Topic};

/// Topic progress: completed concepts over total concepts, as a percentage.
///
/// Each concept weighs the same regardless of its estimated time or
/// complexity. An empty topic reports 0.
#[must_use]
pub fn topic_progress(topic: &Topic, snapshot: &ProgressSnapshot) -> f64 {
    if topic.concepts.is_empty() {
        return 0.0;
    }
    let completed = topic
        .concepts
        .iter()
        .filter(|id| snapshot.record(id).is_some_and(|r| r.is_completed()))
        .count();
    completed as f64 / topic.concepts.len() as f64 * 100.0
}

/// Course progress: the arithmetic mean of every contained concept's
/// individual progress percentage.
///
/// Untouched concepts contribute 0; topics carry no weight of their own.
/// An empty course reports 0.
#[must_use]
pub fn course_overall_progress(course: &Course, snapshot: &ProgressSnapshot) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for id in course.concept_ids() {
        total += snapshot.record(id).map_or(0.0, |r| r.progress_percent());
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Recomputes the document's derived aggregates from its concept records.
///
/// Status derives from `overall_progress`: 0 → not started, 100 →
/// completed, anything in between → in progress. `started_at` is set once
/// on the first transition away from 0 and `completed_at` once on reaching
/// 100; neither is ever cleared or overwritten.
pub fn recompute_rollup(doc: &mut CourseProgress, course: &Course) {
    let overall = course_overall_progress(course, &doc.concepts);
    doc.overall_progress = overall;

    let stamp = doc.updated_at.unwrap_or_else(Utc::now);
    if overall <= 0.0 {
        doc.status = CourseStatus::NotStarted;
    } else if overall >= 100.0 {
        doc.status = CourseStatus::Completed;
        if doc.started_at.is_none() {
            doc.started_at = Some(stamp);
        }
        if doc.completed_at.is_none() {
            doc.completed_at = Some(stamp);
        }
    } else {
        doc.status = CourseStatus::InProgress;
        if doc.started_at.is_none() {
            doc.started_at = Some(stamp);
        }
    }
}
