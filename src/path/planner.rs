//! Course-level path planning.
//!
//! Used when the caller selects courses or supplies a free-text goal instead
//! of a single concept: candidate courses are matched by keyword, ranked by
//! fit, and laid out as ordered study steps with explicit completion
//! criteria and a duration estimate.

use serde::{Deserialize, Serialize};

use super::errors::PathError;
use crate::config::EngineConfig;
use crate::course::{Course, CourseCatalog};
use crate::graph::ConceptGraph;
use crate::progress::ActivityKind;
use crate::types::{CourseId, SkillLevel, TimeAvailability};

/// What a learner must do to finish one study step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCriterion {
    /// Minimum quiz score across the step's concepts.
    pub min_score: u8,
    /// Sub-activities every concept in the step requires.
    pub required_activities: Vec<ActivityKind>,
    /// Prerequisite mastery needed to keep unlocking within the step.
    pub mastery_threshold: u8,
}

/// One course in a study plan, in recommended order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    pub course_id: CourseId,
    pub title: String,
    pub level: SkillLevel,
    pub rating: f32,
    pub estimated_hours: f32,
    pub completion: CompletionCriterion,
}

/// An ordered list of study steps plus the overall duration estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub steps: Vec<PlanStep>,
    pub total_hours: f32,
    /// Weekly budget resolved from the caller's time-availability bucket.
    pub weekly_hours: f32,
    /// `ceil(total_hours / weekly_hours)`, in weeks.
    pub duration_weeks: u32,
}

/// Ranks candidate courses and lays them out as a study plan.
pub struct CoursePlanner<'a> {
    catalog: &'a CourseCatalog,
    graph: &'a ConceptGraph,
    config: EngineConfig,
}

impl<'a> CoursePlanner<'a> {
    #[must_use]
    pub fn new(catalog: &'a CourseCatalog, graph: &'a ConceptGraph, config: EngineConfig) -> Self {
        Self {
            catalog,
            graph,
            config,
        }
    }

    /// Plans over every course matching `keyword`.
    ///
    /// # Errors
    ///
    /// [`PathError::NoMatchingCourses`] when nothing matches.
    pub fn plan_by_keyword(
        &self,
        keyword: &str,
        level: SkillLevel,
        time: TimeAvailability,
    ) -> Result<StudyPlan, PathError> {
        let candidates: Vec<&Course> = self
            .catalog
            .courses()
            .filter(|c| c.matches_keyword(keyword))
            .collect();
        if candidates.is_empty() {
            return Err(PathError::NoMatchingCourses {
                keyword: keyword.to_string(),
            });
        }
        tracing::debug!(keyword, candidates = candidates.len(), "planning by keyword");
        Ok(self.build_plan(rank(candidates, level), time))
    }

    /// Plans over an explicit course selection.
    ///
    /// # Errors
    ///
    /// [`PathError::CourseNotFound`] for any unknown id.
    pub fn plan_for_courses(
        &self,
        ids: &[CourseId],
        level: SkillLevel,
        time: TimeAvailability,
    ) -> Result<StudyPlan, PathError> {
        let mut candidates = Vec::with_capacity(ids.len());
        for id in ids {
            let course = self
                .catalog
                .get(id)
                .ok_or_else(|| PathError::CourseNotFound { id: id.clone() })?;
            candidates.push(course);
        }
        if candidates.is_empty() {
            return Err(PathError::NoMatchingCourses {
                keyword: String::new(),
            });
        }
        Ok(self.build_plan(rank(candidates, level), time))
    }

    fn build_plan(&self, ranked: Vec<&Course>, time: TimeAvailability) -> StudyPlan {
        let steps: Vec<PlanStep> = ranked
            .iter()
            .map(|course| PlanStep {
                course_id: course.id.clone(),
                title: course.title.clone(),
                level: course.level,
                rating: course.rating,
                estimated_hours: course.total_hours(self.graph),
                completion: CompletionCriterion {
                    min_score: self.config.default_quiz_passing_score,
                    required_activities: ActivityKind::ALL.to_vec(),
                    mastery_threshold: self.config.mastery_threshold,
                },
            })
            .collect();

        let total_hours: f32 = steps.iter().map(|s| s.estimated_hours).sum();
        let weekly_hours = time.weekly_hours();
        let duration_weeks = (total_hours / weekly_hours).ceil() as u32;

        StudyPlan {
            steps,
            total_hours,
            weekly_hours,
            duration_weeks,
        }
    }
}

/// Orders candidates by level distance ascending, then rating descending.
/// The course id is the final key so equal candidates keep a stable order.
fn rank(mut candidates: Vec<&Course>, level: SkillLevel) -> Vec<&Course> {
    candidates.sort_by(|a, b| {
        a.level
            .distance(level)
            .cmp(&b.level.distance(level))
            .then_with(|| b.rating.total_cmp(&a.rating))
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates
}
