//! Recommendation Resolver: orders a caller's courses by relevance to their interests.
//!
//! The ranking model is asked first. Any failure of that call (transport, API
//! status, unparseable output, missing `recommendedItems`) falls back to a local
//! tag-matching scorer. Either way the result is a reordering of the input:
//! ranked courses first, the rest appended in their original order.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::courses::models::{Course, CourseId, CourseSummary};
use crate::courses::prompts::RECOMMENDATION_PROMPT;
use crate::llm_client::prompts::fill;
use crate::llm_client::{complete_json, CompletionBackend, CompletionOptions, LlmError};

/// Model output for the ranking prompt.
#[derive(Debug, Deserialize)]
pub struct RecommendationList {
    #[serde(rename = "recommendedItems")]
    pub recommended_items: Vec<Value>,
}

impl RecommendationList {
    /// Identifiers in model order. Entries that are neither strings nor numbers are dropped.
    pub fn ids(&self) -> Vec<CourseId> {
        self.recommended_items
            .iter()
            .filter_map(CourseId::from_value)
            .collect()
    }
}

pub struct RecommendationResolver {
    llm: Arc<dyn CompletionBackend>,
}

impl RecommendationResolver {
    pub fn new(llm: Arc<dyn CompletionBackend>) -> Self {
        Self { llm }
    }

    /// Returns `courses` reordered by relevance to `interests`. Never fails.
    pub async fn recommend(&self, interests: &[String], courses: Vec<Course>) -> Vec<Course> {
        if courses.is_empty() {
            return Vec::new();
        }

        let ranked_ids = match self.rank_with_model(interests, &courses).await {
            Ok(list) => {
                debug!(
                    "Model ranked {} of {} courses",
                    list.recommended_items.len(),
                    courses.len()
                );
                list.ids()
            }
            Err(e) => {
                warn!("AI recommendation failed: {e}. Using fallback method.");
                fallback_ranking(interests, &courses)
            }
        };

        assemble(courses, &ranked_ids)
    }

    async fn rank_with_model(
        &self,
        interests: &[String],
        courses: &[Course],
    ) -> Result<RecommendationList, LlmError> {
        let summaries: Vec<CourseSummary<'_>> = courses.iter().map(Course::summary).collect();
        let interests_json = serde_json::to_string(interests)?;
        let courses_json = serde_json::to_string(&summaries)?;
        let prompt = fill(
            RECOMMENDATION_PROMPT,
            &[
                ("interests", interests_json.as_str()),
                ("courses", courses_json.as_str()),
            ],
        );

        complete_json(self.llm.as_ref(), &prompt, &CompletionOptions::COURSE_RANKING).await
    }
}

/// Number of interests that equal one of the course's tags, ignoring case.
/// A repeated interest is counted every time it appears.
pub fn relevance_score(interests: &[String], course: &Course) -> usize {
    let tags: HashSet<String> = course.tags.iter().map(|t| t.to_lowercase()).collect();
    interests
        .iter()
        .filter(|interest| tags.contains(&interest.to_lowercase()))
        .count()
}

/// Local ranking used when the model is unavailable.
///
/// Courses scoring zero are left out. The sort is stable, so equal scores keep
/// their input order.
pub fn fallback_ranking(interests: &[String], courses: &[Course]) -> Vec<CourseId> {
    let mut scored: Vec<(&CourseId, usize)> = courses
        .iter()
        .map(|course| (&course.id, relevance_score(interests, course)))
        .filter(|(_, score)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored.into_iter().map(|(id, _)| id.clone()).collect()
}

/// Builds the final ordering: ranked ids resolved against the input (unknown ids
/// dropped, repeats ignored), then every course whose id was not ranked.
///
/// Ids match by JSON type first. A ranked id with no exact match falls back to
/// the same id written as the other type. When the input repeats an id, a ranked
/// id resolves to its last occurrence.
pub fn assemble(courses: Vec<Course>, ranked_ids: &[CourseId]) -> Vec<Course> {
    let order: Vec<usize> = {
        let mut lookup: HashMap<&CourseId, usize> = HashMap::with_capacity(courses.len());
        for (idx, course) in courses.iter().enumerate() {
            lookup.insert(&course.id, idx);
        }

        let resolve = |id: &CourseId| {
            lookup.get(id).copied().or_else(|| {
                id.alternate()
                    .and_then(|other| lookup.get(&other).copied())
            })
        };

        let mut ranked: HashSet<&CourseId> = HashSet::with_capacity(ranked_ids.len());
        let mut order = Vec::with_capacity(courses.len());

        for id in ranked_ids {
            match resolve(id) {
                Some(idx) => {
                    if ranked.insert(&courses[idx].id) {
                        order.push(idx);
                    }
                }
                None => debug!("Dropping unknown course id '{id}' from ranking"),
            }
        }

        order.extend(
            courses
                .iter()
                .enumerate()
                .filter(|(_, course)| !ranked.contains(&course.id))
                .map(|(idx, _)| idx),
        );
        order
    };

    let mut slots: Vec<Option<Course>> = courses.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
