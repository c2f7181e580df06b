//! Axum route handlers for the courses endpoints.
//!
//! Both endpoints answer with a `success` flag, so failures go through [`Envelope`].

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::courses::models::Course;
use crate::courses::similar::find_similar_courses;
use crate::errors::{AppError, Envelope};
use crate::state::AppState;

const RECOMMENDATION_FIELDS_REQUIRED: &str = "User interests and courses are required";
const SIMILAR_FIELDS_REQUIRED: &str = "Course title and description are required";

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(rename = "userInterests")]
    pub user_interests: Option<Vec<String>>,
    pub courses: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub courses: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarCoursesRequest {
    #[serde(rename = "courseTitle")]
    pub course_title: Option<String>,
    #[serde(rename = "courseDescription")]
    pub course_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SimilarCoursesResponse {
    pub success: bool,
    #[serde(rename = "similarCourses")]
    pub similar_courses: Value,
}

/// POST /courses/recommendations
///
/// Returns the caller's courses reordered by relevance to `userInterests`.
/// Model failures are recovered inside the resolver and never reach the caller.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, Envelope> {
    let required = || AppError::Validation(RECOMMENDATION_FIELDS_REQUIRED.to_string());

    let Json(request) = payload.map_err(|_| required())?;
    let (Some(interests), Some(raw_courses)) = (request.user_interests, request.courses) else {
        return Err(required().into());
    };

    let courses = raw_courses
        .into_iter()
        .map(Course::from_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.into()))?;

    let ranked = state.recommender.recommend(&interests, courses).await;

    Ok(Json(RecommendationResponse {
        success: true,
        courses: ranked.into_iter().map(Course::into_value).collect(),
    }))
}

/// POST /find-similar-courses
pub async fn handle_similar_courses(
    State(state): State<AppState>,
    payload: Result<Json<SimilarCoursesRequest>, JsonRejection>,
) -> Result<Json<SimilarCoursesResponse>, Envelope> {
    let required = || AppError::Validation(SIMILAR_FIELDS_REQUIRED.to_string());

    let Json(request) = payload.map_err(|_| required())?;
    let (Some(title), Some(description)) = (request.course_title, request.course_description)
    else {
        return Err(required().into());
    };

    let similar_courses = find_similar_courses(state.llm.as_ref(), &title, &description).await?;

    Ok(Json(SimilarCoursesResponse {
        success: true,
        similar_courses,
    }))
}
