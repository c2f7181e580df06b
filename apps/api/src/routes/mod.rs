pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::courses::handlers as courses;
use crate::learning_path::handlers as learning_path;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment
        .route("/grade", post(assessment::handle_grade))
        .route("/quiz", post(assessment::handle_quiz))
        .route("/quiz/feedback", post(assessment::handle_quiz_feedback))
        // Learning paths
        .route("/roadmap", post(learning_path::handle_roadmap))
        .route(
            "/generate-module-suggestions",
            post(learning_path::handle_module_suggestions),
        )
        // Profile
        .route("/assign-student-tags", post(profile::handle_assign_tags))
        // Courses
        .route(
            "/courses/recommendations",
            post(courses::handle_recommendations),
        )
        .route("/find-similar-courses", post(courses::handle_similar_courses))
        .with_state(state)
}
