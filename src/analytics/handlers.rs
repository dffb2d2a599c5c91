use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::ApiResult,
    goals::repo::{Goal, GoalFilter},
    state::AppState,
};

use super::dto::AnalyticsReport;
use super::service::summarize;

pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics))
}

#[instrument(skip(state))]
pub async fn analytics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<AnalyticsReport>> {
    let goals = Goal::list_by_user(&state.db, user_id, &GoalFilter::default()).await?;
    Ok(Json(summarize(&goals)))
}
