use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::dto::{CreateGoalRequest, GoalResponse, ListGoalsQuery, UpdateGoalRequest};
use super::repo::{Goal, GoalFilter, GoalPatch, GoalPriority, NewGoal};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals))
        .route("/goals/:id", get(get_goal))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", axum::routing::post(create_goal))
        .route(
            "/goals/:id",
            axum::routing::put(update_goal).delete(delete_goal),
        )
}

const MAX_TITLE_CHARS: usize = 500;

fn validate_title(title: &str) -> Result<&str, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ApiError::Validation("title is too long".into()));
    }
    Ok(title)
}

fn ensure_owner(goal: &Goal, user_id: Uuid) -> Result<(), ApiError> {
    if goal.user_id != user_id {
        warn!(
            goal_id = %goal.id,
            owner = %goal.user_id,
            requester = %user_id,
            "ownership violation"
        );
        return Err(ApiError::Forbidden("goal belongs to another user".into()));
    }
    Ok(())
}

/// Loads a goal and checks it belongs to the caller. Unknown id is 404;
/// a foreign owner is 403.
async fn load_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> ApiResult<Goal> {
    let goal = Goal::find_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("goal not found".into()))?;
    ensure_owner(&goal, user_id)?;
    Ok(goal)
}

#[instrument(skip(state))]
pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<ListGoalsQuery>,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let filter = GoalFilter {
        status: q.status,
        priority: q.priority,
        category: q.category,
        search: q.search,
    };
    let goals = Goal::list_by_user(&state.db, user_id, &filter).await?;
    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = load_owned(&state.db, user_id, id).await?;
    Ok(Json(goal.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    let title = validate_title(&payload.title)?;

    let new = NewGoal {
        title,
        description: payload.description.as_deref(),
        priority: payload.priority.unwrap_or(GoalPriority::Medium),
        category: payload.category.as_deref().unwrap_or("general"),
        due_date: payload.due_date,
    };
    let goal = Goal::insert(&state.db, user_id, new).await?;

    info!(goal_id = %goal.id, user_id = %user_id, "goal created");
    Ok((StatusCode::CREATED, Json(goal.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGoalRequest>,
) -> ApiResult<Json<GoalResponse>> {
    load_owned(&state.db, user_id, id).await?;

    let title = match payload.title {
        Some(t) => Some(validate_title(&t)?.to_string()),
        None => None,
    };
    let patch = GoalPatch {
        title,
        description: payload.description,
        status: payload.status,
        priority: payload.priority,
        category: payload.category,
        due_date: payload.due_date,
    };
    let goal = Goal::update(&state.db, id, &patch).await?;

    info!(goal_id = %goal.id, user_id = %user_id, status = ?goal.status, "goal updated");
    Ok(Json(goal.into()))
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    load_owned(&state.db, user_id, id).await?;
    Goal::delete(&state.db, id).await?;

    info!(goal_id = %id, user_id = %user_id, "goal deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::repo::GoalStatus;
    use time::OffsetDateTime;

    fn goal_owned_by(user_id: Uuid) -> Goal {
        let now = OffsetDateTime::now_utc();
        Goal {
            id: Uuid::new_v4(),
            user_id,
            title: "run a marathon".to_string(),
            description: None,
            status: GoalStatus::Pending,
            priority: GoalPriority::Medium,
            category: "general".to_string(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  run  ").unwrap(), "run");
    }

    #[test]
    fn empty_or_blank_title_is_rejected() {
        assert!(matches!(
            validate_title(""),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_title("   "),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn oversized_title_is_rejected() {
        let long = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(matches!(
            validate_title(&long),
            Err(ApiError::Validation(_))
        ));
        let at_limit = "x".repeat(MAX_TITLE_CHARS);
        assert!(validate_title(&at_limit).is_ok());
    }

    #[test]
    fn owner_passes_ownership_check() {
        let user_id = Uuid::new_v4();
        let goal = goal_owned_by(user_id);
        assert!(ensure_owner(&goal, user_id).is_ok());
    }

    #[test]
    fn foreign_user_is_forbidden_regardless_of_payload() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let goal = goal_owned_by(owner);
        assert!(matches!(
            ensure_owner(&goal, stranger),
            Err(ApiError::Forbidden(_))
        ));
    }
}
