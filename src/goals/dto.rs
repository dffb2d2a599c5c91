use serde::{Deserialize, Serialize};
use time::{serde::rfc3339, Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::{Goal, GoalPriority, GoalStatus};

/// Request body for creating a goal.
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
    pub due_date: Option<Date>,
}

/// Request body for updating a goal; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
    pub due_date: Option<Date>,
}

/// Query-string filters accepted when listing goals.
#[derive(Debug, Default, Deserialize)]
pub struct ListGoalsQuery {
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    pub category: String,
    pub due_date: Option<Date>,
    #[serde(with = "rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Goal> for GoalResponse {
    fn from(g: Goal) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            status: g.status,
            priority: g.priority,
            category: g.category,
            due_date: g.due_date,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_priority_use_snake_case() {
        assert_eq!(
            serde_json::to_string(&GoalStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&GoalPriority::High).unwrap(),
            "\"high\""
        );
        let status: GoalStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, GoalStatus::InProgress);
    }

    #[test]
    fn update_request_with_empty_body_changes_nothing() {
        let patch: UpdateGoalRequest = serde_json::from_str("{}").unwrap();
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert!(patch.status.is_none());
        assert!(patch.priority.is_none());
        assert!(patch.category.is_none());
        assert!(patch.due_date.is_none());
    }

    #[test]
    fn update_request_accepts_partial_fields() {
        let patch: UpdateGoalRequest =
            serde_json::from_str(r#"{"status": "completed", "title": "ship it"}"#).unwrap();
        assert_eq!(patch.status, Some(GoalStatus::Completed));
        assert_eq!(patch.title.as_deref(), Some("ship it"));
        assert!(patch.priority.is_none());
    }

    #[test]
    fn goal_response_preserves_field_values() {
        let now = OffsetDateTime::now_utc();
        let goal = Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "learn rust".to_string(),
            description: Some("one chapter a day".to_string()),
            status: GoalStatus::Pending,
            priority: GoalPriority::Medium,
            category: "learning".to_string(),
            due_date: None,
            created_at: now,
            updated_at: now,
        };

        let response = GoalResponse::from(goal.clone());
        assert_eq!(response.id, goal.id);
        assert_eq!(response.title, goal.title);
        assert_eq!(response.description, goal.description);
        assert_eq!(response.status, goal.status);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["category"], "learning");
        assert!(json["due_date"].is_null());
        // owner id is not part of the response body
        assert!(json.get("user_id").is_none());
    }
}
