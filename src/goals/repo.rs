use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Lifecycle status of a goal. Any transition between states is allowed;
/// completed goals can move back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal_status", rename_all = "snake_case")]
pub enum GoalStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal_priority", rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    pub category: String,
    pub due_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Optional narrowing applied to `list_by_user`. Default is no filtering.
#[derive(Debug, Default)]
pub struct GoalFilter {
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// New-goal fields supplied by the caller; everything else is assigned by
/// the store (id, pending status, timestamps).
#[derive(Debug)]
pub struct NewGoal<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub priority: GoalPriority,
    pub category: &'a str,
    pub due_date: Option<Date>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
    pub due_date: Option<Date>,
}

const GOAL_COLUMNS: &str = "id, user_id, title, description, status, priority, category, \
                            due_date, created_at, updated_at";

impl Goal {
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        filter: &GoalFilter,
    ) -> Result<Vec<Goal>, sqlx::Error> {
        sqlx::query_as::<_, Goal>(&format!(
            r#"
            SELECT {GOAL_COLUMNS}
            FROM goals
            WHERE user_id = $1
              AND ($2::goal_status IS NULL OR status = $2)
              AND ($3::goal_priority IS NULL OR priority = $3)
              AND ($4::text IS NULL OR category = $4)
              AND ($5::text IS NULL OR title ILIKE '%' || $5 || '%')
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(filter.status)
        .bind(filter.priority)
        .bind(filter.category.as_deref())
        .bind(filter.search.as_deref())
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Goal>, sqlx::Error> {
        sqlx::query_as::<_, Goal>(&format!(
            r#"
            SELECT {GOAL_COLUMNS}
            FROM goals
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        new: NewGoal<'_>,
    ) -> Result<Goal, sqlx::Error> {
        sqlx::query_as::<_, Goal>(&format!(
            r#"
            INSERT INTO goals (user_id, title, description, priority, category, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.priority)
        .bind(new.category)
        .bind(new.due_date)
        .fetch_one(db)
        .await
    }

    pub async fn update(db: &PgPool, id: Uuid, patch: &GoalPatch) -> Result<Goal, sqlx::Error> {
        sqlx::query_as::<_, Goal>(&format!(
            r#"
            UPDATE goals
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4::goal_status, status),
                priority = COALESCE($5::goal_priority, priority),
                category = COALESCE($6, category),
                due_date = COALESCE($7, due_date),
                updated_at = now()
            WHERE id = $1
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.status)
        .bind(patch.priority)
        .bind(patch.category.as_deref())
        .bind(patch.due_date)
        .fetch_one(db)
        .await
    }

    /// Hard delete. Returns how many rows went away (0 or 1).
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
