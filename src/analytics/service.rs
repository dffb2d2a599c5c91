use std::collections::BTreeMap;

use super::dto::{AnalyticsReport, CategoryCount, PriorityBreakdown};
use crate::goals::repo::{Goal, GoalPriority, GoalStatus};

/// Folds a user's goals into summary statistics. Pure computation; the
/// category list is sorted by name so output is stable.
pub fn summarize(goals: &[Goal]) -> AnalyticsReport {
    let total = goals.len();
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    let mut low = 0;
    let mut medium = 0;
    let mut high = 0;
    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();

    for goal in goals {
        match goal.status {
            GoalStatus::Pending => pending += 1,
            GoalStatus::InProgress => in_progress += 1,
            GoalStatus::Completed => completed += 1,
        }
        match goal.priority {
            GoalPriority::Low => low += 1,
            GoalPriority::Medium => medium += 1,
            GoalPriority::High => high += 1,
        }
        *categories.entry(goal.category.as_str()).or_default() += 1;
    }

    let completion_ratio = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };

    AnalyticsReport {
        total,
        pending,
        in_progress,
        completed,
        completion_ratio,
        priority: PriorityBreakdown { low, medium, high },
        categories: categories
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn goal(status: GoalStatus, priority: GoalPriority, category: &str) -> Goal {
        let now = OffsetDateTime::now_utc();
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "a goal".to_string(),
            description: None,
            status,
            priority,
            category: category.to_string(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_input_yields_zero_ratio() {
        let report = summarize(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.completed, 0);
        assert_eq!(report.completion_ratio, 0.0);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn two_of_three_completed() {
        let goals = vec![
            goal(GoalStatus::Pending, GoalPriority::Medium, "general"),
            goal(GoalStatus::Completed, GoalPriority::Medium, "general"),
            goal(GoalStatus::Completed, GoalPriority::Medium, "general"),
        ];
        let report = summarize(&goals);
        assert_eq!(report.total, 3);
        assert_eq!(report.pending, 1);
        assert_eq!(report.in_progress, 0);
        assert_eq!(report.completed, 2);
        assert!((report.completion_ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn priorities_and_categories_are_counted() {
        let goals = vec![
            goal(GoalStatus::Pending, GoalPriority::High, "health"),
            goal(GoalStatus::InProgress, GoalPriority::High, "health"),
            goal(GoalStatus::Pending, GoalPriority::Low, "work"),
        ];
        let report = summarize(&goals);
        assert_eq!(report.priority.high, 2);
        assert_eq!(report.priority.medium, 0);
        assert_eq!(report.priority.low, 1);

        // BTreeMap ordering: "health" before "work"
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].category, "health");
        assert_eq!(report.categories[0].count, 2);
        assert_eq!(report.categories[1].category, "work");
        assert_eq!(report.categories[1].count, 1);
    }
}
