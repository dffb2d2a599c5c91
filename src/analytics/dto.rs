use serde::Serialize;

/// Aggregate counts and ratios derived from a user's goals.
#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// completed / total; 0.0 when there are no goals.
    pub completion_ratio: f64,
    pub priority: PriorityBreakdown,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}
