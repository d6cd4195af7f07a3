use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ScoringRule;

/// A scoring pool, e.g. "2022-2023_normal". `rule` selects the ranking
/// formula and doubles as the URL path segment for the pool's pages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub rule: String,
}

impl Category {
    pub fn scoring_rule(&self) -> Option<ScoringRule> {
        ScoringRule::from_db_str(&self.rule)
    }
}
