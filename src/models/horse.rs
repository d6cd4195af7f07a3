use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Gender, Region};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Horse {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub region: String,
    pub stable: String,
    pub url: String,
    /// Cleared when the horse is disqualified from the pool.
    pub enabled: bool,
    pub owner_id: i32,
    pub category_id: i32,
}

impl Horse {
    pub fn gender(&self) -> Option<Gender> {
        Gender::from_db_str(&self.gender)
    }

    pub fn region(&self) -> Option<Region> {
        Region::from_db_str(&self.region)
    }
}
