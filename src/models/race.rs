use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One race entry for a horse: the odds it went off at, the base points
/// earned, and the placing (1 = win, 2/3 = placed, 0 or >3 = unplaced).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Race {
    pub id: i32,
    pub race: String,
    pub odds: Decimal,
    pub point: Decimal,
    pub result: i32,
    pub date: NaiveDate,
    pub horse_id: i32,
}

/// Submission body for `POST /api/race`. Field names match the wire format
/// (`horseId` etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRace {
    pub race: String,
    pub odds: Decimal,
    pub point: Decimal,
    pub result: i32,
    pub horse_id: i32,
    pub date: NaiveDate,
}
