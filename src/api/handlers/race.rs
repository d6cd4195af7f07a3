use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use metrics::counter;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::db::{horse_repo, race_repo};
use crate::errors::AppError;
use crate::models::NewRace;
use crate::AppState;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub persisted: bool,
    pub revalidated: bool,
}

/// POST /api/race — record one race result for a horse, then re-render the
/// pages the result shows up on.
///
/// Validation happens field by field before anything is written. If the
/// insert succeeds but regeneration fails, the error response says the row
/// is durable (`persisted: true`) so the organizer does not resubmit it.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SubmitResponse>, AppError> {
    let new_race = match validate(&body) {
        Ok(new_race) => new_race,
        Err(msg) => {
            counter!("race_submissions_rejected").increment(1);
            return Err(AppError::Validation(msg));
        }
    };

    let horse = horse_repo::get_horse_by_id(&state.db, new_race.horse_id)
        .await?
        .ok_or_else(|| {
            counter!("race_submissions_rejected").increment(1);
            AppError::NotFound(format!("horse {} not found", new_race.horse_id))
        })?;

    let race = race_repo::insert_race(&state.db, &new_race).await?;
    counter!("race_submissions_accepted").increment(1);
    tracing::info!(
        race = %race.race,
        horse = %horse.name,
        result = race.result,
        "Race result recorded"
    );

    // The row is committed from here on; a regeneration failure must not
    // pretend otherwise.
    state
        .site
        .revalidate_for_horse(&horse)
        .await
        .map_err(|e| {
            counter!("revalidation_failures").increment(1);
            AppError::Regeneration(e.to_string())
        })?;

    Ok(Json(SubmitResponse {
        success: true,
        persisted: true,
        revalidated: true,
    }))
}

/// Field-by-field validation, rejecting on the first failure with a
/// message naming the field.
fn validate(body: &Value) -> Result<NewRace, String> {
    let race = body
        .get("race")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or("race must be a non-empty string")?
        .to_string();

    let odds = decimal_field(body, "odds")?;
    let point = decimal_field(body, "point")?;

    let result = body
        .get("result")
        .and_then(Value::as_i64)
        .ok_or("result must be an integer")?;
    if !(0..=18).contains(&result) {
        return Err(format!("result must be between 0 and 18, got {result}"));
    }

    let horse_id = body
        .get("horseId")
        .and_then(Value::as_i64)
        .ok_or("horseId must be an integer")?;
    let horse_id =
        i32::try_from(horse_id).map_err(|_| format!("horseId out of range: {horse_id}"))?;

    let date = body
        .get("date")
        .and_then(Value::as_str)
        .ok_or("date must be a string")?;
    let date = parse_date(date).ok_or(format!("date is not a valid date: {date}"))?;

    Ok(NewRace {
        race,
        odds,
        point,
        result: result as i32,
        horse_id,
        date,
    })
}

fn decimal_field(body: &Value, field: &str) -> Result<Decimal, String> {
    let value = body.get(field).ok_or(format!("{field} must be a number"))?;
    match value {
        Value::Number(_) => {
            serde_json::from_value(value.clone()).map_err(|_| format!("{field} must be a number"))
        }
        _ => Err(format!("{field} must be a number")),
    }
}

/// Accept a plain date or a full timestamp, keeping the date part.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Some(date);
    }
    s.parse::<chrono::DateTime<chrono::Utc>>()
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "race": "Test Stakes",
            "odds": 4.5,
            "point": 10,
            "result": 1,
            "horseId": 7,
            "date": "2023-05-01",
        })
    }

    #[test]
    fn test_validate_accepts_well_formed_body() {
        let new_race = validate(&valid_body()).unwrap();
        assert_eq!(new_race.race, "Test Stakes");
        assert_eq!(new_race.horse_id, 7);
        assert_eq!(new_race.odds, "4.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_validate_rejects_empty_race_name() {
        let mut body = valid_body();
        body["race"] = json!("");
        assert!(validate(&body).unwrap_err().contains("race"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_result() {
        let mut body = valid_body();
        body["result"] = json!(19);
        assert!(validate(&body).unwrap_err().contains("result"));
    }

    #[test]
    fn test_validate_accepts_unplaced_result_zero() {
        let mut body = valid_body();
        body["result"] = json!(0);
        assert_eq!(validate(&body).unwrap().result, 0);
    }

    #[test]
    fn test_validate_rejects_stringly_typed_odds() {
        let mut body = valid_body();
        body["odds"] = json!("4.5");
        assert!(validate(&body).unwrap_err().contains("odds"));
    }

    #[test]
    fn test_validate_rejects_missing_horse_id() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("horseId");
        assert!(validate(&body).unwrap_err().contains("horseId"));
    }

    #[test]
    fn test_validate_rejects_horse_id_beyond_i32() {
        // 2^32 + 7 would alias onto horse 7 under a wrapping cast.
        let mut body = valid_body();
        body["horseId"] = json!(4_294_967_303_i64);
        let err = validate(&body).unwrap_err();
        assert!(err.contains("horseId out of range"));
    }

    #[test]
    fn test_validate_rejects_garbage_date() {
        let mut body = valid_body();
        body["date"] = json!("yesterday");
        assert!(validate(&body).unwrap_err().contains("date"));
    }

    #[test]
    fn test_parse_date_accepts_timestamp() {
        let date = parse_date("2023-05-01T10:30:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    }
}
