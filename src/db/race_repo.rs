use sqlx::PgPool;

use crate::models::{NewRace, Race};

/// Insert a new race result. Race rows are insert-only; there is no update
/// or delete path.
pub async fn insert_race(pool: &PgPool, new_race: &NewRace) -> anyhow::Result<Race> {
    let race = sqlx::query_as::<_, Race>(
        r#"
        INSERT INTO races (race, odds, point, result, date, horse_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&new_race.race)
    .bind(new_race.odds)
    .bind(new_race.point)
    .bind(new_race.result)
    .bind(new_race.date)
    .bind(new_race.horse_id)
    .fetch_one(pool)
    .await?;

    Ok(race)
}

/// All race entries for a horse, oldest first.
pub async fn get_races_by_horse(pool: &PgPool, horse_id: i32) -> anyhow::Result<Vec<Race>> {
    let races = sqlx::query_as::<_, Race>(
        "SELECT * FROM races WHERE horse_id = $1 ORDER BY date, id",
    )
    .bind(horse_id)
    .fetch_all(pool)
    .await?;

    Ok(races)
}

/// Race entries for every horse in a category, grouped per horse id.
pub async fn get_races_for_category(
    pool: &PgPool,
    category_id: i32,
) -> anyhow::Result<Vec<Race>> {
    let races = sqlx::query_as::<_, Race>(
        r#"
        SELECT r.* FROM races r
        JOIN horses h ON h.id = r.horse_id
        WHERE h.category_id = $1
        ORDER BY r.date, r.id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(races)
}
