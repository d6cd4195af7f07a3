use sqlx::PgPool;

use crate::models::{Category, Horse};

/// All horses drafted into a category.
pub async fn get_horses_by_category(
    pool: &PgPool,
    category_id: i32,
) -> anyhow::Result<Vec<Horse>> {
    let horses =
        sqlx::query_as::<_, Horse>("SELECT * FROM horses WHERE category_id = $1 ORDER BY id")
            .bind(category_id)
            .fetch_all(pool)
            .await?;

    Ok(horses)
}

pub async fn get_horse_by_id(pool: &PgPool, id: i32) -> anyhow::Result<Option<Horse>> {
    let horse = sqlx::query_as::<_, Horse>("SELECT * FROM horses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(horse)
}

pub async fn get_categories(pool: &PgPool) -> anyhow::Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

pub async fn get_category_by_id(pool: &PgPool, id: i32) -> anyhow::Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}
