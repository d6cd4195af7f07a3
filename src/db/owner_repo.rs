use sqlx::PgPool;

use crate::models::Owner;

/// All owners, in draft order.
pub async fn get_owners(pool: &PgPool) -> anyhow::Result<Vec<Owner>> {
    let owners = sqlx::query_as::<_, Owner>("SELECT * FROM owners ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(owners)
}

pub async fn get_owner_by_id(pool: &PgPool, id: i32) -> anyhow::Result<Option<Owner>> {
    let owner = sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(owner)
}
