//! CRUD over the `items` table. Every statement commits on its own.

use crate::error::AppError;
use crate::model::{Item, ItemChanges, NewItem};
use sqlx::SqlitePool;

pub struct ItemService;

impl ItemService {
    /// Insert one row and return it with its assigned id.
    pub async fn create(pool: &SqlitePool, item: &NewItem) -> Result<Item, AppError> {
        let sql = "INSERT INTO items (name, description) VALUES (?, ?) RETURNING id, name, description";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(&item.name)
            .bind(&item.description)
            .fetch_one(pool)
            .await?;
        tracing::info!(id = row.id, "item created");
        Ok(row)
    }

    /// Fetch one row by id.
    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Item>, AppError> {
        let sql = "SELECT id, name, description FROM items WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// All rows in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Item>, AppError> {
        let sql = "SELECT id, name, description FROM items ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Item>(sql).fetch_all(pool).await?;
        Ok(rows)
    }

    /// Overwrite the supplied fields of one row. Returns the updated row, or None for an unknown id.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, AppError> {
        let sql = "UPDATE items SET name = COALESCE(?, name), description = COALESCE(?, description) \
                   WHERE id = ? RETURNING id, name, description";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if row.is_some() {
            tracing::info!(id, "item updated");
        }
        Ok(row)
    }

    /// Delete one row by id. Returns false when no row had that id.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM items WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(pool).await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(id, "item deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::{connect, ensure_items_table};

    async fn pool() -> SqlitePool {
        let pool = connect(&AppConfig::testing()).await.unwrap();
        ensure_items_table(&pool).await.unwrap();
        pool
    }

    fn new_item(name: &str, description: &str) -> NewItem {
        NewItem {
            name: name.into(),
            description: description.into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let pool = pool().await;
        let a = ItemService::create(&pool, &new_item("John", "bla")).await.unwrap();
        let b = ItemService::create(&pool, &new_item("Jane", "bla2")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(ItemService::read(&pool, 2).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let pool = pool().await;
        let a = ItemService::create(&pool, &new_item("John", "bla")).await.unwrap();
        let b = ItemService::create(&pool, &new_item("Jane", "bla2")).await.unwrap();
        assert!(ItemService::delete(&pool, b.id).await.unwrap());
        let c = ItemService::create(&pool, &new_item("Eric", "bla3")).await.unwrap();
        assert!(c.id > b.id);
        assert!(c.id > a.id);
    }

    #[tokio::test]
    async fn update_keeps_absent_fields() {
        let pool = pool().await;
        let item = ItemService::create(&pool, &new_item("John", "bla")).await.unwrap();
        let changes = ItemChanges {
            name: Some("X".into()),
            description: None,
        };
        let updated = ItemService::update(&pool, item.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "X");
        assert_eq!(updated.description, "bla");
    }

    #[tokio::test]
    async fn unknown_id_is_none_not_error() {
        let pool = pool().await;
        assert_eq!(ItemService::read(&pool, 42).await.unwrap(), None);
        assert_eq!(
            ItemService::update(&pool, 42, &ItemChanges::default()).await.unwrap(),
            None
        );
        assert!(!ItemService::delete(&pool, 42).await.unwrap());
    }

    #[tokio::test]
    async fn list_reflects_creates_update_and_delete() {
        let pool = pool().await;
        for i in 0..4 {
            ItemService::create(&pool, &new_item(&format!("n{}", i), "d")).await.unwrap();
        }
        let changes = ItemChanges {
            name: None,
            description: Some("changed".into()),
        };
        ItemService::update(&pool, 2, &changes).await.unwrap();
        ItemService::delete(&pool, 3).await.unwrap();

        let rows = ItemService::list(&pool).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(rows[1].description, "changed");
    }
}
