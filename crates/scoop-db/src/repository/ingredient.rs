//! # Ingredient Repository
//!
//! Database operations for ingredients. Insert-only; names are unique.
//!
//! SQLite has no NaN: a NaN quantity is stored as NULL and listed as NaN.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::resolve_insert;
use scoop_core::{Ingredient, InsertOutcome};

#[derive(Debug, sqlx::FromRow)]
struct IngredientRecord {
    id: i64,
    name: String,
    quantity: Option<f64>,
    unit: String,
}

impl From<IngredientRecord> for Ingredient {
    fn from(record: IngredientRecord) -> Self {
        Ingredient {
            id: Some(record.id),
            name: record.name,
            quantity: record.quantity.unwrap_or(f64::NAN),
            unit: record.unit,
        }
    }
}

/// Repository for ingredient database operations.
#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    /// Creates a new IngredientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IngredientRepository { pool }
    }

    /// Inserts a new ingredient. `ingredient.id` is ignored.
    ///
    /// A taken name yields `Ok(InsertOutcome::Duplicate)` and writes nothing.
    pub async fn insert(&self, ingredient: &Ingredient) -> DbResult<InsertOutcome> {
        debug!(name = %ingredient.name, unit = %ingredient.unit, "Inserting ingredient");

        let result = sqlx::query(
            r#"
            INSERT INTO ingredients (name, quantity, unit)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&ingredient.name)
        .bind(ingredient.quantity)
        .bind(&ingredient.unit)
        .execute(&self.pool)
        .await;

        resolve_insert("ingredient", &ingredient.name, result)
    }

    /// Lists all ingredients in id order.
    pub async fn list(&self) -> DbResult<Vec<Ingredient>> {
        let records = sqlx::query_as::<_, IngredientRecord>(
            "SELECT id, name, quantity, unit FROM ingredients ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Ingredient::from).collect())
    }

    /// Counts stored ingredients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogStore, DbConfig};

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let repo = store.ingredients();

        let berries = repo
            .insert(&Ingredient::new("Fresh Strawberries", 500.0, "grams"))
            .await
            .unwrap();
        let beans = repo
            .insert(&Ingredient::new("Vanilla Beans", 2.5, "pods"))
            .await
            .unwrap();
        assert!(beans.id().unwrap() > berries.id().unwrap());

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, berries.id());
        assert_eq!(listed[0].name, "Fresh Strawberries");
        assert_eq!(listed[0].quantity, 500.0);
        assert_eq!(listed[1].unit, "pods");
        assert_eq!(listed[1].quantity, 2.5);
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let repo = store.ingredients();

        repo.insert(&Ingredient::new("Vanilla Beans", 100.0, "grams"))
            .await
            .unwrap();
        let outcome = repo
            .insert(&Ingredient::new("Vanilla Beans", 5.0, "pods"))
            .await
            .unwrap();

        assert!(outcome.is_duplicate());
        assert_eq!(repo.count().await.unwrap(), 1);
        // The original row is untouched.
        assert_eq!(repo.list().await.unwrap()[0].unit, "grams");
    }

    #[tokio::test]
    async fn test_unvalidated_values_are_accepted() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();

        let outcome = store
            .ingredients()
            .insert(&Ingredient::new("", -3.0, "handfuls"))
            .await
            .unwrap();
        assert!(outcome.is_created());
    }

    #[tokio::test]
    async fn test_nan_quantity_is_accepted() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let repo = store.ingredients();

        let outcome = repo
            .insert(&Ingredient::new("Mystery Syrup", f64::NAN, "g"))
            .await
            .unwrap();
        assert!(outcome.is_created());

        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0].id, outcome.id());
        assert!(listed[0].quantity.is_nan());
        assert_eq!(listed[0].unit, "g");
    }
}
