//! # Allergen Repository
//!
//! Database operations for allergens.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::resolve_insert;
use scoop_core::{Allergen, InsertOutcome};

/// Repository for allergen database operations.
#[derive(Debug, Clone)]
pub struct AllergenRepository {
    pool: SqlitePool,
}

impl AllergenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AllergenRepository { pool }
    }

    /// Inserts a new allergen; a taken name yields `InsertOutcome::Duplicate`.
    pub async fn insert(&self, allergen: &Allergen) -> DbResult<InsertOutcome> {
        debug!(name = %allergen.name, "Inserting allergen");

        let result = sqlx::query("INSERT INTO allergens (name) VALUES (?1)")
            .bind(&allergen.name)
            .execute(&self.pool)
            .await;

        resolve_insert("allergen", &allergen.name, result)
    }

    /// Lists all allergens in id order.
    pub async fn list(&self) -> DbResult<Vec<Allergen>> {
        let allergens =
            sqlx::query_as::<_, Allergen>("SELECT id, name FROM allergens ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(allergens)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM allergens")
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
    async fn test_insert_list_and_duplicate() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let repo = store.allergens();

        let milk = repo.insert(&Allergen::new("Milk")).await.unwrap();
        let nuts = repo.insert(&Allergen::new("Nuts")).await.unwrap();
        let again = repo.insert(&Allergen::new("Milk")).await.unwrap();

        assert!(nuts.id().unwrap() > milk.id().unwrap());
        assert_eq!(again.as_sentinel(), -1);

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Milk", "Nuts"]);
    }

    /// Uniqueness is per kind: an allergen may share a flavor's name.
    #[tokio::test]
    async fn test_names_are_unique_per_kind_only() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();

        store
            .flavors()
            .insert(&scoop_core::Flavor::new("Peanut", "", false, scoop_core::Money::zero()))
            .await
            .unwrap();
        let outcome = store
            .allergens()
            .insert(&Allergen::new("Peanut"))
            .await
            .unwrap();

        assert!(outcome.is_created());
    }
}
