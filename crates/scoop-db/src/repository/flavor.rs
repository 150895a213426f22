//! # Flavor Repository
//!
//! Database operations for flavors.
//!
//! ## Key Operations
//! - Insert with name uniqueness reported as [`InsertOutcome::Duplicate`]
//! - Filtered search by keyword and seasonal flag
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Flavor Search Works                              │
//! │                                                                         │
//! │  search("straw", Some(true))                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM flavors WHERE 1=1                                     │
//! │    AND (name LIKE ?1 ESCAPE '\' OR description LIKE ?2 ESCAPE '\')     │
//! │    AND is_seasonal = ?3                       ?1 = ?2 = '%straw%'      │
//! │    ORDER BY id                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────┐                   │
//! │  │ 1 | Summer Strawberry | Fresh strawberry... | 1 │ ← MATCH           │
//! │  │ 2 | Classic Vanilla   | Traditional...      | 0 │                   │
//! │  └─────────────────────────────────────────────────┘                   │
//! │                                                                         │
//! │  Clauses are only appended for filters that are present.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::resolve_insert;
use scoop_core::{Flavor, InsertOutcome};

/// `price` is stored in dollars; it is read back as whole cents.
const FLAVOR_COLUMNS: &str =
    "id, name, description, is_seasonal, CAST(ROUND(price * 100) AS INTEGER) AS price_cents";

/// Repository for flavor database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = FlavorRepository::new(pool);
///
/// let outcome = repo.insert(&flavor).await?;
/// let seasonal = repo.search("", Some(true)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FlavorRepository {
    pool: SqlitePool,
}

impl FlavorRepository {
    /// Creates a new FlavorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FlavorRepository { pool }
    }

    /// Inserts a new flavor. `flavor.id` is ignored.
    ///
    /// ## Returns
    /// * `Ok(InsertOutcome::Created(id))` - Row written
    /// * `Ok(InsertOutcome::Duplicate)` - Name already taken, nothing written
    /// * `Err(DbError)` - Storage failure
    pub async fn insert(&self, flavor: &Flavor) -> DbResult<InsertOutcome> {
        debug!(name = %flavor.name, "Inserting flavor");

        let result = sqlx::query(
            r#"
            INSERT INTO flavors (name, description, is_seasonal, price)
            VALUES (?1, ?2, ?3, ?4 / 100.0)
            "#,
        )
        .bind(&flavor.name)
        .bind(&flavor.description)
        .bind(flavor.is_seasonal)
        .bind(flavor.price_cents)
        .execute(&self.pool)
        .await;

        resolve_insert("flavor", &flavor.name, result)
    }

    /// Searches flavors.
    ///
    /// ## Arguments
    /// * `keyword` - Case-insensitive substring of the name OR description.
    ///   Empty means no keyword filter. `%` and `_` match literally.
    /// * `is_seasonal` - `Some(v)` keeps flavors whose flag equals `v`.
    ///
    /// Both filters combine with AND. Results are in id order; no match
    /// yields an empty vector.
    pub async fn search(&self, keyword: &str, is_seasonal: Option<bool>) -> DbResult<Vec<Flavor>> {
        debug!(keyword = %keyword, is_seasonal = ?is_seasonal, "Searching flavors");

        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {FLAVOR_COLUMNS} FROM flavors WHERE 1=1"
        ));

        if !keyword.is_empty() {
            let pattern = like_pattern(keyword);
            builder
                .push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        if let Some(seasonal) = is_seasonal {
            builder.push(" AND is_seasonal = ").push_bind(seasonal);
        }

        builder.push(" ORDER BY id");

        let flavors = builder
            .build_query_as::<Flavor>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = flavors.len(), "Search returned flavors");
        Ok(flavors)
    }

    /// Gets a flavor by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Flavor))` - Flavor found
    /// * `Ok(None)` - No flavor with this id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Flavor>> {
        let flavor = sqlx::query_as::<_, Flavor>(
            r#"
            SELECT id, name, description, is_seasonal,
                   CAST(ROUND(price * 100) AS INTEGER) AS price_cents
            FROM flavors
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flavor)
    }

    /// Counts stored flavors.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flavors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Wraps a keyword as a `LIKE` containment pattern, escaping `%`, `_` and
/// the escape character itself.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================
