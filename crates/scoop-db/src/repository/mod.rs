//! # Repository Module
//!
//! Database repository implementations for Scoop Cafe.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CatalogStore                                                          │
//! │       │                                                                 │
//! │       │  store.flavors().search("straw", Some(true))                   │
//! │       ▼                                                                 │
//! │  FlavorRepository        IngredientRepository   AllergenRepository     │
//! │  ├── insert              ├── insert             ├── insert             │
//! │  ├── search              ├── list               ├── list               │
//! │  ├── get_by_id           └── count              └── count              │
//! │  └── count                                                             │
//! │                                                                         │
//! │  CartRepository                                                        │
//! │  ├── add_line                                                          │
//! │  ├── view                                                              │
//! │  ├── list_lines                                                        │
//! │  └── count                                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository holds a clone of the store's pool; they are cheap to create
//! and hold no state of their own.

pub mod allergen;
pub mod cart;
pub mod flavor;
pub mod ingredient;

use sqlx::sqlite::SqliteQueryResult;
use tracing::warn;

use crate::error::{DbError, DbResult};
use scoop_core::InsertOutcome;

/// Turns the result of a single-row catalog INSERT into an [`InsertOutcome`].
///
/// A unique violation is the expected "name already taken" case: it is
/// logged and reported as `Duplicate`. SQLite rejects the whole statement, so
/// nothing was written. Any other failure is returned as an error.
pub(crate) fn resolve_insert(
    entity: &'static str,
    name: &str,
    result: Result<SqliteQueryResult, sqlx::Error>,
) -> DbResult<InsertOutcome> {
    match result.map_err(DbError::from) {
        Ok(done) => Ok(InsertOutcome::Created(done.last_insert_rowid())),
        Err(err) if err.is_unique_violation() => {
            warn!(entity, name = %name, error = %err, "Catalog entry already exists");
            Ok(InsertOutcome::Duplicate)
        }
        Err(err) => Err(err),
    }
}
