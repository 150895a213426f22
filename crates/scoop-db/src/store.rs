//! # Catalog Store
//!
//! Connection setup, configuration and the [`CatalogStore`] handle.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Store Lifecycle                            │
//! │                                                                         │
//! │  DbConfig::new(path) ← Storage location                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::new(config).await ← Open connection + run migrations    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool (size 1)           │                           │
//! │  │  ┌─────┐                                 │                           │
//! │  │  │Conn │  never reaped, never recycled   │                           │
//! │  │  └─────┘                                 │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ├──► add_flavor / add_ingredient / add_allergen                  │
//! │       ├──► search_flavors                                              │
//! │       ├──► add_to_cart / view_cart                                     │
//! │       ▼                                                                 │
//! │  store.close().await ← Connection released                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Connection Settings
//! - Foreign keys OFF: `cart.flavor_id` is a declared reference only
//! - `synchronous = FULL`: a statement's commit is durable when it returns
//! - WAL journal for file-backed stores

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::allergen::AllergenRepository;
use crate::repository::cart::CartRepository;
use crate::repository::flavor::FlavorRepository;
use crate::repository::ingredient::IngredientRepository;
use scoop_core::{
    Allergen, CartViewRow, Flavor, Ingredient, InsertOutcome, DEFAULT_CART_QUANTITY,
};

/// Database file used when no location is given.
pub const DEFAULT_DATABASE_PATH: &str = "ice_cream_cafe.db";

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./data/cafe.db")
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// How long to wait for the connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to apply the schema on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for a file-backed store.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Created if it doesn't
    ///   exist; its parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory configuration (for testing).
    ///
    /// Each store opened from it is private and disappears on close.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        // sqlx turns foreign keys on by default; the cart reference is
        // declarative only.
        Ok(options
            .foreign_keys(false)
            .synchronous(SqliteSynchronous::Full))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig::new(DEFAULT_DATABASE_PATH)
    }
}

// =============================================================================
// Catalog Store
// =============================================================================

/// Handle to the catalog and cart.
///
/// Owns exactly one SQLite connection for its lifetime. Every operation
/// runs a single statement and returns once it has committed. Repositories
/// borrow a clone of the pool; there is no global connection state.
///
/// One store is meant for one caller at a time. Cloning the handle shares the
/// same connection.
///
/// ## Usage
/// ```rust,ignore
/// let store = CatalogStore::new(DbConfig::in_memory()).await?;
///
/// let vanilla = store
///     .add_flavor(&Flavor::new("Classic Vanilla", "", false, Money::from_cents(399)))
///     .await?;
/// store.add_to_cart(vanilla.as_sentinel(), 2).await?;
///
/// for row in store.view_cart().await? {
///     println!("{} x{} = {}", row.flavor_name, row.quantity, row.total_price);
/// }
///
/// store.close().await;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    /// Opens the store and ensures the schema exists.
    ///
    /// ## What This Does
    /// 1. Opens (or creates) the database file
    /// 2. Holds a single connection: no idle reaping, no lifetime recycling,
    ///    so an in-memory database lives as long as the store
    /// 3. Applies the schema (if `run_migrations` is set)
    ///
    /// ## Returns
    /// * `Ok(CatalogStore)` - Ready-to-use store
    /// * `Err(DbError::ConnectionFailed)` - Storage couldn't be opened
    /// * `Err(DbError::MigrationFailed)` - Schema couldn't be created
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening catalog store"
        );

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let store = CatalogStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        info!("Catalog store ready");
        Ok(store)
    }

    /// Applies the schema. Idempotent.
    ///
    /// Called by `new()` unless `run_migrations` is false.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns `(total_migrations, applied_migrations)`.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// For diagnostics; prefer the store and repository methods.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // -------------------------------------------------------------------------
    // Repositories
    // -------------------------------------------------------------------------

    /// Returns the flavor repository.
    pub fn flavors(&self) -> FlavorRepository {
        FlavorRepository::new(self.pool.clone())
    }

    /// Returns the ingredient repository.
    pub fn ingredients(&self) -> IngredientRepository {
        IngredientRepository::new(self.pool.clone())
    }

    /// Returns the allergen repository.
    pub fn allergens(&self) -> AllergenRepository {
        AllergenRepository::new(self.pool.clone())
    }

    /// Returns the cart repository.
    pub fn cart(&self) -> CartRepository {
        CartRepository::new(self.pool.clone())
    }

    // -------------------------------------------------------------------------
    // Catalog writers
    // -------------------------------------------------------------------------

    /// Adds a flavor.
    ///
    /// ## Returns
    /// * `Ok(InsertOutcome::Created(id))` - New flavor id
    /// * `Ok(InsertOutcome::Duplicate)` - Name taken; logged, nothing written
    /// * `Err(DbError)` - Storage failure
    pub async fn add_flavor(&self, flavor: &Flavor) -> DbResult<InsertOutcome> {
        self.flavors().insert(flavor).await
    }

    /// Adds an ingredient. Same contract as [`CatalogStore::add_flavor`].
    pub async fn add_ingredient(&self, ingredient: &Ingredient) -> DbResult<InsertOutcome> {
        self.ingredients().insert(ingredient).await
    }

    /// Adds an allergen. Same contract as [`CatalogStore::add_flavor`].
    pub async fn add_allergen(&self, allergen: &Allergen) -> DbResult<InsertOutcome> {
        self.allergens().insert(allergen).await
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Searches flavors by keyword (name OR description, case-insensitive
    /// substring; empty = any) AND seasonal flag (`None` = any).
    pub async fn search_flavors(
        &self,
        keyword: &str,
        is_seasonal: Option<bool>,
    ) -> DbResult<Vec<Flavor>> {
        self.flavors().search(keyword, is_seasonal).await
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds a cart line and returns its id. The flavor is not checked.
    pub async fn add_to_cart(&self, flavor_id: i64, quantity: i64) -> DbResult<i64> {
        self.cart().add_line(flavor_id, quantity).await
    }

    /// Adds a single scoop of a flavor to the cart.
    pub async fn add_one_to_cart(&self, flavor_id: i64) -> DbResult<i64> {
        self.add_to_cart(flavor_id, DEFAULT_CART_QUANTITY).await
    }

    /// Returns the cart joined with flavor names and prices.
    pub async fn view_cart(&self) -> DbResult<Vec<CartViewRow>> {
        self.cart().view().await
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Checks if the store can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection.
    ///
    /// Consumes the handle. Any clone still held will fail every operation
    /// with [`DbError::ConnectionFailed`].
    pub async fn close(self) {
        info!("Closing catalog store");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scoop_core::Money;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();

        assert!(store.health_check().await);
        assert_eq!(store.migration_status().await.unwrap(), (1, 1));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/cafe.db")
            .connect_timeout(Duration::from_secs(2))
            .run_migrations(false);

        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
        assert_eq!(DbConfig::default().database_path, PathBuf::from("ice_cream_cafe.db"));
    }

    #[tokio::test]
    async fn test_in_memory_stores_are_isolated() {
        let a = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let b = CatalogStore::new(DbConfig::in_memory()).await.unwrap();

        a.add_allergen(&Allergen::new("Milk")).await.unwrap();

        assert_eq!(a.allergens().count().await.unwrap(), 1);
        assert_eq!(b.allergens().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_schema_is_idempotent_and_keeps_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cafe.db");

        let store = CatalogStore::new(DbConfig::new(&path)).await.unwrap();
        let vanilla = store
            .add_flavor(&Flavor::new("Classic Vanilla", "", false, Money::from_cents(399)))
            .await
            .unwrap();
        store.add_to_cart(vanilla.as_sentinel(), 2).await.unwrap();
        store.run_migrations().await.unwrap();
        store.close().await;

        let reopened = CatalogStore::new(DbConfig::new(&path)).await.unwrap();
        reopened.run_migrations().await.unwrap();

        assert_eq!(reopened.flavors().count().await.unwrap(), 1);
        let rows = reopened.view_cart().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_price, Money::from_cents(798));

        // Ids keep climbing across sessions.
        let mint = reopened
            .add_flavor(&Flavor::new("Mint Chip", "", false, Money::from_cents(450)))
            .await
            .unwrap();
        assert!(mint.as_sentinel() > vanilla.as_sentinel());
        reopened.close().await;
    }

    /// A cafe database created before this store existed: no constraints
    /// beyond UNIQUE, no AUTOINCREMENT, prices as REAL dollars.
    async fn write_legacy_database(path: &Path) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::new().filename(path).create_if_missing(true))
            .await
            .unwrap();

        for statement in [
            "CREATE TABLE flavors (id INTEGER PRIMARY KEY, name TEXT UNIQUE, \
             description TEXT, is_seasonal BOOLEAN, price REAL)",
            "CREATE TABLE ingredients (id INTEGER PRIMARY KEY, name TEXT UNIQUE, \
             quantity REAL, unit TEXT)",
            "CREATE TABLE allergens (id INTEGER PRIMARY KEY, name TEXT UNIQUE)",
            "CREATE TABLE cart (id INTEGER PRIMARY KEY, flavor_id INTEGER, quantity INTEGER, \
             FOREIGN KEY(flavor_id) REFERENCES flavors(id))",
            "INSERT INTO flavors (name, description, is_seasonal, price) \
             VALUES ('Classic Vanilla', 'Traditional favorite', 0, 3.99)",
            "INSERT INTO cart (flavor_id, quantity) VALUES (1, 2)",
        ] {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }

        pool.close().await;
    }

    #[tokio::test]
    async fn test_opens_existing_database_with_legacy_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ice_cream_cafe.db");
        write_legacy_database(&path).await;

        let store = CatalogStore::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(store.migration_status().await.unwrap(), (1, 1));

        let found = store.search_flavors("Vanilla", Some(false)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].price(), Money::from_cents(399));
        assert_eq!(found[0].description, "Traditional favorite");

        let cart = store.view_cart().await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].unit_price, Money::from_cents(399));
        assert_eq!(cart[0].total_price, Money::from_cents(798));

        let strawberry = store
            .add_flavor(&Flavor::new(
                "Summer Strawberry",
                "Fresh strawberry delight",
                true,
                Money::from_cents(499),
            ))
            .await
            .unwrap();
        assert!(strawberry.as_sentinel() > found[0].id.unwrap());
        assert!(store
            .add_flavor(&Flavor::new("Classic Vanilla", "", false, Money::zero()))
            .await
            .unwrap()
            .is_duplicate());
        assert!(store
            .add_ingredient(&Ingredient::new("Vanilla Beans", 100.0, "grams"))
            .await
            .unwrap()
            .is_created());

        let seasonal = store.search_flavors("", Some(true)).await.unwrap();
        assert_eq!(seasonal[0].price(), Money::from_cents(499));
        store.close().await;
    }

    #[tokio::test]
    async fn test_unopenable_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("cafe.db");

        let err = CatalogStore::new(DbConfig::new(path).connect_timeout(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_skipping_migrations_leaves_schema_absent() {
        let store = CatalogStore::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        assert_eq!(store.migration_status().await.unwrap(), (1, 0));
        assert!(store.flavors().count().await.is_err());

        store.run_migrations().await.unwrap();
        assert_eq!(store.flavors().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_operations_after_close_fail() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let leftover = store.clone();

        store.close().await;

        assert!(!leftover.health_check().await);
        let err = leftover.migration_status().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
        let err = leftover.view_cart().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
        let err = leftover
            .add_allergen(&Allergen::new("Soy"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_add_one_to_cart_uses_default_quantity() {
        let store = CatalogStore::new(DbConfig::in_memory()).await.unwrap();
        let id = store
            .add_flavor(&Flavor::new("Classic Vanilla", "", false, Money::from_cents(399)))
            .await
            .unwrap()
            .as_sentinel();

        store.add_one_to_cart(id).await.unwrap();

        let rows = store.view_cart().await.unwrap();
        assert_eq!(rows[0].quantity, 1);
        assert_eq!(rows[0].total_price, Money::from_cents(399));
    }
}
