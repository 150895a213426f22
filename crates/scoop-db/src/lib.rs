//! # scoop-db: Database Layer for Scoop Cafe
//!
//! This crate provides the catalog store: an SQLite database holding
//! flavors, ingredients, allergens and a shopping cart, accessed with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scoop Cafe Data Flow                             │
//! │                                                                         │
//! │  Caller (store.search_flavors("straw", Some(true)))                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     scoop-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ FlavorRepo    │    │              │  │   │
//! │  │   │ one SQLite    │◄───│ IngredientRepo│    │ 001_catalog_ │  │   │
//! │  │   │ connection    │    │ AllergenRepo  │    │   schema.sql │  │   │
//! │  │   │               │    │ CartRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./ice_cream_cafe.db (default)                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle, configuration and connection setup
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (flavor, ingredient, allergen, cart)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scoop_core::{Flavor, Money};
//! use scoop_db::{CatalogStore, DbConfig};
//!
//! let store = CatalogStore::new(DbConfig::new("cafe.db")).await?;
//!
//! let outcome = store
//!     .add_flavor(&Flavor::new("Summer Strawberry", "Fresh strawberry delight", true, Money::from_cents(499)))
//!     .await?;
//!
//! let seasonal = store.search_flavors("", Some(true)).await?;
//! store.add_to_cart(seasonal[0].id.unwrap_or_default(), 2).await?;
//! let cart = store.view_cart().await?;
//!
//! store.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use store::{CatalogStore, DbConfig, DEFAULT_DATABASE_PATH};

// Repository re-exports for convenience
pub use repository::allergen::AllergenRepository;
pub use repository::cart::CartRepository;
pub use repository::flavor::FlavorRepository;
pub use repository::ingredient::IngredientRepository;
