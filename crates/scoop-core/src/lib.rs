//! # scoop-core: Domain Types for Scoop Cafe
//!
//! This crate holds the catalog and cart types shared by the store. It has
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scoop Cafe Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ scoop-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │   error   │                  │   │
//! │  │   │  Flavor   │  │   Money   │  │ CoreError │                  │   │
//! │  │   │ CartLine  │  │  (cents)  │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    scoop-db (Database Layer)                    │   │
//! │  │          schema, entity writers, flavor search, cart view       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and cart types (Flavor, Ingredient, Allergen, CartLine)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use scoop_core::{CartViewRow, Money};
//!
//! let row = CartViewRow::new(1, 2, "Classic Vanilla", Money::from_cents(399)).unwrap();
//! assert_eq!(row.total_price.cents(), 798);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Value reported in place of an identity when an insert hit an existing name.
pub const DUPLICATE_SENTINEL: i64 = -1;

/// Quantity used when a flavor is added to the cart without an explicit amount.
pub const DEFAULT_CART_QUANTITY: i64 = 1;

/// Unit assigned to a new ingredient unless one is given.
pub const DEFAULT_INGREDIENT_UNIT: &str = "grams";
