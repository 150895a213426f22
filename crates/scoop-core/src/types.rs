//! # Domain Types
//!
//! Catalog and cart types used throughout Scoop Cafe.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Flavor       │   │   Ingredient    │   │    Allergen     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name (unique)  │   │  name (unique)  │   │  name (unique)  │       │
//! │  │  description    │   │  quantity       │   └─────────────────┘       │
//! │  │  is_seasonal    │   │  unit           │                             │
//! │  │  price_cents    │   └─────────────────┘                             │
//! │  └────────┬────────┘                                                    │
//! │           │ flavor_id (declared, never enforced)                        │
//! │  ┌────────┴────────┐        inner join         ┌─────────────────┐     │
//! │  │    CartLine     │ ────────────────────────► │   CartViewRow   │     │
//! │  │  id, quantity   │                           │  total_price    │     │
//! │  └─────────────────┘                           └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every stored record gets an integer id from the database. Records built in
//! memory carry `id: None` until they are read back; writers ignore the field.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{DEFAULT_CART_QUANTITY, DEFAULT_INGREDIENT_UNIT, DUPLICATE_SENTINEL};

// =============================================================================
// Flavor
// =============================================================================

/// An ice cream flavor on the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Flavor {
    /// Store-assigned identity.
    pub id: Option<i64>,

    /// Display name, unique across all flavors.
    pub name: String,

    /// Free-text description, searched alongside the name.
    pub description: String,

    /// Whether the flavor is only offered part of the year.
    pub is_seasonal: bool,

    /// Price in cents.
    pub price_cents: i64,
}

impl Flavor {
    /// Creates an unsaved flavor.
    ///
    /// ## Example
    /// ```rust
    /// use scoop_core::{Flavor, Money};
    ///
    /// let flavor = Flavor::new(
    ///     "Summer Strawberry",
    ///     "Fresh strawberry delight",
    ///     true,
    ///     Money::from_cents(499),
    /// );
    /// assert!(flavor.id.is_none());
    /// assert_eq!(flavor.price().to_string(), "$4.99");
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_seasonal: bool,
        price: Money,
    ) -> Self {
        Flavor {
            id: None,
            name: name.into(),
            description: description.into(),
            is_seasonal,
            price_cents: price.cents(),
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A stocked ingredient with an amount on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Option<i64>,
    /// Unique across all ingredients.
    pub name: String,
    pub quantity: f64,
    /// Free text ("grams", "ml", "pieces"); not checked against a list.
    pub unit: String,
}

impl Ingredient {
    /// Creates an unsaved ingredient.
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Ingredient {
            id: None,
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

impl Default for Ingredient {
    fn default() -> Self {
        Ingredient {
            id: None,
            name: String::new(),
            quantity: 0.0,
            unit: DEFAULT_INGREDIENT_UNIT.to_string(),
        }
    }
}

// =============================================================================
// Allergen
// =============================================================================

/// An allergen that may be declared on the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Allergen {
    pub id: Option<i64>,
    /// Unique across all allergens.
    pub name: String,
}

impl Allergen {
    /// Creates an unsaved allergen.
    pub fn new(name: impl Into<String>) -> Self {
        Allergen {
            id: None,
            name: name.into(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One cart row: a quantity of some flavor.
///
/// `flavor_id` is stored as given. A line pointing at a missing flavor is kept
/// but never shows up in the cart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: Option<i64>,
    pub flavor_id: i64,
    pub quantity: i64,
}

impl CartLine {
    /// Creates an unsaved cart line.
    pub fn new(flavor_id: i64, quantity: i64) -> Self {
        CartLine {
            id: None,
            flavor_id,
            quantity,
        }
    }
}

impl Default for CartLine {
    fn default() -> Self {
        CartLine::new(0, DEFAULT_CART_QUANTITY)
    }
}

/// A cart line joined with its flavor, as shown to the customer.
///
/// ## Serialized Shape
/// ```json
/// { "cart_id": 1, "quantity": 2, "flavor_name": "Classic Vanilla",
///   "unit_price": 399, "total_price": 798 }
/// ```
/// Money fields serialize as integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartViewRow {
    pub cart_id: i64,
    pub quantity: i64,
    pub flavor_name: String,
    pub unit_price: Money,
    /// `quantity × unit_price`, exact.
    pub total_price: Money,
}

impl CartViewRow {
    /// Builds a view row, computing the line total.
    ///
    /// Fails with [`CoreError::TotalOverflow`] when the total does not fit in
    /// i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use scoop_core::{CartViewRow, Money};
    ///
    /// let row = CartViewRow::new(7, 2, "Summer Strawberry", Money::from_cents(499)).unwrap();
    /// assert_eq!(row.total_price, Money::from_cents(998));
    /// ```
    pub fn new(
        cart_id: i64,
        quantity: i64,
        flavor_name: impl Into<String>,
        unit_price: Money,
    ) -> CoreResult<Self> {
        let total_price =
            unit_price
                .checked_multiply_quantity(quantity)
                .ok_or(CoreError::TotalOverflow {
                    quantity,
                    unit_cents: unit_price.cents(),
                })?;

        Ok(CartViewRow {
            cart_id,
            quantity,
            flavor_name: flavor_name.into(),
            unit_price,
            total_price,
        })
    }
}

// =============================================================================
// Insert Outcome
// =============================================================================

/// Result of adding a catalog entity.
///
/// A name that already exists is an expected condition, so it is a value
/// here rather than an error.
///
/// ```text
/// add_flavor("Classic Vanilla")  ──► Created(2)
/// add_flavor("Classic Vanilla")  ──► Duplicate   (as_sentinel() == -1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    /// A row was inserted with this identity.
    Created(i64),
    /// A row with the same name already exists; nothing was written.
    Duplicate,
}

impl InsertOutcome {
    /// Identity of the new row, if one was created.
    #[inline]
    pub const fn id(&self) -> Option<i64> {
        match self {
            InsertOutcome::Created(id) => Some(*id),
            InsertOutcome::Duplicate => None,
        }
    }

    #[inline]
    pub const fn is_created(&self) -> bool {
        matches!(self, InsertOutcome::Created(_))
    }

    #[inline]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, InsertOutcome::Duplicate)
    }

    /// Collapses the outcome to the plain integer form: the id, or `-1`.
    #[inline]
    pub const fn as_sentinel(&self) -> i64 {
        match self {
            InsertOutcome::Created(id) => *id,
            InsertOutcome::Duplicate => DUPLICATE_SENTINEL,
        }
    }
}

impl From<InsertOutcome> for i64 {
    fn from(outcome: InsertOutcome) -> Self {
        outcome.as_sentinel()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
