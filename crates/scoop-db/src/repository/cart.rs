//! # Cart Repository
//!
//! Database operations for the shopping cart.
//!
//! ## Cart View
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart View (INNER JOIN)                               │
//! │                                                                         │
//! │  cart                              flavors                              │
//! │  ┌────┬───────────┬─────┐          ┌────┬───────────────────┬───────┐  │
//! │  │ id │ flavor_id │ qty │          │ id │ name              │ price │  │
//! │  ├────┼───────────┼─────┤          ├────┼───────────────────┼───────┤  │
//! │  │ 1  │ 2         │ 2   │ ───────► │ 2  │ Classic Vanilla   │ 3.99  │  │
//! │  │ 2  │ 9999      │ 1   │ ──╳      │ 1  │ Summer Strawberry │ 4.99  │  │
//! │  └────┴───────────┴─────┘          └────┴───────────────────┴───────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  [ { cart_id: 1, quantity: 2, flavor_name: "Classic Vanilla",          │
//! │      unit_price: 399, total_price: 798 } ]                             │
//! │                                                                         │
//! │  Line 2 points at no flavor and is silently left out.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `add_line` does not check that the flavor exists, and neither does it bound
//! the quantity. A line whose total overflows i64 cents makes `view` fail
//! with [`DbError::Domain`](crate::DbError::Domain).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use scoop_core::{CartLine, CartViewRow, Money};

/// One row of the cart/flavor join before the line total is computed.
#[derive(Debug, sqlx::FromRow)]
struct CartViewRecord {
    cart_id: i64,
    quantity: i64,
    flavor_name: String,
    unit_price_cents: i64,
}

impl TryFrom<CartViewRecord> for CartViewRow {
    type Error = DbError;

    fn try_from(record: CartViewRecord) -> Result<Self, Self::Error> {
        let row = CartViewRow::new(
            record.cart_id,
            record.quantity,
            record.flavor_name,
            Money::from_cents(record.unit_price_cents),
        )?;
        Ok(row)
    }
}

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Appends a cart line and returns its id.
    ///
    /// Neither `flavor_id` nor `quantity` is checked.
    pub async fn add_line(&self, flavor_id: i64, quantity: i64) -> DbResult<i64> {
        debug!(flavor_id = %flavor_id, quantity = %quantity, "Adding cart line");

        let result = sqlx::query("INSERT INTO cart (flavor_id, quantity) VALUES (?1, ?2)")
            .bind(flavor_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Returns cart lines joined with their flavors, in cart id order.
    ///
    /// Lines whose flavor doesn't exist are excluded.
    pub async fn view(&self) -> DbResult<Vec<CartViewRow>> {
        let records = sqlx::query_as::<_, CartViewRecord>(
            r#"
            SELECT
                cart.id            AS cart_id,
                cart.quantity      AS quantity,
                flavors.name       AS flavor_name,
                CAST(ROUND(flavors.price * 100) AS INTEGER) AS unit_price_cents
            FROM cart
            INNER JOIN flavors ON cart.flavor_id = flavors.id
            ORDER BY cart.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Cart view rows");
        records.into_iter().map(CartViewRow::try_from).collect()
    }

    /// Lists raw cart lines, including ones that point at no flavor.
    pub async fn list_lines(&self) -> DbResult<Vec<CartLine>> {
        let lines =
            sqlx::query_as::<_, CartLine>("SELECT id, flavor_id, quantity FROM cart ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(lines)
    }

    /// Counts stored cart lines.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
