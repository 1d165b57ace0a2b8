use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Item, Order, OrderStatus};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use crate::{OrderRepository, RepositoryError, Result};

const SELECT_ORDERS: &str = r#"
    SELECT id, customer_name, status, created_at, updated_at
    FROM orders
"#;

/// PostgreSQL-backed order repository.
///
/// An order is stored as one `orders` row plus one `order_items` row per item.
/// Saves rewrite the whole item set (delete, then insert) inside a single
/// transaction, so readers never see a parent with a partial item list.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgreSQL order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Opens a read-only transaction whose statements all see one snapshot.
    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    fn row_to_item(row: &PgRow) -> Result<Item> {
        Ok(Item::restore(
            row.try_get("id")?,
            row.try_get("name")?,
            row.try_get::<i32, _>("quantity")?,
            row.try_get::<Decimal, _>("price")?,
        ))
    }

    fn row_to_order(row: &PgRow, items: Vec<Item>) -> Result<Order> {
        let status: String = row.try_get("status")?;

        Ok(Order::restore(
            OrderId::from_string(row.try_get::<String, _>("id")?),
            row.try_get("customer_name")?,
            items,
            OrderStatus::from_stored(&status),
            row.try_get::<DateTime<Utc>, _>("created_at")?,
            row.try_get::<DateTime<Utc>, _>("updated_at")?,
        ))
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn save(&self, order: &Order) -> Result<()> {
        order.is_valid()?;
        let started = Instant::now();

        // Dropping `tx` without commit rolls everything back
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_name, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                customer_name = EXCLUDED.customer_name,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(order.id().as_str())
        .bind(order.customer_name())
        .bind(order.status().as_str())
        .bind(order.created_at())
        .bind(order.updated_at())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order.id().as_str())
            .execute(&mut *tx)
            .await?;

        for (position, item) in order.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, name, quantity, price, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id())
            .bind(order.id().as_str())
            .bind(item.name())
            .bind(item.quantity())
            .bind(item.price())
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        metrics::histogram!("order_repository_save_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::debug!(items = order.items().len(), "order saved");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(order_id = %id))]
    async fn find_by_id(&self, id: &OrderId) -> Result<Order> {
        // Parent and items must come from the same snapshot
        let mut tx = self.begin_snapshot().await?;

        let row: Option<PgRow> = sqlx::query(&format!("{SELECT_ORDERS} WHERE id = $1"))
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound(id.clone()));
        };

        let item_rows = sqlx::query(
            r#"
            SELECT id, name, quantity, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let items = item_rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Self::row_to_order(&row, items)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Order>> {
        let mut tx = self.begin_snapshot().await?;

        let order_rows = sqlx::query(&format!("{SELECT_ORDERS} ORDER BY created_at ASC, id ASC"))
            .fetch_all(&mut *tx)
            .await?;

        // One bulk query for every item instead of one per order
        let item_rows = sqlx::query(
            r#"
            SELECT id, order_id, name, quantity, price
            FROM order_items
            ORDER BY order_id ASC, position ASC, id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut items_by_order: HashMap<String, Vec<Item>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id")?;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(row)?);
        }

        let orders = order_rows
            .iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let items = items_by_order.remove(&id).unwrap_or_default();
                Self::row_to_order(row, items)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = orders.len(), "orders listed");
        Ok(orders)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
