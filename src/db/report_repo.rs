// src/db/report_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::report::{DateRange, Order, OrderItem, OrderRow, TransactionStatus},
};

/// Leituras de que o relatório precisa. As tabelas pertencem à aplicação
/// hospedeira; aqui tudo é somente leitura.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn count_transactions(&self, range: DateRange) -> Result<i64, AppError>;

    async fn sum_transactions_with_status(
        &self,
        range: DateRange,
        status: &TransactionStatus,
    ) -> Result<Decimal, AppError>;

    /// Pedidos do período com os itens já carregados.
    async fn orders_with_items(&self, range: DateRange) -> Result<Vec<Order>, AppError>;

    async fn sum_order_amounts(&self, range: DateRange) -> Result<Decimal, AppError>;
}

#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn count_transactions(&self, range: DateRange) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM transactions
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
            .bind(range.start_bound())
            .bind(range.end_bound())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn sum_transactions_with_status(
        &self,
        range: DateRange,
        status: &TransactionStatus,
    ) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE status = $1
              AND created_at >= $2 AND created_at < $3
            "#,
        )
            .bind(status.as_str())
            .bind(range.start_bound())
            .bind(range.end_bound())
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn orders_with_items(&self, range: DateRange) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, status, amount, created_at
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY id
            "#,
        )
            .bind(range.start_bound())
            .bind(range.end_bound())
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Carrega os itens de todos os pedidos numa única consulta
        let order_ids: Vec<i64> = rows.iter().map(|o| o.id).collect();
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, id
            "#,
        )
            .bind(order_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(attach_items(rows, items))
    }

    async fn sum_order_amounts(&self, range: DateRange) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
            .bind(range.start_bound())
            .bind(range.end_bound())
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

/// Distribui os itens entre os pedidos. Mantém a ordem de `rows`; dentro de
/// cada pedido os itens ficam ordenados por id.
pub fn attach_items(rows: Vec<OrderRow>, items: Vec<OrderItem>) -> Vec<Order> {
    let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    rows.into_iter()
        .map(|row| {
            let mut items = items_by_order.remove(&row.id).unwrap_or_default();
            items.sort_by_key(|item| item.id);
            Order::from_row(row, items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: i64, status: &str) -> OrderRow {
        OrderRow {
            id,
            status: status.to_string(),
            amount: Decimal::from(10),
            created_at: NaiveDate::from_ymd_opt(2026, 10, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn item(id: i64, order_id: i64) -> OrderItem {
        OrderItem {
            id,
            order_id,
            product_id: Some(100 + id),
            quantity: 1,
            price: Decimal::from(5),
        }
    }

    fn ids(items: &[OrderItem]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn keeps_the_order_of_the_rows() {
        let orders = attach_items(vec![row(3, "paid"), row(1, "pending"), row(2, "paid")], vec![]);

        let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(order_ids, vec![3, 1, 2]);
        assert_eq!(orders[1].status, "pending");
    }

    #[test]
    fn order_without_items_gets_an_empty_list() {
        let orders = attach_items(vec![row(1, "paid"), row(2, "paid")], vec![item(10, 1)]);

        assert_eq!(ids(&orders[0].items), vec![10]);
        assert!(orders[1].items.is_empty());
    }

    #[test]
    fn items_are_grouped_by_order_and_sorted_by_id() {
        let orders = attach_items(
            vec![row(1, "paid"), row(2, "pending")],
            vec![item(12, 2), item(7, 1), item(11, 2), item(3, 1), item(20, 2)],
        );

        assert_eq!(ids(&orders[0].items), vec![3, 7]);
        assert_eq!(ids(&orders[1].items), vec![11, 12, 20]);
        assert!(orders[1].items.iter().all(|i| i.order_id == 2));
    }

    #[test]
    fn items_of_orders_outside_the_rows_are_dropped() {
        let orders = attach_items(vec![row(1, "paid")], vec![item(5, 1), item(6, 99)]);

        assert_eq!(orders.len(), 1);
        assert_eq!(ids(&orders[0].items), vec![5]);
    }
}
