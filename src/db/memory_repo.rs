// src/db/memory_repo.rs
//
// Implementação em memória usada pelos testes de serviço e de rota.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{report_repo::attach_items, ReportRepository},
    models::report::{DateRange, Order, OrderItem, OrderRow, TransactionStatus},
};

// Linha da tabela `transactions`, como a aplicação hospedeira a guarda
#[derive(Debug, Clone)]
pub struct Transaction {
    pub status: TransactionStatus,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

#[derive(Default)]
pub struct InMemoryReportRepository {
    transactions: Vec<Transaction>,
    orders: Vec<OrderRow>,
    items: Vec<OrderItem>,
    failure: Mutex<Option<String>>,
}

impl InMemoryReportRepository {
    pub fn new(transactions: Vec<Transaction>, orders: Vec<OrderRow>) -> Self {
        Self {
            transactions,
            orders,
            items: Vec::new(),
            failure: Mutex::new(None),
        }
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }

    /// Faz todas as leituras seguintes falharem com `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> Result<(), AppError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(AppError::InternalServerError(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }

    fn orders_in(&self, range: DateRange) -> impl Iterator<Item = &OrderRow> {
        self.orders.iter().filter(move |o| range.contains(o.created_at))
    }
}

pub fn transaction(status: &str, amount: i64, created_at: NaiveDateTime) -> Transaction {
    Transaction {
        status: status.parse().unwrap(),
        amount: Decimal::from(amount),
        created_at,
    }
}

pub fn order(id: i64, status: &str, amount: i64, created_at: NaiveDateTime) -> OrderRow {
    OrderRow {
        id,
        status: status.to_string(),
        amount: Decimal::from(amount),
        created_at,
    }
}

pub fn order_item(id: i64, order_id: i64, quantity: i32, price: i64) -> OrderItem {
    OrderItem {
        id,
        order_id,
        product_id: None,
        quantity,
        price: Decimal::from(price),
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn count_transactions(&self, range: DateRange) -> Result<i64, AppError> {
        self.check()?;
        Ok(self
            .transactions
            .iter()
            .filter(|t| range.contains(t.created_at))
            .count() as i64)
    }

    async fn sum_transactions_with_status(
        &self,
        range: DateRange,
        status: &TransactionStatus,
    ) -> Result<Decimal, AppError> {
        self.check()?;
        Ok(self
            .transactions
            .iter()
            .filter(|t| &t.status == status && range.contains(t.created_at))
            .map(|t| t.amount)
            .sum())
    }

    async fn orders_with_items(&self, range: DateRange) -> Result<Vec<Order>, AppError> {
        self.check()?;
        let rows: Vec<OrderRow> = self.orders_in(range).cloned().collect();
        let ids: Vec<i64> = rows.iter().map(|o| o.id).collect();
        let items = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.order_id))
            .cloned()
            .collect();
        Ok(attach_items(rows, items))
    }

    async fn sum_order_amounts(&self, range: DateRange) -> Result<Decimal, AppError> {
        self.check()?;
        Ok(self.orders_in(range).map(|o| o.amount).sum())
    }
}
