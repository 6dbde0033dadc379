// src/services/report_service.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::report::{DateRange, Order, ReportSummary, TransactionStatus},
};

#[derive(Clone)]
pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    /// Calcula o resumo de vendas do período. Somente leitura: cada chamada
    /// recalcula tudo a partir dos dados atuais.
    pub async fn compute_summary(&self, range: DateRange) -> Result<ReportSummary, AppError> {
        let success = TransactionStatus::Success;

        // As quatro leituras são independentes entre si
        let (transaction_count, transaction_total, orders, total_revenue) = tokio::try_join!(
            self.repo.count_transactions(range),
            self.repo.sum_transactions_with_status(range, &success),
            self.repo.orders_with_items(range),
            self.repo.sum_order_amounts(range),
        )?;

        let orders_by_status = count_by_status(&orders);

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            transactions = transaction_count,
            orders = orders.len(),
            "Resumo de vendas calculado"
        );

        Ok(ReportSummary {
            range,
            transaction_count,
            transaction_total,
            total_revenue,
            order_count: orders.len() as i64,
            orders_by_status,
        })
    }
}

fn count_by_status(orders: &[Order]) -> BTreeMap<String, i64> {
    let mut by_status = BTreeMap::new();
    for order in orders {
        *by_status.entry(order.status.clone()).or_insert(0) += 1;
    }
    by_status
}
