// src/models/report.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::common::error::AppError;

// --- Período do relatório ---

/// Intervalo de datas fechado nas duas pontas (dias inteiros).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[schema(example = "2026-10-01")]
    pub start: NaiveDate,
    #[schema(example = "2026-10-31")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Do primeiro ao último dia do mês de `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        Self {
            start: first_day_of_month(today),
            end: last_day_of_month(today),
        }
    }

    /// Resolve os parâmetros da query. Cada ponta cai no mês corrente de forma
    /// independente; string vazia conta como ausente.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        let month = Self::current_month(today);
        let start = match non_empty(start) {
            Some(raw) => parse_date("start_date", raw)?,
            None => month.start,
        };
        let end = match non_empty(end) {
            Some(raw) => parse_date("end_date", raw)?,
            None => month.end,
        };

        Ok(Self::new(start, end))
    }

    /// Limite inferior (inclusivo): início do dia `start`.
    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Limite superior (exclusivo): início do dia seguinte a `end`.
    pub fn end_bound(&self) -> NaiveDateTime {
        self.end
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN))
            .unwrap_or(NaiveDateTime::MAX)
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start_bound() && timestamp < self.end_bound()
    }
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

// Parâmetros aceitos em GET /{slug}/admin/reports
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Data inicial (YYYY-MM-DD). Padrão: primeiro dia do mês corrente.
    #[param(example = "2026-10-01")]
    pub start_date: Option<String>,
    /// Data final (YYYY-MM-DD). Padrão: último dia do mês corrente.
    #[param(example = "2026-10-31")]
    pub end_date: Option<String>,
}

// --- Transações ---

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Other(raw) => raw,
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => TransactionStatus::Success,
            "failed" => TransactionStatus::Failed,
            "pending" => TransactionStatus::Pending,
            other => TransactionStatus::Other(other.to_string()),
        })
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Pedidos ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: Option<i64>,
    pub quantity: i32,
    pub price: Decimal,
}

// Linha da tabela `orders` (sem os itens)
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub status: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub status: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn from_row(row: OrderRow, items: Vec<OrderItem>) -> Self {
        Self {
            id: row.id,
            status: row.status,
            amount: row.amount,
            created_at: row.created_at,
            items,
        }
    }
}

// --- Resultado ---

/// Estatísticas agregadas de um período. Nunca é persistido.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub range: DateRange,
    #[schema(example = 42)]
    pub transaction_count: i64,
    #[schema(example = "1520.75")]
    pub transaction_total: Decimal,
    #[schema(example = "2310.00")]
    pub total_revenue: Decimal,
    #[schema(example = 17)]
    pub order_count: i64,
    pub orders_by_status: BTreeMap<String, i64>,
}
