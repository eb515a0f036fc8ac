//! Reports API Handlers
//!
//! Aggregations over stored sales. All sums use decimal arithmetic; floats
//! appear only in the serialized response.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::SaleRepository;
use crate::money;
use crate::utils::AppResult;
use shared::cart::PaymentMethod;
use shared::models::Sale;

/// Query filters for the sales summary
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Inclusive RFC 3339 lower bound
    pub start: Option<String>,
    /// Inclusive RFC 3339 upper bound
    pub end: Option<String>,
}

/// Revenue attributed to one payment method
#[derive(Debug, Serialize, PartialEq)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub amount: f64,
    pub count: usize,
}

/// Sales summary over a period
#[derive(Debug, Serialize)]
pub struct SalesSummary {
    pub sale_count: usize,
    pub gross_total: f64,
    pub average_ticket: f64,
    pub by_method: Vec<MethodTotal>,
}

/// GET /api/reports/summary - sale count, revenue, and per-method breakdown
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<SalesSummary>> {
    let repo = SaleRepository::new(state.db.clone());
    let sales = repo.find_filtered(query.start, query.end, None).await?;
    Ok(Json(summarize(&sales)))
}

fn summarize(sales: &[Sale]) -> SalesSummary {
    let mut gross = Decimal::ZERO;
    let mut by_method: Vec<(PaymentMethod, Decimal, usize)> = Vec::new();

    for sale in sales {
        let total = money::to_decimal(sale.total);
        gross += total;
        match by_method
            .iter_mut()
            .find(|(method, _, _)| *method == sale.payment.method)
        {
            Some((_, amount, count)) => {
                *amount += total;
                *count += 1;
            }
            None => by_method.push((sale.payment.method, total, 1)),
        }
    }

    let average = if sales.is_empty() {
        Decimal::ZERO
    } else {
        gross / Decimal::from(sales.len() as u64)
    };

    SalesSummary {
        sale_count: sales.len(),
        gross_total: money::to_f64(gross),
        average_ticket: money::to_f64(average),
        by_method: by_method
            .into_iter()
            .map(|(method, amount, count)| MethodTotal {
                method,
                amount: money::to_f64(amount),
                count,
            })
            .collect(),
    }
}
