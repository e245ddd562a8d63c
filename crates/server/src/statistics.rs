//! Statistics API edpoints

use api_types::stats::Statistic;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_currency(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Eur => api_types::Currency::Eur,
        engine::Currency::Usd => api_types::Currency::Usd,
        engine::Currency::Ron => api_types::Currency::Ron,
    }
}

/// Handle requests for the income/expense totals
pub async fn get_stats(State(state): State<ServerState>) -> Result<Json<Statistic>, ServerError> {
    let snapshot = state.engine.snapshot().await?;
    let totals = engine::totals(&snapshot.expenses, &snapshot.incomes);

    Ok(Json(Statistic {
        currency: map_currency(state.currency),
        income_total: totals.income_total.to_major(),
        expense_total: totals.expense_total.to_major(),
        net_balance: totals.net_balance.to_major(),
    }))
}
