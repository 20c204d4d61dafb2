//! Portfolio valuation summary, derived from the live holdings.

use super::portfolio::Portfolio;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryData {
    pub current_value: f64,
    pub total_investment: f64,
    pub total_pl: f64,
    pub todays_pl: f64,
    pub total_pl_pct: f64,
    pub todays_pl_pct: f64,
}

impl SummaryData {
    pub fn compute(portfolio: &Portfolio) -> Self {
        let mut current_value = 0.0;
        let mut total_investment = 0.0;
        let mut todays_pl = 0.0;

        for inst in portfolio.instruments() {
            current_value += inst.market_value();
            total_investment += inst.invested();
            let open = portfolio.open_price(&inst.symbol).unwrap_or(inst.price);
            todays_pl += (inst.price - open) * inst.quantity as f64;
        }

        let total_pl = current_value - total_investment;
        let total_pl_pct = if total_investment > 0.0 {
            total_pl / total_investment * 100.0
        } else {
            0.0
        };

        let opening_value = current_value - todays_pl;
        let todays_pl_pct = if current_value > 0.0 && opening_value != 0.0 {
            todays_pl / opening_value * 100.0
        } else {
            0.0
        };

        SummaryData {
            current_value,
            total_investment,
            total_pl,
            todays_pl,
            total_pl_pct,
            todays_pl_pct,
        }
    }
}
