//! Random-walk price simulation.
//!
//! Each tick moves a price to `price + (u - 0.5) * price / divisor` where `u`
//! is drawn uniformly from `[0, 1)`. A candidate that is non-finite or not
//! strictly positive is discarded and the old price kept.

use rand::Rng;

use super::portfolio::Portfolio;

pub const DEFAULT_UPDATE_PROBABILITY: f64 = 0.6;
pub const DEFAULT_VOLATILITY_DIVISOR: f64 = 200.0;
pub const WATCHLIST_VOLATILITY_DIVISOR: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickerConfig {
    pub update_probability: f64,
    pub volatility_divisor: f64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfig {
            update_probability: DEFAULT_UPDATE_PROBABILITY,
            volatility_divisor: DEFAULT_VOLATILITY_DIVISOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    pub moved: usize,
    pub rejected: usize,
}

/// Candidate price for a uniform draw `u`, or `None` if the step would leave
/// the price non-finite or non-positive.
pub fn perturb(price: f64, u: f64, volatility_divisor: f64) -> Option<f64> {
    let next = price + (u - 0.5) * price / volatility_divisor;
    if next.is_finite() && next > 0.0 {
        Some(next)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketTicker {
    config: TickerConfig,
}

impl MarketTicker {
    /// A non-finite update probability is treated as zero; anything else is
    /// clamped to `[0, 1]`.
    pub fn new(mut config: TickerConfig) -> Self {
        config.update_probability = if config.update_probability.is_finite() {
            config.update_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        MarketTicker { config }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Holdings mode: every instrument independently moves with the
    /// configured probability.
    pub fn tick<R: Rng + ?Sized>(&self, portfolio: &mut Portfolio, rng: &mut R) -> TickStats {
        let probability = self.config.update_probability;
        let symbols: Vec<String> = portfolio
            .instruments()
            .iter()
            .map(|i| i.symbol.clone())
            .collect();

        let mut stats = TickStats::default();
        for symbol in symbols {
            if !rng.gen_bool(probability) {
                continue;
            }
            let u: f64 = rng.r#gen();
            self.apply(portfolio, &symbol, u, &mut stats);
        }
        stats
    }

    /// Watchlist mode: exactly one randomly chosen instrument moves.
    pub fn tick_one<R: Rng + ?Sized>(&self, portfolio: &mut Portfolio, rng: &mut R) -> TickStats {
        let mut stats = TickStats::default();
        if portfolio.is_empty() {
            return stats;
        }
        let idx = rng.gen_range(0..portfolio.len());
        let symbol = portfolio.instruments()[idx].symbol.clone();
        let u: f64 = rng.r#gen();
        self.apply(portfolio, &symbol, u, &mut stats);
        stats
    }

    fn apply(&self, portfolio: &mut Portfolio, symbol: &str, u: f64, stats: &mut TickStats) {
        let Some(open) = portfolio.open_price(symbol) else {
            return;
        };
        let Some(instrument) = portfolio.get_mut(symbol) else {
            return;
        };
        match perturb(instrument.price, u, self.config.volatility_divisor) {
            Some(next) => {
                instrument.reprice(next, open);
                stats.moved += 1;
            }
            None => {
                tracing::warn!(
                    symbol,
                    price = instrument.price,
                    "rejected price step outside the positive range"
                );
                stats.rejected += 1;
            }
        }
    }
}
