//! Built-in instrument lists used when no holdings file is supplied.

use super::instrument::Instrument;

/// (symbol, name, price, quantity, average cost)
const DEFAULT_HOLDINGS: &[(&str, &str, f64, u64, f64)] = &[
    ("RELIANCE", "Reliance Industries", 3010.55, 50, 2850.00),
    ("TCS", "Tata Consultancy", 3850.20, 25, 3920.50),
    ("HDFCBANK", "HDFC Bank Ltd", 1680.75, 100, 1595.30),
    ("INFY", "Infosys Ltd", 1595.90, 75, 1450.00),
    ("ICICIBANK", "ICICI Bank Ltd", 1150.00, 120, 1020.40),
];

/// (symbol, name, price, change since previous close)
const DEFAULT_WATCHLIST: &[(&str, &str, f64, f64)] = &[
    ("RELIANCE", "Reliance Industries", 3010.55, 45.10),
    ("TCS", "Tata Consultancy", 3850.20, -12.75),
    ("HDFCBANK", "HDFC Bank Ltd", 1680.75, 8.40),
    ("INFY", "Infosys Ltd", 1595.90, -22.15),
    ("ICICIBANK", "ICICI Bank Ltd", 1150.00, 15.60),
    ("SBIN", "State Bank of India", 840.45, 2.10),
    ("BAJFINANCE", "Bajaj Finance Ltd", 7120.80, 120.30),
];

pub fn default_holdings() -> Vec<Instrument> {
    DEFAULT_HOLDINGS
        .iter()
        .map(|&(symbol, name, price, qty, avg)| Instrument::new(symbol, name, price, qty, avg))
        .collect()
}

/// Watched, not held: quantity and cost are zero. Each quote starts with
/// the day's change so far.
pub fn default_watchlist() -> Vec<Instrument> {
    DEFAULT_WATCHLIST
        .iter()
        .map(|&(symbol, name, price, change)| Instrument::with_change(symbol, name, price, change))
        .collect()
}
