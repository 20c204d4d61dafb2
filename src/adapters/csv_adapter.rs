//! CSV holdings file adapter.
//!
//! Expected header: `symbol,name,price,quantity,avg_price`.

use crate::domain::error::SmartTradeError;
use crate::domain::instrument::Instrument;
use crate::ports::holdings_port::HoldingsPort;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

pub struct CsvHoldingsAdapter {
    path: PathBuf,
}

impl CsvHoldingsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn parse_err(line: usize, reason: impl std::fmt::Display) -> SmartTradeError {
    SmartTradeError::HoldingsParse {
        reason: format!("record {line}: {reason}"),
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<&'r str, SmartTradeError> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| parse_err(line, format!("missing {name} column")))
}

/// Parse holdings from CSV text.
pub fn parse_holdings(content: &str) -> Result<Vec<Instrument>, SmartTradeError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut holdings = Vec::new();
    let mut seen = HashSet::new();

    for (i, result) in rdr.records().enumerate() {
        let line = i + 1;
        let record = result.map_err(|e| parse_err(line, format!("CSV parse error: {e}")))?;

        let symbol = field(&record, 0, "symbol", line)?.to_uppercase();
        let name = field(&record, 1, "name", line)?;

        let price: f64 = field(&record, 2, "price", line)?
            .parse()
            .map_err(|e| parse_err(line, format!("invalid price value: {e}")))?;
        let quantity: u64 = field(&record, 3, "quantity", line)?
            .parse()
            .map_err(|e| parse_err(line, format!("invalid quantity value: {e}")))?;
        let avg_price: f64 = field(&record, 4, "avg_price", line)?
            .parse()
            .map_err(|e| parse_err(line, format!("invalid avg_price value: {e}")))?;

        if !price.is_finite() || price <= 0.0 {
            return Err(parse_err(line, "price must be positive"));
        }
        if !avg_price.is_finite() || avg_price < 0.0 {
            return Err(parse_err(line, "avg_price must be non-negative"));
        }
        if !seen.insert(symbol.clone()) {
            return Err(parse_err(line, format!("duplicate symbol {symbol}")));
        }

        holdings.push(Instrument::new(&symbol, name, price, quantity, avg_price));
    }

    Ok(holdings)
}

impl HoldingsPort for CsvHoldingsAdapter {
    fn load_holdings(&self) -> Result<Vec<Instrument>, SmartTradeError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SmartTradeError::HoldingsParse {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        parse_holdings(&content)
    }
}
