//! Symbol lists: parsing comma-separated symbols from config or the command
//! line and checking them against the held instruments.

use crate::domain::error::SmartTradeError;
use crate::domain::portfolio::Portfolio;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Fails on the first symbol that is not held.
pub fn require_held(portfolio: &Portfolio, symbols: &[String]) -> Result<(), SmartTradeError> {
    match symbols.iter().find(|s| !portfolio.contains(s)) {
        Some(missing) => Err(SmartTradeError::UnknownSymbol {
            symbol: missing.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::Instrument;

    #[test]
    fn parse_single_symbol() {
        assert_eq!(parse_symbols("TCS").unwrap(), vec!["TCS"]);
    }

    #[test]
    fn parse_trims_and_uppercases() {
        assert_eq!(
            parse_symbols(" tcs , Infy,SBIN ").unwrap(),
            vec!["TCS", "INFY", "SBIN"]
        );
    }

    #[test]
    fn parse_rejects_empty_token() {
        assert_eq!(parse_symbols("TCS,,INFY"), Err(UniverseError::EmptyToken));
        assert_eq!(parse_symbols(""), Err(UniverseError::EmptyToken));
    }

    #[test]
    fn parse_rejects_duplicates() {
        assert_eq!(
            parse_symbols("TCS,tcs"),
            Err(UniverseError::DuplicateSymbol("TCS".into()))
        );
    }

    #[test]
    fn require_held_reports_missing_symbol() {
        let portfolio = Portfolio::new(vec![Instrument::new("TCS", "Tata", 1.0, 1, 1.0)]);
        assert!(require_held(&portfolio, &["TCS".to_string()]).is_ok());
        let err = require_held(&portfolio, &["TCS".to_string(), "WIPRO".to_string()])
            .unwrap_err();
        assert!(matches!(err, SmartTradeError::UnknownSymbol { symbol } if symbol == "WIPRO"));
    }
}
