//! Free-form analyst queries with optional symbol / sector context.

use super::error::SmartTradeError;
use crate::ports::oracle_port::TextOracle;

pub const ANALYSIS_FAILED: &str = "Failed to get analysis. Please try again.";

/// Prefix the user's question with whatever context was selected.
pub fn build_prompt(
    question: &str,
    symbol: Option<&str>,
    sector: Option<&str>,
) -> Result<String, SmartTradeError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(SmartTradeError::EmptyPrompt);
    }
    let symbol = symbol.map(str::trim).filter(|s| !s.is_empty());
    let sector = sector.map(str::trim).filter(|s| !s.is_empty());

    let prefix = match (symbol, sector) {
        (Some(sym), Some(sec)) => format!("For the stock {sym} in the {sec} sector: "),
        (Some(sym), None) => format!("For the stock {sym}: "),
        (None, Some(sec)) => format!("For the {sec} sector: "),
        (None, None) => String::new(),
    };
    Ok(format!("{prefix}{question}"))
}

/// Ask the oracle. Oracle failures degrade to [`ANALYSIS_FAILED`]; only an
/// empty question is an error.
pub fn ask(
    oracle: &dyn TextOracle,
    question: &str,
    symbol: Option<&str>,
    sector: Option<&str>,
) -> Result<String, SmartTradeError> {
    let prompt = build_prompt(question, symbol, sector)?;
    match oracle.respond(&prompt) {
        Ok(answer) => Ok(answer),
        Err(e) => {
            tracing::warn!(error = %e, "analyst query failed");
            Ok(ANALYSIS_FAILED.to_string())
        }
    }
}
