//! Text-generation capability used for strategy commentary and analyst answers.

use crate::domain::error::SmartTradeError;

pub trait TextOracle {
    fn respond(&self, prompt: &str) -> Result<String, SmartTradeError>;
}
