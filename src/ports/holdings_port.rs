//! Source of the session's seed holdings.

use crate::domain::error::SmartTradeError;
use crate::domain::instrument::Instrument;

pub trait HoldingsPort {
    fn load_holdings(&self) -> Result<Vec<Instrument>, SmartTradeError>;
}
