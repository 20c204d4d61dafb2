//! [`HoldingsPort`] serving the built-in seed list.

use crate::domain::error::SmartTradeError;
use crate::domain::instrument::Instrument;
use crate::domain::seed;
use crate::ports::holdings_port::HoldingsPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinHoldings;

impl HoldingsPort for BuiltinHoldings {
    fn load_holdings(&self) -> Result<Vec<Instrument>, SmartTradeError> {
        Ok(seed::default_holdings())
    }
}
