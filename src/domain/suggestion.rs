//! Suggested take-profit / stop-loss strategies for a holding.

use super::error::SmartTradeError;
use super::instrument::Instrument;
use super::rule::RuleParams;
use crate::ports::oracle_port::TextOracle;

pub const DEFAULT_PROFIT_TARGET_PCT: f64 = 10.0;
pub const DEFAULT_STOP_LOSS_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionConfig {
    pub profit_target_pct: f64,
    pub stop_loss_pct: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            profit_target_pct: DEFAULT_PROFIT_TARGET_PCT,
            stop_loss_pct: DEFAULT_STOP_LOSS_PCT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategySuggestion {
    pub params: RuleParams,
    pub commentary: String,
}

pub fn strategy_prompt(symbol: &str) -> String {
    format!("Generate profit booking strategy for {symbol}")
}

/// Thresholds anchored on the holding's current price.
pub fn suggested_params(instrument: &Instrument, config: &SuggestionConfig) -> RuleParams {
    let price = instrument.price;
    RuleParams {
        symbol: instrument.symbol.clone(),
        target_price: price * (1.0 + config.profit_target_pct / 100.0),
        stop_loss_price: price * (1.0 - config.stop_loss_pct / 100.0),
        activation_price: price,
        quantity: instrument.quantity,
        avg_price: instrument.avg_price,
    }
}

pub fn suggest_strategy(
    instrument: &Instrument,
    config: &SuggestionConfig,
    oracle: &dyn TextOracle,
) -> Result<StrategySuggestion, SmartTradeError> {
    let params = suggested_params(instrument, config);
    params.validate()?;
    let commentary = oracle.respond(&strategy_prompt(&instrument.symbol))?;
    Ok(StrategySuggestion { params, commentary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    struct RecordingOracle {
        prompts: RefCell<Vec<String>>,
    }

    impl TextOracle for RecordingOracle {
        fn respond(&self, prompt: &str) -> Result<String, SmartTradeError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok("hold for the breakout".into())
        }
    }

    struct FailingOracle;

    impl TextOracle for FailingOracle {
        fn respond(&self, _prompt: &str) -> Result<String, SmartTradeError> {
            Err(SmartTradeError::Oracle {
                reason: "offline".into(),
            })
        }
    }

    fn holding() -> Instrument {
        Instrument::new("RELIANCE", "Reliance Industries", 3000.0, 10, 2800.0)
    }

    #[test]
    fn default_thresholds() {
        let params = suggested_params(&holding(), &SuggestionConfig::default());
        assert_relative_eq!(params.target_price, 3300.0);
        assert_relative_eq!(params.stop_loss_price, 2850.0);
        assert_relative_eq!(params.activation_price, 3000.0);
        assert_eq!(params.quantity, 10);
        assert_relative_eq!(params.avg_price, 2800.0);
    }

    #[test]
    fn suggestion_asks_oracle_with_symbol() {
        let oracle = RecordingOracle {
            prompts: RefCell::new(Vec::new()),
        };
        let suggestion =
            suggest_strategy(&holding(), &SuggestionConfig::default(), &oracle).unwrap();
        assert_eq!(suggestion.commentary, "hold for the breakout");
        assert_eq!(
            oracle.prompts.borrow().as_slice(),
            ["Generate profit booking strategy for RELIANCE"]
        );
    }

    #[test]
    fn oracle_failure_propagates() {
        let err = suggest_strategy(&holding(), &SuggestionConfig::default(), &FailingOracle)
            .unwrap_err();
        assert!(matches!(err, SmartTradeError::Oracle { .. }));
    }

    #[test]
    fn stop_at_or_below_zero_is_invalid() {
        let config = SuggestionConfig {
            profit_target_pct: 10.0,
            stop_loss_pct: 100.0,
        };
        let err = suggest_strategy(&holding(), &config, &FailingOracle).unwrap_err();
        assert!(matches!(err, SmartTradeError::InvalidStrategy { .. }));
    }
}
