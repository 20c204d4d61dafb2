//! Configuration validation.
//!
//! Every key is optional; validation only rejects values that are present
//! and out of range.

use crate::domain::error::SmartTradeError;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), SmartTradeError> {
    validate_simulation(config)?;
    validate_watchlist(config)?;
    validate_strategy(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> SmartTradeError {
    SmartTradeError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_simulation(config: &dyn ConfigPort) -> Result<(), SmartTradeError> {
    if config.get_int("simulation", "tick_interval_ms", 2000) <= 0 {
        return Err(invalid(
            "simulation",
            "tick_interval_ms",
            "tick_interval_ms must be positive",
        ));
    }

    let probability = config.get_double("simulation", "update_probability", 0.6);
    if !(0.0..=1.0).contains(&probability) {
        return Err(invalid(
            "simulation",
            "update_probability",
            "update_probability must be between 0 and 1",
        ));
    }

    let divisor = config.get_double("simulation", "volatility_divisor", 200.0);
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(invalid(
            "simulation",
            "volatility_divisor",
            "volatility_divisor must be positive",
        ));
    }

    if config.get_int("simulation", "notification_capacity", 10) < 1 {
        return Err(invalid(
            "simulation",
            "notification_capacity",
            "notification_capacity must be at least 1",
        ));
    }

    if let Some(seed) = config.get_non_empty("simulation", "seed") {
        if seed.parse::<u64>().is_err() {
            return Err(invalid(
                "simulation",
                "seed",
                "seed must be a non-negative integer",
            ));
        }
    }
    Ok(())
}

fn validate_watchlist(config: &dyn ConfigPort) -> Result<(), SmartTradeError> {
    let divisor = config.get_double("watchlist", "volatility_divisor", 150.0);
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(invalid(
            "watchlist",
            "volatility_divisor",
            "volatility_divisor must be positive",
        ));
    }
    Ok(())
}

fn validate_strategy(config: &dyn ConfigPort) -> Result<(), SmartTradeError> {
    let target = config.get_double("strategy", "profit_target_pct", 10.0);
    if !target.is_finite() || target <= 0.0 {
        return Err(invalid(
            "strategy",
            "profit_target_pct",
            "profit_target_pct must be positive",
        ));
    }
    let stop = config.get_double("strategy", "stop_loss_pct", 5.0);
    if !(stop > 0.0 && stop < 100.0) {
        return Err(invalid(
            "strategy",
            "stop_loss_pct",
            "stop_loss_pct must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_logging(config: &dyn ConfigPort) -> Result<(), SmartTradeError> {
    match config.get_non_empty("logging", "level") {
        None => Ok(()),
        Some(level) => match level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            _ => Err(invalid(
                "logging",
                "level",
                "level must be one of trace, debug, info, warn, error, off",
            )),
        },
    }
}
