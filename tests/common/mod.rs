#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use smarttrade::domain::error::SmartTradeError;
use smarttrade::domain::instrument::Instrument;
use smarttrade::domain::rule::RuleParams;
use smarttrade::domain::session::SessionConfig;
use smarttrade::domain::ticker::TickerConfig;
use smarttrade::ports::clock_port::Clock;
use smarttrade::ports::oracle_port::TextOracle;
use std::cell::{Cell, RefCell};

/// Clock that advances by a fixed step on every read.
pub struct StepClock {
    next: Cell<DateTime<Utc>>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// Oracle that records prompts and returns a fixed answer, or fails.
pub struct StubOracle {
    pub answer: Option<String>,
    pub prompts: RefCell<Vec<String>>,
}

impl StubOracle {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextOracle for StubOracle {
    fn respond(&self, prompt: &str) -> Result<String, SmartTradeError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer.clone().ok_or_else(|| SmartTradeError::Oracle {
            reason: "stub oracle offline".into(),
        })
    }
}

pub fn market_open() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 15, 0).unwrap()
}

pub fn holding(symbol: &str, price: f64, quantity: u64, avg_price: f64) -> Instrument {
    Instrument::new(symbol, symbol, price, quantity, avg_price)
}

pub fn sample_holdings() -> Vec<Instrument> {
    vec![holding("TCS", 100.0, 10, 100.0), holding("INFY", 45.0, 5, 50.0)]
}

pub fn rule_params(symbol: &str, target: f64, stop: f64, activation: f64) -> RuleParams {
    RuleParams {
        symbol: symbol.to_string(),
        target_price: target,
        stop_loss_price: stop,
        activation_price: activation,
        quantity: 10,
        avg_price: 100.0,
    }
}

/// Prices never move; every tick only evaluates and aggregates.
pub fn frozen_config() -> SessionConfig {
    SessionConfig {
        ticker: TickerConfig {
            update_probability: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Every instrument moves every tick.
pub fn volatile_config(divisor: f64) -> SessionConfig {
    SessionConfig {
        ticker: TickerConfig {
            update_probability: 1.0,
            volatility_divisor: divisor,
        },
        ..Default::default()
    }
}
