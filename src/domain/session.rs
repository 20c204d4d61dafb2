//! Simulation session: owns holdings, automation rules and the notification
//! log, and runs one tick at a time.
//!
//! A tick is ticker, then evaluator, then summary, all inside [`Session::step`].
//! Nothing else mutates session state.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::error::SmartTradeError;
use super::evaluator::{self, Closure};
use super::instrument::Instrument;
use super::notification::{NotificationEvent, NotificationKind, NotificationSink};
use super::portfolio::Portfolio;
use super::rule::{AutomationRule, RuleParams};
use super::summary::SummaryData;
use super::ticker::{MarketTicker, TickStats, TickerConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub ticker: TickerConfig,
    pub notification_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            ticker: TickerConfig::default(),
            notification_capacity: super::notification::DEFAULT_CAPACITY,
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub stats: TickStats,
    pub closures: Vec<Closure>,
    pub summary: SummaryData,
}

#[derive(Debug, Clone)]
pub struct Session {
    portfolio: Portfolio,
    rules: Vec<AutomationRule>,
    sink: NotificationSink,
    ticker: MarketTicker,
    summary: SummaryData,
    ticks: u64,
}

impl Session {
    pub fn new(seed: Vec<Instrument>, config: SessionConfig) -> Self {
        let portfolio = Portfolio::new(seed);
        let summary = SummaryData::compute(&portfolio);
        Session {
            portfolio,
            rules: Vec::new(),
            sink: NotificationSink::with_capacity(config.notification_capacity),
            ticker: MarketTicker::new(config.ticker),
            summary,
            ticks: 0,
        }
    }

    pub fn activate_strategy(
        &mut self,
        params: RuleParams,
        now: DateTime<Utc>,
    ) -> Result<&AutomationRule, SmartTradeError> {
        if !self.portfolio.contains(&params.symbol) {
            return Err(SmartTradeError::UnknownSymbol {
                symbol: params.symbol,
            });
        }
        if self.active_rule(&params.symbol).is_some() {
            return Err(SmartTradeError::DuplicateStrategy {
                symbol: params.symbol,
            });
        }

        let rule = AutomationRule::activate(params, now)?;
        tracing::info!(
            symbol = %rule.symbol,
            target = rule.target_price,
            stop_loss = rule.stop_loss_price,
            "strategy activated"
        );
        self.sink.push(
            NotificationKind::Info,
            format!(
                "AI Agent activated for {}. Target: {:.2}, Stop-loss: {:.2}",
                rule.symbol, rule.target_price, rule.stop_loss_price
            ),
            now,
        );
        self.rules.push(rule);
        Ok(&self.rules[self.rules.len() - 1])
    }

    pub fn deactivate_strategy(
        &mut self,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SmartTradeError> {
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.symbol == symbol && r.is_active())
            .ok_or_else(|| SmartTradeError::NoActiveStrategy {
                symbol: symbol.to_string(),
            })?;
        rule.cancel()?;
        tracing::info!(symbol, "strategy deactivated");
        self.sink.push(
            NotificationKind::Info,
            format!("AI Agent for {symbol} has been deactivated."),
            now,
        );
        Ok(())
    }

    /// Run one tick.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) -> TickReport {
        self.ticks += 1;
        let stats = self.ticker.tick(&mut self.portfolio, rng);
        let closures = evaluator::evaluate(&mut self.portfolio, &mut self.rules, &mut self.sink, now);
        self.summary = SummaryData::compute(&self.portfolio);
        tracing::debug!(
            tick = self.ticks,
            moved = stats.moved,
            closed = closures.len(),
            value = self.summary.current_value,
            "tick complete"
        );
        TickReport {
            tick: self.ticks,
            stats,
            closures,
            summary: self.summary,
        }
    }

    /// Record an externally produced event, e.g. a failed oracle call.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.sink.push(kind, message, now);
    }

    pub fn active_rule(&self, symbol: &str) -> Option<&AutomationRule> {
        self.rules.iter().find(|r| r.symbol == symbol && r.is_active())
    }

    pub fn instruments(&self) -> &[Instrument] {
        self.portfolio.instruments()
    }

    pub fn instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.portfolio.get(symbol)
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn rules(&self) -> &[AutomationRule] {
        &self.rules
    }

    pub fn notifications(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.sink.iter()
    }

    pub fn summary(&self) -> SummaryData {
        self.summary
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
