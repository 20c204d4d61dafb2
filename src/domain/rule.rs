//! Automation rules: a take-profit / stop-loss pair attached to one holding.
//!
//! Lifecycle is `Active -> Completed` when a threshold is crossed, or
//! `Active -> Cancelled` when the user deactivates it. Both end states are
//! terminal.

use chrono::{DateTime, Utc};
use std::fmt;

use super::error::SmartTradeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Active,
    Completed,
    Cancelled,
}

impl RuleStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RuleStatus::Active)
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleStatus::Active => write!(f, "active"),
            RuleStatus::Completed => write!(f, "completed"),
            RuleStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    TargetHit,
    StopLossHit,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::TargetHit => write!(f, "target hit"),
            ExitReason::StopLossHit => write!(f, "stop-loss hit"),
        }
    }
}

/// Parameters captured when a strategy is activated.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleParams {
    pub symbol: String,
    pub target_price: f64,
    pub stop_loss_price: f64,
    pub activation_price: f64,
    pub quantity: u64,
    pub avg_price: f64,
}

impl RuleParams {
    /// Checks `target > activation > stop > 0` with finite prices.
    pub fn validate(&self) -> Result<(), SmartTradeError> {
        let invalid = |reason: &str| SmartTradeError::InvalidStrategy {
            symbol: self.symbol.clone(),
            reason: reason.to_string(),
        };
        let prices = [self.target_price, self.stop_loss_price, self.activation_price];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(invalid("prices must be finite"));
        }
        if self.stop_loss_price <= 0.0 {
            return Err(invalid("stop-loss price must be positive"));
        }
        if self.target_price <= self.activation_price {
            return Err(invalid("target price must be above activation price"));
        }
        if self.activation_price <= self.stop_loss_price {
            return Err(invalid("stop-loss price must be below activation price"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutomationRule {
    pub symbol: String,
    pub target_price: f64,
    pub stop_loss_price: f64,
    pub activation_price: f64,
    pub quantity: u64,
    pub avg_price: f64,
    status: RuleStatus,
    pub created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    exit: Option<RuleExit>,
}

/// How and at what price a completed rule closed its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleExit {
    pub reason: ExitReason,
    pub price: f64,
    pub pnl: f64,
}

impl AutomationRule {
    pub fn activate(params: RuleParams, now: DateTime<Utc>) -> Result<Self, SmartTradeError> {
        params.validate()?;
        Ok(AutomationRule {
            symbol: params.symbol,
            target_price: params.target_price,
            stop_loss_price: params.stop_loss_price,
            activation_price: params.activation_price,
            quantity: params.quantity,
            avg_price: params.avg_price,
            status: RuleStatus::Active,
            created_at: now,
            completed_at: None,
            exit: None,
        })
    }

    pub fn status(&self) -> RuleStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn exit(&self) -> Option<RuleExit> {
        self.exit
    }

    /// Which threshold `price` crosses, if any. Target wins ties.
    pub fn trigger(&self, price: f64) -> Option<ExitReason> {
        if price >= self.target_price {
            Some(ExitReason::TargetHit)
        } else if price <= self.stop_loss_price {
            Some(ExitReason::StopLossHit)
        } else {
            None
        }
    }

    /// P&L on the captured quantity and cost basis if closed at `price`.
    pub fn pnl_at(&self, price: f64) -> f64 {
        (price - self.avg_price) * self.quantity as f64
    }

    pub fn complete(
        &mut self,
        reason: ExitReason,
        price: f64,
        now: DateTime<Utc>,
    ) -> Result<RuleExit, SmartTradeError> {
        self.ensure_active()?;
        let exit = RuleExit {
            reason,
            price,
            pnl: self.pnl_at(price),
        };
        self.status = RuleStatus::Completed;
        self.completed_at = Some(now);
        self.exit = Some(exit);
        Ok(exit)
    }

    pub fn cancel(&mut self) -> Result<(), SmartTradeError> {
        self.ensure_active()?;
        self.status = RuleStatus::Cancelled;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SmartTradeError> {
        if self.status.is_terminal() {
            return Err(SmartTradeError::RuleTransition {
                symbol: self.symbol.clone(),
                status: self.status.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 9, 15, 0).unwrap()
    }

    fn params() -> RuleParams {
        RuleParams {
            symbol: "TCS".into(),
            target_price: 110.0,
            stop_loss_price: 95.0,
            activation_price: 100.0,
            quantity: 10,
            avg_price: 100.0,
        }
    }

    #[test]
    fn activate_starts_active() {
        let rule = AutomationRule::activate(params(), now()).unwrap();
        assert_eq!(rule.status(), RuleStatus::Active);
        assert_eq!(rule.created_at, now());
        assert!(rule.completed_at().is_none());
        assert!(rule.exit().is_none());
    }

    #[test]
    fn activate_rejects_target_below_activation() {
        let p = RuleParams {
            target_price: 99.0,
            ..params()
        };
        let err = AutomationRule::activate(p, now()).unwrap_err();
        assert!(matches!(err, SmartTradeError::InvalidStrategy { .. }));
    }

    #[test]
    fn activate_rejects_stop_above_activation() {
        let p = RuleParams {
            stop_loss_price: 100.0,
            ..params()
        };
        assert!(AutomationRule::activate(p, now()).is_err());
    }

    #[test]
    fn activate_rejects_non_finite_prices() {
        let p = RuleParams {
            target_price: f64::INFINITY,
            ..params()
        };
        assert!(AutomationRule::activate(p, now()).is_err());
    }

    #[test]
    fn activate_rejects_non_positive_stop() {
        let p = RuleParams {
            stop_loss_price: 0.0,
            ..params()
        };
        assert!(AutomationRule::activate(p, now()).is_err());
    }

    #[test]
    fn trigger_thresholds() {
        let rule = AutomationRule::activate(params(), now()).unwrap();
        assert_eq!(rule.trigger(110.0), Some(ExitReason::TargetHit));
        assert_eq!(rule.trigger(111.0), Some(ExitReason::TargetHit));
        assert_eq!(rule.trigger(95.0), Some(ExitReason::StopLossHit));
        assert_eq!(rule.trigger(90.0), Some(ExitReason::StopLossHit));
        assert_eq!(rule.trigger(100.0), None);
    }

    #[test]
    fn trigger_prefers_target_when_thresholds_overlap() {
        let mut rule = AutomationRule::activate(params(), now()).unwrap();
        rule.stop_loss_price = 120.0;
        assert_eq!(rule.trigger(115.0), Some(ExitReason::TargetHit));
    }

    #[test]
    fn complete_records_exit() {
        let mut rule = AutomationRule::activate(params(), now()).unwrap();
        let exit = rule.complete(ExitReason::TargetHit, 112.0, now()).unwrap();
        assert_eq!(rule.status(), RuleStatus::Completed);
        assert_eq!(rule.completed_at(), Some(now()));
        assert!((exit.pnl - 120.0).abs() < 1e-9);
        assert_eq!(rule.exit(), Some(exit));
    }

    #[test]
    fn cancel_active_rule() {
        let mut rule = AutomationRule::activate(params(), now()).unwrap();
        rule.cancel().unwrap();
        assert_eq!(rule.status(), RuleStatus::Cancelled);
        assert!(rule.completed_at().is_none());
    }

    #[test]
    fn terminal_states_reject_transitions() {
        let mut cancelled = AutomationRule::activate(params(), now()).unwrap();
        cancelled.cancel().unwrap();
        assert!(cancelled.complete(ExitReason::TargetHit, 200.0, now()).is_err());
        assert!(cancelled.cancel().is_err());
        assert_eq!(cancelled.status(), RuleStatus::Cancelled);

        let mut completed = AutomationRule::activate(params(), now()).unwrap();
        completed.complete(ExitReason::StopLossHit, 90.0, now()).unwrap();
        let err = completed.cancel().unwrap_err();
        assert!(matches!(err, SmartTradeError::RuleTransition { status, .. } if status == "completed"));
    }

    #[test]
    fn status_display() {
        assert_eq!(RuleStatus::Active.to_string(), "active");
        assert_eq!(RuleStatus::Cancelled.to_string(), "cancelled");
        assert!(RuleStatus::Completed.is_terminal());
        assert!(!RuleStatus::Active.is_terminal());
    }
}
