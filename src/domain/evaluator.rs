//! Take-profit / stop-loss evaluation of active automation rules.
//!
//! Two-pass: first collect every rule whose threshold is crossed at the
//! current price, then close each triggered position.

use chrono::{DateTime, Utc};

use super::notification::{NotificationKind, NotificationSink};
use super::portfolio::Portfolio;
use super::rule::{AutomationRule, ExitReason};

/// A position closed by an automation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub symbol: String,
    pub reason: ExitReason,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Evaluate `rules` against `portfolio` at time `now`.
///
/// Rules whose instrument is no longer held are skipped. Non-active rules are
/// never touched, so calling this again with unchanged prices is a no-op.
pub fn evaluate(
    portfolio: &mut Portfolio,
    rules: &mut [AutomationRule],
    sink: &mut NotificationSink,
    now: DateTime<Utc>,
) -> Vec<Closure> {
    let triggered: Vec<(usize, ExitReason, f64)> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.is_active())
        .filter_map(|(idx, rule)| {
            let price = portfolio.get(&rule.symbol)?.price;
            rule.trigger(price).map(|reason| (idx, reason, price))
        })
        .collect();

    let mut closures = Vec::with_capacity(triggered.len());
    for (idx, reason, price) in triggered {
        let rule = &mut rules[idx];
        let Ok(exit) = rule.complete(reason, price, now) else {
            continue;
        };
        portfolio.remove(&rule.symbol);

        let (kind, message) = closure_message(rule, reason, price, exit.pnl);
        sink.push(kind, message, now);
        tracing::info!(
            symbol = %rule.symbol,
            reason = %reason,
            price,
            pnl = exit.pnl,
            "automation closed position"
        );

        closures.push(Closure {
            symbol: rule.symbol.clone(),
            reason,
            exit_price: price,
            pnl: exit.pnl,
        });
    }
    closures
}

fn closure_message(
    rule: &AutomationRule,
    reason: ExitReason,
    price: f64,
    pnl: f64,
) -> (NotificationKind, String) {
    match reason {
        ExitReason::TargetHit => (
            NotificationKind::Success,
            format!(
                "AI Agent: Target hit for {}. Sold {} shares at {:.2}. Profit: {:.2}",
                rule.symbol, rule.quantity, price, pnl
            ),
        ),
        ExitReason::StopLossHit => (
            NotificationKind::Warning,
            format!(
                "AI Agent: Stop-loss hit for {}. Sold {} shares at {:.2}. P&L: {:.2}",
                rule.symbol, rule.quantity, price, pnl
            ),
        ),
    }
}
