//! Property tests over random sessions.

mod common;

use common::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use smarttrade::domain::notification::NotificationSink;
use smarttrade::domain::portfolio::Portfolio;
use smarttrade::domain::rule::{ExitReason, RuleStatus};
use smarttrade::domain::session::{Session, SessionConfig};
use smarttrade::domain::summary::SummaryData;
use smarttrade::domain::ticker::{TickerConfig, perturb};

fn holdings_strategy() -> impl Strategy<Value = Vec<(f64, u64, f64)>> {
    prop::collection::vec((1.0f64..5000.0, 0u64..500, 0.0f64..5000.0), 1..8)
}

fn to_instruments(raw: &[(f64, u64, f64)]) -> Vec<smarttrade::domain::instrument::Instrument> {
    raw.iter()
        .enumerate()
        .map(|(i, &(price, qty, avg))| holding(&format!("SYM{i}"), price, qty, avg))
        .collect()
}

proptest! {
    #[test]
    fn perturbed_prices_stay_positive(price in 0.01f64..1e6, u in 0.0f64..1.0, divisor in 1.0f64..1000.0) {
        if let Some(next) = perturb(price, u, divisor) {
            prop_assert!(next.is_finite());
            prop_assert!(next > 0.0);
            prop_assert!((next - price).abs() <= price * 0.5 / divisor + 1e-9);
        }
    }

    #[test]
    fn prices_stay_finite_and_positive(
        raw in holdings_strategy(),
        seed in any::<u64>(),
        divisor in 2.0f64..400.0,
        ticks in 1usize..200,
    ) {
        let config = SessionConfig {
            ticker: TickerConfig { update_probability: 0.6, volatility_divisor: divisor },
            ..Default::default()
        };
        let mut session = Session::new(to_instruments(&raw), config);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..ticks {
            session.step(&mut rng, market_open());
        }
        for inst in session.instruments() {
            prop_assert!(inst.price.is_finite());
            prop_assert!(inst.price > 0.0);
        }
        prop_assert_eq!(session.ticks(), ticks as u64);
    }

    #[test]
    fn summary_totals_are_consistent(raw in holdings_strategy()) {
        let summary = SummaryData::compute(&Portfolio::new(to_instruments(&raw)));
        let tolerance = 1e-6 * summary.current_value.abs().max(summary.total_investment.abs()).max(1.0);
        prop_assert!((summary.total_pl - (summary.current_value - summary.total_investment)).abs() <= tolerance);
        prop_assert!(summary.total_pl_pct.is_finite());
        prop_assert!(summary.todays_pl_pct.is_finite());
    }

    #[test]
    fn sink_never_exceeds_capacity(capacity in 1usize..30, pushes in 0usize..100) {
        let mut sink = NotificationSink::with_capacity(capacity);
        for i in 0..pushes {
            sink.push(smarttrade::domain::notification::NotificationKind::Info, format!("event {i}"), market_open());
        }
        prop_assert_eq!(sink.len(), pushes.min(capacity));
        if pushes > 0 {
            let newest = sink.iter().next().map(|e| e.message.clone());
            prop_assert_eq!(newest, Some(format!("event {}", pushes - 1)));
        }
    }

    #[test]
    fn completed_rules_respect_their_thresholds(seed in any::<u64>()) {
        let config = SessionConfig {
            ticker: TickerConfig { update_probability: 1.0, volatility_divisor: 20.0 },
            ..Default::default()
        };
        let mut session = Session::new(vec![holding("TCS", 100.0, 10, 100.0)], config);
        session
            .activate_strategy(rule_params("TCS", 104.0, 96.0, 100.0), market_open())
            .unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..300 {
            for closure in session.step(&mut rng, market_open()).closures {
                match closure.reason {
                    ExitReason::TargetHit => prop_assert!(closure.exit_price >= 104.0),
                    ExitReason::StopLossHit => prop_assert!(closure.exit_price <= 96.0),
                }
            }
        }
        let rule = &session.rules()[0];
        if rule.status() == RuleStatus::Completed {
            prop_assert!(session.instrument("TCS").is_none());
        } else {
            let price = session.instrument("TCS").map(|i| i.price).unwrap_or_default();
            prop_assert!(price > 96.0 && price < 104.0);
        }
    }
}
