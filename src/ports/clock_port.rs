//! Wall-clock source, injected so ticks and notifications can be timestamped
//! deterministically in tests.

use chrono::{DateTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
