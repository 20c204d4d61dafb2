//! Port traits: boundaries between the domain and the outside world.

pub mod clock_port;
pub mod config_port;
pub mod holdings_port;
pub mod oracle_port;
