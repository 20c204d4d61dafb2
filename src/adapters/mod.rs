//! Concrete adapter implementations for ports.

pub mod builtin_holdings;
pub mod canned_oracle;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod logging;
pub mod scheduler;
pub mod system_clock;
