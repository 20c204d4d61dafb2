//! Core domain types and logic.

pub mod analyst;
pub mod config_validation;
pub mod error;
pub mod evaluator;
pub mod instrument;
pub mod notification;
pub mod portfolio;
pub mod rule;
pub mod seed;
pub mod session;
pub mod suggestion;
pub mod summary;
pub mod ticker;
pub mod universe;
