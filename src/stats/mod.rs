//! Stats module - count tables and cross-tabulations

mod aggregator;

pub use aggregator::{AggregateError, Aggregator, CountTable, CrossTab, DashboardData, OrdinalKey};
