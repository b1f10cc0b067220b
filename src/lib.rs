//! Persona Dash library: survey loading, cleaning, aggregation and dashboard rendering.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
