//! Data module - CSV loading, cleaning and the survey schema

mod loader;
mod processor;
pub mod schema;

pub use loader::{DataLoader, LoaderError};
pub use processor::{round_tenths, DataProcessor, ProcessorError};
pub(crate) use processor::{is_float, is_integer};
