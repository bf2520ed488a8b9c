//! Data module - CSV loading, cleaning and filtering

mod filter;
mod loader;
mod model;
mod processor;

pub use filter::{FilterEngine, FilteredView};
pub use loader::{DataLoader, LoaderError, TextEncoding};
pub use model::{ClimateSubset, DisasterRecord, FilterCriteria, YearRange};
pub use processor::{DataProcessor, ProcessorError};
