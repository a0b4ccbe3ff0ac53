//! Core business logic abstractions

pub mod convert;
pub mod format;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{AmountInput, Conversion, ConversionRequest, ValidationError};
pub use rates::{RateResolution, RateSource, RateTable};
