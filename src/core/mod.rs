//! Core business logic abstractions

pub mod amount;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;

// Re-export main types for cleaner imports
pub use conversion::{ConversionError, ConversionHandler, ConversionRequest, ConvertedAmount};
pub use currency::{CurrencyRateProvider, ExchangeRateTable};
