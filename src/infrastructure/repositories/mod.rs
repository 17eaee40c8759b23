pub mod conversion_repository;
pub mod edge_conversion_repository;

pub use conversion_repository::{ConversionError, ConversionRepository};
pub use edge_conversion_repository::{EdgeConversionRepository, DEFAULT_EDGE_ENDPOINT};
