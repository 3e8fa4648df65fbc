pub mod calendar;
pub mod contract;
pub mod dates;
pub mod error;
pub mod types;

#[cfg(feature = "settlement")]
pub mod settlement;

#[cfg(feature = "purchase_orders")]
pub mod purchase_orders;

#[cfg(feature = "borrowing_base")]
pub mod borrowing_base;

pub use error::LendingError;
pub use types::*;

/// Standard result type for all lending-core operations
pub type LendingResult<T> = Result<T, LendingError>;
