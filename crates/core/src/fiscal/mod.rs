//! Fiscal periods that bound where entries may be dated and finalized.

pub mod period;

pub use period::{FiscalPeriod, PeriodStatus};
