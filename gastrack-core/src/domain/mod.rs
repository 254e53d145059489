//! Domain types for gastrack

pub mod reading;
pub mod series;

pub use reading::{Reading, ReadingOrigin};
pub use series::{HistorySeries, SeriesError};
