//! Pure analysis functions over date-ordered [`PriceRecord`](crate::models::PriceRecord)
//! slices. Nothing here touches the store or validates parameters.

pub mod aggregate;
pub mod correlation;
pub mod market;
pub mod records;
pub mod seasonal;
pub mod stats;
pub mod trend;
