pub mod aggregate;
pub mod market;
pub mod price;
pub mod record;
pub mod records;
pub mod seasonal;

pub use aggregate::*;
pub use market::*;
pub use price::*;
pub use record::*;
pub use records::*;
pub use seasonal::*;
