pub mod frame;
pub mod loader;

pub use frame::{AttrValue, DataFrame};
pub use loader::{format_prefix, CsvLoader};
