pub mod formatting;

pub use formatting::{format_millis, truncate_string};
