pub mod operator;
pub mod specifier;

pub use specifier::{SkipReason, update_specifier};
