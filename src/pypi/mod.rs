pub mod client;

pub use client::{DEFAULT_INDEX_URL, PypiClient};
