//! Configuration loading and yearly reference tables.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ReferenceTable, ReferenceTableConfig, TableSet};
