//! Configuration section definitions.

mod blog;

pub use blog::BlogConfig;
