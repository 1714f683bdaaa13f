//! Configuration loading and validation
//!
//! Configuration comes from an optional TOML file; every field has a
//! default, so the crawler also runs with no file at all. CLI flags
//! override loaded values in `main`.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, FilterConfig};
pub use validation::validate;
