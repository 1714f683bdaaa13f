//! URL handling for hostbound
//!
//! Host extraction plus the stateless eligibility filter that decides
//! whether a discovered URL belongs in the crawl: same host as the origin,
//! no fragment, extension not on the denylist.

mod domain;
mod filter;

pub use domain::extract_host;
pub use filter::{evaluate, Eligibility, SkipReason};
