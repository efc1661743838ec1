//! Selector synthesis & ranking - robust identifiers for captured elements
//!
//! This crate turns one captured element snapshot into a ranked set of
//! locators for later replay:
//! - Tiered CSS candidate generation (test ids down to text matching)
//! - Anti-pattern filtering of hashed ids and CSS-in-JS classes
//! - Four-axis scoring (reliability, compatibility, uniqueness, stability)
//! - Guarded XPath as the last link of every fallback chain
//!
//! Every entry point is a pure function of its input descriptor.

pub mod config;
pub mod errors;
pub mod exhaustive;
pub mod predicates;
pub mod resolver;
pub mod scorer;
pub mod strategies;
mod syntax;
pub mod types;
pub mod xpath;

pub use config::*;
pub use errors::*;
pub use exhaustive::*;
pub use predicates::*;
pub use resolver::*;
pub use scorer::*;
pub use strategies::*;
pub use types::*;
pub use xpath::*;

pub use selector_core_types::{BoundingRect, ElementDescriptor};
