//! Analysis passes over an assembled grammar.
//!
//! - `refs` - places that mention rule names
//! - `link` - every mentioned name is defined
//! - `reach` - rules reachable from the start rule
//! - `shape` - field uniformity of placeholder rules
//! - `patterns` - regex validation

pub mod link;
pub mod patterns;
pub mod reach;
pub mod refs;
pub mod shape;
pub mod utils;


pub use link::link;
pub use patterns::check_patterns;
pub use reach::{check_reachability, unreachable_rules};
pub use refs::{RefSite, Reference, references};
pub use shape::check_field_shapes;
