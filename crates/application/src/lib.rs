//! Pressbase Application Layer
//!
//! Repository port traits and the use cases that enforce business rules on
//! top of them. Implementations live in the infrastructure crate.
pub mod ports;
pub mod use_cases;
