pub mod invalidation;
pub mod key;
pub mod pattern;
pub mod store;

pub use invalidation::{tier_for, InvalidationPolicy, Mutation, Tier};
pub use key::EntityKind;
pub use pattern::PatternCompiler;
pub use store::CacheStore;
