//! Core module has common/shared math and traits: the value layer the boolean engine is built on.
pub mod math;
pub mod traits;
