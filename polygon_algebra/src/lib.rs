#[macro_use]
mod macros;

pub mod core;
pub mod error;
pub mod polygon;

pub use crate::error::PolygonError;
pub use crate::polygon::{
    difference, intersect, union, xor, BooleanOp, HoleFlag, Polygon, PolygonBooleanOptions, Ring,
};
