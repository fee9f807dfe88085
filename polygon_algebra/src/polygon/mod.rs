//! This module has all the types and functions associated with rings, polygons, and polygon
//! boolean operations.
mod boolean;
pub mod internal;
mod poly;
mod ring;
mod types;

pub use boolean::*;
pub use poly::*;
pub use ring::*;
pub use types::*;

pub use internal::crossings::SegmentOrderCache;
