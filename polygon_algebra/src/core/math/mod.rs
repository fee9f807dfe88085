//! Core/common math: vectors, segments, bounding rectangles and the segment intersection
//! classifier.
mod base_math;
mod bounding_rect;
mod segment;
mod segment_intersect;
mod vector2;

pub use base_math::*;
pub use bounding_rect::BoundingRect;
pub use segment::Segment;
pub use segment_intersect::{
    segment_segment_intr, segment_segment_intr_eps, IntrPoint, SegmentPosition, SegmentSegmentIntr,
};
pub use vector2::{vec2, Vector2};
