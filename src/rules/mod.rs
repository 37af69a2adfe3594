//! Movement rules: path distance and dice validation.

pub mod distance;
pub mod validate;

pub use distance::{distance, measure, Distance, DistanceMethod};
pub use validate::{
    is_capture, turn_violations, validate_movement, validate_turn, ValidationOutcome, Violation,
};
