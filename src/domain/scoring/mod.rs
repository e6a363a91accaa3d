//! Scoring Module - Pure recommendation engine.
//!
//! Turns the weighted pros and cons of a decision into a recommendation
//! (`Yes` / `No` / `Maybe`) and a visual tilt angle for the scale beam.
//!
//! All functions are pure and stateless. The engine is total: every integer
//! input produces a result, so it needs no error type.

mod engine;

pub use engine::{
    Recommendation, Score, ScoringEngine, MAX_TILT_DEGREES, NO_DIFFERENCE_THRESHOLD,
    NO_RATIO_THRESHOLD, TILT_DIVISOR, YES_DIFFERENCE_THRESHOLD, YES_RATIO_THRESHOLD,
};
