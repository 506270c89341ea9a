//! Error types for field construction.

use thiserror::Error;

/// Errors produced while validating a field configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    /// The drawing bounds were zero, negative or not finite.
    #[error("invalid bounds {width}x{height}: both sides must be positive and finite")]
    InvalidBounds { width: f32, height: f32 },

    /// A scene needs at least one layer of nodes.
    #[error("scene has no layers")]
    NoLayers,

    /// The per-layer falloff left a layer without nodes.
    #[error("layer {layer} would contain no nodes")]
    EmptyLayer { layer: usize },

    /// The pulse-marker pool must hold at least one marker.
    #[error("pulse pool is empty")]
    EmptyPulsePool,

    /// A per-tick chance was outside [0, 1].
    #[error("probability '{name}' must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    /// A (min, max) pair was inverted or not finite.
    #[error("range '{name}' is invalid: min {min} > max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    /// A distance, radius or extent was not strictly positive.
    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bounds_mentions_both_sides() {
        let msg = FieldError::InvalidBounds {
            width: 0.0,
            height: 600.0,
        }
        .to_string();
        assert!(msg.contains("0x600"), "unexpected message: {msg}");
    }

    #[test]
    fn probability_error_names_the_field() {
        let msg = FieldError::InvalidProbability {
            name: "spark_chance",
            value: 1.5,
        }
        .to_string();
        assert!(msg.contains("spark_chance"), "missing name in: {msg}");
        assert!(msg.contains("1.5"), "missing value in: {msg}");
    }

    #[test]
    fn empty_layer_reports_index() {
        let msg = FieldError::EmptyLayer { layer: 4 }.to_string();
        assert!(msg.contains('4'), "missing layer index in: {msg}");
    }
}
