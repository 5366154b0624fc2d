//! Field values and sentinel encodings

use serde::{Deserialize, Serialize};

/// Encoded value reserved for the Missing sentinel.
///
/// Used to pad variable-length sequences and to stand in for fields an
/// entity does not carry. Categorical vocabularies reserve id 0 for it.
pub const MISSING_VALUE: f32 = 0.0;

/// Encoded value reserved for the Unknown sentinel.
///
/// Stands in for out-of-vocabulary values. Categorical vocabularies
/// reserve id 1 for it.
pub const UNKNOWN_VALUE: f32 = 1.0;

/// A single field's value on one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A scalar value
    Scalar(f32),

    /// A variable-length sequence of values
    Sequence(Vec<f32>),

    /// The Missing sentinel, standing in for absent data
    Missing,

    /// The Unknown sentinel, standing in for out-of-vocabulary data
    Unknown,
}

impl FieldValue {
    /// Check whether this value is a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldValue::Sequence(_))
    }

    /// Check whether this value is one of the sentinels
    pub fn is_sentinel(&self) -> bool {
        matches!(self, FieldValue::Missing | FieldValue::Unknown)
    }

    /// Encode this value as a scalar, if it has a scalar encoding
    ///
    /// Sequences have no single scalar encoding and return `None`.
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            FieldValue::Scalar(v) => Some(*v),
            FieldValue::Missing => Some(MISSING_VALUE),
            FieldValue::Unknown => Some(UNKNOWN_VALUE),
            FieldValue::Sequence(_) => None,
        }
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<f32>> for FieldValue {
    fn from(values: Vec<f32>) -> Self {
        FieldValue::Sequence(values)
    }
}
