//! Field tensorization with sentinel padding

use ndarray::{Array1, Array2};

use graph_batch_core::error::{Error, Result};
use graph_batch_core::value::{FieldValue, MISSING_VALUE, UNKNOWN_VALUE};
use graph_batch_core::FieldColumn;

/// Tensorize one field's values across an ordered set of entities
///
/// `values` holds one entry per entity: `None` when the entity omits the
/// field, `Some` otherwise. If any entry is a sequence the field is
/// treated as variable-length: every sequence is padded to the longest
/// sequence's length with the Missing value, and `None`/`Missing`
/// entries become all-missing rows. Otherwise the field is scalar and
/// `None` entries become the Missing value.
///
/// Fields are homogeneous per call: mixing scalar and sequence values is
/// invalid input, as is an empty `values` slice.
pub fn tensorize(values: &[Option<&FieldValue>]) -> Result<FieldColumn> {
    if values.is_empty() {
        return Err(Error::InvalidInput(
            "cannot tensorize a field with zero entities".to_string(),
        ));
    }

    let is_sequence_field = values
        .iter()
        .any(|v| matches!(v, Some(FieldValue::Sequence(_))));

    if is_sequence_field {
        let max_length = values
            .iter()
            .filter_map(|v| match v {
                Some(FieldValue::Sequence(s)) => Some(s.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut column = Array2::from_elem((values.len(), max_length), MISSING_VALUE);
        for (row, value) in values.iter().enumerate() {
            match value {
                Some(FieldValue::Sequence(s)) => {
                    for (col, v) in s.iter().enumerate() {
                        column[[row, col]] = *v;
                    }
                }
                // absence pads to an all-missing row
                None | Some(FieldValue::Missing) => {}
                Some(other) => {
                    return Err(Error::InvalidInput(format!(
                        "scalar value {:?} in a sequence-valued field",
                        other
                    )));
                }
            }
        }
        Ok(FieldColumn::Sequence(column))
    } else {
        let mut column = Array1::from_elem(values.len(), MISSING_VALUE);
        for (row, value) in values.iter().enumerate() {
            match value {
                Some(FieldValue::Scalar(v)) => column[row] = *v,
                Some(FieldValue::Unknown) => column[row] = UNKNOWN_VALUE,
                None | Some(FieldValue::Missing) => {}
                Some(FieldValue::Sequence(_)) => unreachable!(),
            }
        }
        Ok(FieldColumn::Scalar(column))
    }
}
