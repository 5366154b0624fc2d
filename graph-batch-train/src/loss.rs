//! Per-field loss gathering and combination

use std::collections::HashMap;

use graph_batch_core::schema::{FieldKind, FieldSpec};
use graph_batch_core::{Batch, FieldColumn};

use crate::error::Result;
use crate::model::Reconstruction;

/// A loss function over a reconstructed column and its target column
pub type FieldLossFn = Box<dyn Fn(&FieldColumn, &FieldColumn) -> f32>;

/// One loss function per field kind
///
/// Loss selection dispatches on the spec's [`FieldKind`] tag; concrete
/// loss functions are external collaborators.
pub struct FieldLossSet {
    /// Loss for numeric fields
    numeric: FieldLossFn,

    /// Loss for categorical fields
    categorical: FieldLossFn,
}

impl FieldLossSet {
    /// Create a loss set from one function per field kind
    pub fn new(numeric: FieldLossFn, categorical: FieldLossFn) -> Self {
        Self {
            numeric,
            categorical,
        }
    }

    /// Get the loss function for a field kind
    pub fn for_kind(&self, kind: FieldKind) -> &FieldLossFn {
        match kind {
            FieldKind::Numeric => &self.numeric,
            FieldKind::Categorical => &self.categorical,
        }
    }
}

/// Gather per-field losses for one batch
///
/// Every spec field whose column appears in both the batch and the
/// reconstruction contributes one loss value; fields the model did not
/// reconstruct are skipped.
pub fn compute_losses(
    batch: &Batch,
    reconstruction: &Reconstruction,
    spec: &FieldSpec,
    losses: &FieldLossSet,
) -> Result<HashMap<String, f32>> {
    let mut by_field = HashMap::new();
    for field in spec.fields() {
        let (Some(target), Some(reconstructed)) =
            (batch.field(&field.name), reconstruction.field(&field.name))
        else {
            continue;
        };
        let loss = losses.for_kind(field.kind)(reconstructed, target);
        by_field.insert(field.name.clone(), loss);
    }
    Ok(by_field)
}

/// Policy combining per-field losses into one batch loss
pub trait LossPolicy {
    /// Combine the per-field losses of one batch
    fn combine(&self, by_field: &HashMap<String, f32>) -> f32;
}

/// Sums all per-field losses
#[derive(Debug, Clone, Copy, Default)]
pub struct SumPolicy;

impl LossPolicy for SumPolicy {
    fn combine(&self, by_field: &HashMap<String, f32>) -> f32 {
        by_field.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_batch_core::schema::FieldDef;
    use ndarray::arr1;

    fn column(values: &[f32]) -> FieldColumn {
        FieldColumn::Scalar(arr1(values))
    }

    fn abs_diff_losses() -> FieldLossSet {
        FieldLossSet::new(
            Box::new(|r, t| match (r, t) {
                (FieldColumn::Scalar(r), FieldColumn::Scalar(t)) => (r - t).mapv(f32::abs).sum(),
                _ => panic!("scalar columns expected"),
            }),
            Box::new(|_, _| 1.0),
        )
    }

    #[test]
    fn losses_cover_reconstructed_spec_fields_only() {
        let spec = FieldSpec::new(vec![
            FieldDef::new("weight", FieldKind::Numeric),
            FieldDef::new("entity_type", FieldKind::Categorical),
            FieldDef::new("depth", FieldKind::Numeric),
        ]);
        let mut fields = HashMap::new();
        fields.insert("weight".to_string(), column(&[1.0, 2.0]));
        fields.insert("entity_type".to_string(), column(&[3.0, 4.0]));
        fields.insert("depth".to_string(), column(&[0.0, 0.0]));
        let batch = Batch::new(fields, HashMap::new(), 2).unwrap();

        // the model only reconstructed two of the three fields
        let mut reconstructed = HashMap::new();
        reconstructed.insert("weight".to_string(), column(&[1.5, 2.0]));
        reconstructed.insert("entity_type".to_string(), column(&[3.0, 4.0]));
        let reconstruction = Reconstruction::new(reconstructed);

        let by_field =
            compute_losses(&batch, &reconstruction, &spec, &abs_diff_losses()).unwrap();
        assert_eq!(by_field.len(), 2);
        assert!((by_field["weight"] - 0.5).abs() < 1e-6);
        assert!((by_field["entity_type"] - 1.0).abs() < 1e-6);
        assert!(!by_field.contains_key("depth"));

        assert!((SumPolicy.combine(&by_field) - 1.5).abs() < 1e-6);
    }
}
