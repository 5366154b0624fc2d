//! Merging components into one block-diagonal batch

use std::collections::{BTreeSet, HashMap};

use ndarray::Array2;

use graph_batch_core::component::{Component, Entity};
use graph_batch_core::error::{Error, Result};
use graph_batch_core::schema::FieldSpec;
use graph_batch_core::Batch;

use crate::tensorize::tensorize;

/// Merge an ordered list of components into one batch
///
/// Entity lists are concatenated in order, and each component's adjacency
/// matrices land in the diagonal block at its running entity offset;
/// cross-component cells stay false, and a component lacking a relation
/// contributes an implicit all-false block. One column is tensorized per
/// field in the spec's canonical set, whether or not any entity carries
/// the field.
pub fn stack_batch(components: &[Component], spec: &FieldSpec) -> Result<Batch> {
    let total: usize = components.iter().map(Component::len).sum();

    // Relation names seen on any component, in a stable order.
    let relation_names: BTreeSet<&str> = components
        .iter()
        .flat_map(Component::relation_names)
        .collect();

    let mut full_adjacencies: HashMap<String, Array2<bool>> = relation_names
        .iter()
        .map(|&name| (name.to_string(), Array2::from_elem((total, total), false)))
        .collect();

    let mut start = 0;
    for component in components {
        let len = component.len();
        for (name, adjacency) in component.adjacencies() {
            let full = full_adjacencies
                .get_mut(name)
                .ok_or_else(|| Error::InvariantViolation(format!("unallocated relation '{}'", name)))?;
            full.slice_mut(ndarray::s![start..start + len, start..start + len])
                .assign(adjacency);
        }
        start += len;
    }

    let entities: Vec<&Entity> = components
        .iter()
        .flat_map(|c| c.entities().iter())
        .collect();

    let mut fields = HashMap::with_capacity(spec.len());
    for name in spec.regular_field_names() {
        let values: Vec<_> = entities.iter().map(|e| e.get(name)).collect();
        fields.insert(name.to_string(), tensorize(&values)?);
    }

    for (name, adjacency) in &full_adjacencies {
        let (rows, cols) = adjacency.dim();
        if rows != total || cols != total {
            return Err(Error::InvariantViolation(format!(
                "merged adjacency '{}' is {}x{} for {} entities",
                name, rows, cols, total
            )));
        }
    }

    Batch::new(fields, full_adjacencies, total)
}
