//! Random splitting of one component into two sub-components

use std::collections::HashMap;

use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;

use graph_batch_core::component::Component;
use graph_batch_core::error::{Error, Result};

/// Split a component into two disjoint sub-components
///
/// Entity indices are shuffled uniformly; the first `count` indices form
/// the first sub-component and the remainder the second, with the
/// shuffled order defining each sub-component's new entity order. Every
/// relation's adjacency matrix is sliced by the corresponding index
/// subset, so each sub-component keeps its own internal edges and loses
/// the edges that crossed the cut. The input component is never mutated.
pub fn split_batch<R: Rng>(
    component: &Component,
    count: usize,
    rng: &mut R,
) -> Result<(Component, Component)> {
    let len = component.len();
    if count > len {
        return Err(Error::InvalidInput(format!(
            "cannot split {} entities out of a component of {}",
            count, len
        )));
    }

    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    let (first_indices, second_indices) = indices.split_at(count);

    let first = subselect(component, first_indices)?;
    let second = subselect(component, second_indices)?;
    Ok((first, second))
}

/// Build the sub-component induced by an index subset
fn subselect(component: &Component, indices: &[usize]) -> Result<Component> {
    let entities = indices
        .iter()
        .map(|&i| component.entities()[i].clone())
        .collect();

    let mut adjacencies = HashMap::with_capacity(component.adjacencies().len());
    for (name, adjacency) in component.adjacencies() {
        let sliced = Array2::from_shape_fn((indices.len(), indices.len()), |(row, col)| {
            adjacency[[indices[row], indices[col]]]
        });
        adjacencies.insert(name.clone(), sliced);
    }

    Component::new(entities, adjacencies)
}
