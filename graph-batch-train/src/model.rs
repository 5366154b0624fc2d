//! Model and optimizer collaborator traits

use std::collections::HashMap;

use graph_batch_core::{Batch, FieldColumn};

use crate::error::Result;

/// Per-field reconstructed columns from one forward pass
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    /// Reconstructed columns by field name
    fields: HashMap<String, FieldColumn>,
}

impl Reconstruction {
    /// Create a reconstruction over the given columns
    pub fn new(fields: HashMap<String, FieldColumn>) -> Self {
        Self { fields }
    }

    /// Reconstructed columns by field name
    pub fn fields(&self) -> &HashMap<String, FieldColumn> {
        &self.fields
    }

    /// Get one field's reconstructed column by name
    pub fn field(&self, name: &str) -> Option<&FieldColumn> {
        self.fields.get(name)
    }
}

/// The graph autoencoder under training
///
/// A batch passed to [`forward`](Self::forward) is frozen for the
/// duration of the step; implementations must not retain or mutate it.
pub trait Autoencoder {
    /// Check whether the model is in training mode
    fn training(&self) -> bool;

    /// Switch the model between training and evaluation mode
    fn set_training(&mut self, training: bool);

    /// Run one forward pass over a batch
    fn forward(&mut self, batch: &Batch) -> Result<Reconstruction>;

    /// Back-propagate one combined batch loss
    fn backward(&mut self, loss: f32) -> Result<()>;
}

/// The optimizer stepping the model's parameters
pub trait Optimizer {
    /// Clear accumulated gradients before a forward pass
    fn zero_grad(&mut self);

    /// Apply one optimization step
    fn step(&mut self);
}
