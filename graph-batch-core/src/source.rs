//! Component source abstraction

use crate::component::Component;
use crate::error::{Error, Result};

/// A source of graph components for the packer
///
/// Component data is a read-only snapshot; the packer and its helpers
/// never mutate what a source yields.
pub trait ComponentSource {
    /// Number of components in this source
    fn num_components(&self) -> usize;

    /// Retrieve one component by id
    fn component(&self, id: usize) -> Result<Component>;
}

/// A source backed by a vector of components held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    /// The components, indexed by id
    components: Vec<Component>,
}

impl InMemorySource {
    /// Create a source over the given components
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Total entity count across all components
    pub fn total_entities(&self) -> usize {
        self.components.iter().map(Component::len).sum()
    }
}

impl ComponentSource for InMemorySource {
    fn num_components(&self) -> usize {
        self.components.len()
    }

    fn component(&self, id: usize) -> Result<Component> {
        self.components
            .get(id)
            .cloned()
            .ok_or(Error::ComponentOutOfRange {
                id,
                count: self.components.len(),
            })
    }
}
