//! Entities and graph components

use std::collections::HashMap;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::value::FieldValue;

/// One row of field values within a component
///
/// Entities omit optional fields; looking up an absent field yields
/// `None`. Field order within an entity carries no meaning, only the
/// entity's position within its component does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    /// Field values by field name
    values: HashMap<String, FieldValue>,
}

impl Entity {
    /// Create an entity with no field values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous value
    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Builder-style variant of [`set`](Self::set)
    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Check whether this entity carries the given field
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of fields this entity carries
    pub fn field_count(&self) -> usize {
        self.values.len()
    }
}

impl FromIterator<(String, FieldValue)> for Entity {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A connected group of entities sharing adjacency relations
///
/// The atomic unit of data a [`ComponentSource`](crate::source::ComponentSource)
/// yields. Entities are ordered; every adjacency matrix is square with
/// both dimensions equal to the entity count, aligned by entity index.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Ordered entities in this component
    entities: Vec<Entity>,

    /// Adjacency matrices by relation-type name
    adjacencies: HashMap<String, Array2<bool>>,
}

impl Component {
    /// Create a component, validating the adjacency shape invariant
    pub fn new(
        entities: Vec<Entity>,
        adjacencies: HashMap<String, Array2<bool>>,
    ) -> Result<Self> {
        let count = entities.len();
        for (name, adjacency) in &adjacencies {
            let (rows, cols) = adjacency.dim();
            if rows != count || cols != count {
                return Err(Error::AdjacencyShape {
                    relation: name.clone(),
                    rows,
                    cols,
                    entities: count,
                });
            }
        }

        Ok(Self {
            entities,
            adjacencies,
        })
    }

    /// Create a component with entities and no relations
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            adjacencies: HashMap::new(),
        }
    }

    /// Number of entities in this component
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether this component has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ordered entities of this component
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Adjacency matrices by relation-type name
    pub fn adjacencies(&self) -> &HashMap<String, Array2<bool>> {
        &self.adjacencies
    }

    /// Get the adjacency matrix for one relation, if present
    pub fn adjacency(&self, relation: &str) -> Option<&Array2<bool>> {
        self.adjacencies.get(relation)
    }

    /// Relation-type names present on this component
    pub fn relation_names(&self) -> impl Iterator<Item = &str> {
        self.adjacencies.keys().map(String::as_str)
    }
}
