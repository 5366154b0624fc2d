//! Stacked batch structure fed to a training step

use std::collections::HashMap;
use std::fmt;

use ndarray::{Array1, Array2};

use crate::error::{Error, Result};

/// A tensorized column for one field across a whole batch
///
/// Either one value per entity, or one padded fixed-length row per
/// entity for variable-length fields. Never ragged.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldColumn {
    /// One scalar per entity
    Scalar(Array1<f32>),

    /// One padded row per entity; all rows share the padded length
    Sequence(Array2<f32>),
}

impl FieldColumn {
    /// Number of entities this column covers
    pub fn len(&self) -> usize {
        match self {
            FieldColumn::Scalar(values) => values.len(),
            FieldColumn::Sequence(values) => values.nrows(),
        }
    }

    /// Check whether this column covers no entities
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The merged, padded, tensorized unit fed to a training step
///
/// A batch is an ephemeral value: the consumer runs one step over it and
/// discards it, never mutating it after stacking.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Tensorized columns by field name
    fields: HashMap<String, FieldColumn>,

    /// Block-diagonal adjacency matrices by relation-type name
    adjacencies: HashMap<String, Array2<bool>>,

    /// Total entity count across all stacked components
    len: usize,
}

impl Batch {
    /// Create a batch, validating that every column and adjacency matrix
    /// matches the total entity count
    pub fn new(
        fields: HashMap<String, FieldColumn>,
        adjacencies: HashMap<String, Array2<bool>>,
        len: usize,
    ) -> Result<Self> {
        for (name, column) in &fields {
            if column.len() != len {
                return Err(Error::InvariantViolation(format!(
                    "column '{}' has length {} in a batch of {} entities",
                    name,
                    column.len(),
                    len
                )));
            }
        }

        for (name, adjacency) in &adjacencies {
            let (rows, cols) = adjacency.dim();
            if rows != len || cols != len {
                return Err(Error::InvariantViolation(format!(
                    "adjacency '{}' is {}x{} in a batch of {} entities",
                    name, rows, cols, len
                )));
            }
        }

        Ok(Self {
            fields,
            adjacencies,
            len,
        })
    }

    /// Total entity count in this batch
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether this batch has no entities
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tensorized columns by field name
    pub fn fields(&self) -> &HashMap<String, FieldColumn> {
        &self.fields
    }

    /// Get one field's column by name
    pub fn field(&self, name: &str) -> Option<&FieldColumn> {
        self.fields.get(name)
    }

    /// Adjacency matrices by relation-type name
    pub fn adjacencies(&self) -> &HashMap<String, Array2<bool>> {
        &self.adjacencies
    }

    /// Get one relation's merged adjacency matrix by name
    pub fn adjacency(&self, relation: &str) -> Option<&Array2<bool>> {
        self.adjacencies.get(relation)
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Batch: {} entities, {} fields, {} relations",
            self.len,
            self.fields.len(),
            self.adjacencies.len()
        )?;
        let mut names: Vec<_> = self.fields.keys().collect();
        names.sort();
        for name in names {
            match &self.fields[name] {
                FieldColumn::Scalar(_) => writeln!(f, "  {}: scalar", name)?,
                FieldColumn::Sequence(values) => {
                    writeln!(f, "  {}: sequence (padded to {})", name, values.ncols())?;
                }
            }
        }
        Ok(())
    }
}
