//! Field specifications for schema-complete stacking

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The kind of a field, driving loss selection downstream
///
/// An explicit tagged variant; field kinds are never dispatched on
/// runtime type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Continuous numeric field
    Numeric,

    /// Categorical field encoded as vocabulary ids
    Categorical,
}

/// A field definition, with a name and kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Name of the field
    pub name: String,

    /// Kind of the field
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a new field definition
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// The canonical ordered set of fields every stacked batch must carry
///
/// Stacking consults the spec rather than the fields present on any
/// particular entity, so batches stay schema-complete when entities omit
/// optional fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field definitions, in canonical order
    fields: Vec<FieldDef>,

    /// Field indices by name for faster lookup
    #[serde(skip)]
    field_indices: HashMap<String, usize>,
}

impl FieldSpec {
    /// Create a new field spec with the given fields
    pub fn new(fields: Vec<FieldDef>) -> Self {
        let mut field_indices = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            field_indices.insert(field.name.clone(), i);
        }

        Self {
            fields,
            field_indices,
        }
    }

    /// All field definitions, in canonical order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Canonical ordered field names
    pub fn regular_field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Get a field definition by name
    pub fn field(&self, name: &str) -> Result<&FieldDef> {
        let index = self
            .field_indices
            .get(name)
            .copied()
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))?;
        Ok(&self.fields[index])
    }

    /// Get the kind of a field by name
    pub fn kind(&self, name: &str) -> Result<FieldKind> {
        Ok(self.field(name)?.kind)
    }

    /// Number of fields in this spec
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if this spec has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
