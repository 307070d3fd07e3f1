//! The read-only schema entities the planner walks: [`Project`], [`Schema`],
//! [`Model`] and [`Field`], per §3.
//!
//! Construction of these types from a GraphQL SDL / datamodel document is
//! explicitly out of scope (§1): deploy-path parsing and schema diffing are
//! external collaborators. This module only carries the in-memory
//! representation the planner reads from, mirroring how the teacher's
//! `prisma-models` crate separates model representation from the separate
//! `DatamodelConverter` that builds it.

use std::sync::Arc;

pub type ModelRef = Arc<Model>;
pub type FieldRef = Arc<Field>;

/// The action taken on the related side of a relation when the near side is
/// deleted. Only `Cascade` drives the cascading delete resolver (§4.3); the
/// others are carried for completeness of the schema representation but are
/// opaque to the planner, which only asks `OnDelete::cascades`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    Restrict,
    SetNull,
    NoAction,
    SetDefault,
}

impl OnDelete {
    pub fn cascades(self) -> bool {
        matches!(self, OnDelete::Cascade)
    }
}

/// The relation-specific attributes of a [`Field`], present only on relation
/// fields.
#[derive(Debug, Clone)]
pub struct RelationInfo {
    pub related_model: ModelRef,
    pub on_delete: OnDelete,
    /// The name of the field on `related_model` that points back to this
    /// field's owning model. Used by `relationFieldsNotOnPathOnLastModel` to
    /// exclude the edge we just traversed from further traversal.
    pub opposite_field: String,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub is_required: bool,
    pub is_list: bool,
    pub relation: Option<RelationInfo>,
}

impl Field {
    pub fn scalar(name: impl Into<String>, is_required: bool, is_list: bool) -> Self {
        Self {
            name: name.into(),
            is_required,
            is_list,
            relation: None,
        }
    }

    pub fn relation(
        name: impl Into<String>,
        related_model: ModelRef,
        is_required: bool,
        is_list: bool,
        on_delete: OnDelete,
        opposite_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            is_required,
            is_list,
            relation: Some(RelationInfo {
                related_model,
                on_delete,
                opposite_field: opposite_field.into(),
            }),
        }
    }

    pub fn is_relation(&self) -> bool {
        self.relation.is_some()
    }

    /// Schema reader contract: `relatedModel(field) -> Model`.
    pub fn related_model(&self) -> ModelRef {
        self.relation
            .as_ref()
            .expect("related_model() called on a scalar field")
            .related_model
            .clone()
    }

    /// Schema reader contract: `cascade(field) -> bool`.
    pub fn cascades(&self) -> bool {
        self.relation.as_ref().map(|r| r.on_delete.cascades()).unwrap_or(false)
    }

    pub fn opposite_field_name(&self) -> Option<&str> {
        self.relation.as_ref().map(|r| r.opposite_field.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    /// Name of the singular ID field, used by `NodeSelector::for_id`.
    pub id_field: String,
    pub fields: Vec<FieldRef>,
}

impl Model {
    pub fn new(name: impl Into<String>, id_field: impl Into<String>, fields: Vec<FieldRef>) -> ModelRef {
        Arc::new(Self {
            name: name.into(),
            id_field: id_field.into(),
            fields,
        })
    }

    pub fn find_field(&self, name: &str) -> Option<FieldRef> {
        self.fields.iter().find(|f| f.name == name).cloned()
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldRef> {
        self.fields.iter().filter(|f| f.is_relation())
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub models: Vec<ModelRef>,
}

impl Schema {
    pub fn new(models: Vec<ModelRef>) -> Self {
        Self { models }
    }

    pub fn find_model(&self, name: &str) -> Option<ModelRef> {
        self.models.iter().find(|m| m.name == name).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub schema: Arc<Schema>,
}

impl Project {
    pub fn new(id: impl Into<String>, schema: Schema) -> Self {
        Self {
            id: id.into(),
            schema: Arc::new(schema),
        }
    }
}
