//! In-memory schema graph
//!
//! The graph is produced by an upstream parser and consumed read-only by the
//! analyzer. Models reference each other by name; a relation whose target is
//! missing is representable here and only reported once analysis runs.

mod builder;
pub use builder::Builder;

mod enumeration;
pub use enumeration::Enum;

mod field;
pub use field::{Field, FieldKind, FieldTy};

mod model;
pub use model::Model;

mod pk;
pub use pk::PrimaryKey;

mod primitive;
pub use primitive::Primitive;

mod relation;
pub use relation::Relation;

mod unique;
pub use unique::UniqueConstraint;

mod verify;

use crate::Result;
use indexmap::IndexMap;

#[derive(Debug, Default, Clone)]
pub struct Schema {
    /// Models keyed by name, in declaration order
    pub(crate) models: IndexMap<String, Model>,

    /// Enum registry keyed by name
    pub(crate) enums: IndexMap<String, Enum>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Build a schema from a list of models, without any enums.
    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Result<Self> {
        let mut builder = Builder::default();
        for model in models {
            builder.model(model);
        }
        builder.build()
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> {
        self.models.values()
    }

    /// Get a model by name
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn contains_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn enums(&self) -> impl ExactSizeIterator<Item = &Enum> {
        self.enums.values()
    }

    /// Get an enum by name
    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.get(name)
    }

    /// Returns a fully qualified `Model::field` name, used in messages.
    pub fn full_name(model: &Model, field: &Field) -> String {
        format!("{}::{}", model.name, field.name)
    }
}
