use super::{Field, PrimaryKey, Relation, UniqueConstraint};

#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model
    pub name: String,

    /// Fields contained by the model, in declaration order
    pub fields: Vec<Field>,

    /// Declared unique constraints, each over one or more fields
    pub unique_constraints: Vec<UniqueConstraint>,

    /// Model-level primary key. When unset, fields flagged `primary_key` make
    /// up the key.
    pub primary_key: Option<PrimaryKey>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
            unique_constraints: vec![],
            primary_key: None,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_unique<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_constraints.push(UniqueConstraint::new(fields));
        self
    }

    pub fn with_primary_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(PrimaryKey::new(fields));
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Non-relation fields (primitives and enums), in declaration order.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| !field.is_relation())
    }

    /// Relation fields, in declaration order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_relation())
    }

    /// Relation fields paired with their relation definition.
    pub fn relations(&self) -> impl Iterator<Item = (&Field, &Relation)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| field.ty.as_relation().map(|relation| (field, relation)))
    }

    /// Names of the fields making up the primary key. Empty if the model has
    /// none.
    pub fn primary_key_fields(&self) -> Vec<&str> {
        match &self.primary_key {
            Some(pk) => pk.fields.iter().map(String::as_str).collect(),
            None => self
                .fields
                .iter()
                .filter(|field| field.primary_key)
                .map(|field| &field.name[..])
                .collect(),
        }
    }

    /// The single identifier field. Returns `None` for composite keys: a
    /// member of a composite key is never treated as the model's id.
    pub fn id_field(&self) -> Option<&Field> {
        match &self.primary_key_fields()[..] {
            [name] => self.field_by_name(name),
            _ => None,
        }
    }

    /// Returns `true` if `field` is the model's single identifier field.
    pub fn is_id_field(&self, field: &Field) -> bool {
        self.id_field().is_some_and(|id| id.name == field.name)
    }

    pub fn has_composite_primary_key(&self) -> bool {
        self.primary_key_fields().len() > 1
    }

    /// Every local field that carries a foreign key of some relation.
    pub fn foreign_key_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.relations()
            .flat_map(|(_, relation)| relation.foreign_key.iter().map(String::as_str))
    }

    pub fn is_foreign_key_field(&self, name: &str) -> bool {
        self.foreign_key_fields().any(|fk| fk == name)
    }
}
