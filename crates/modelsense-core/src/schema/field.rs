use super::{Primitive, Relation};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// The field name, as declared
    pub name: String,

    /// Primitive, enum, or relation
    pub ty: FieldTy,

    /// True if the field holds a list of values
    pub list: bool,

    /// True if the field may be absent
    pub nullable: bool,

    /// True if the field carries a direct unique annotation
    pub unique: bool,

    /// True if the field is annotated as the model's identifier
    pub primary_key: bool,

    /// True for system-managed fields that callers never write
    pub read_only: bool,
}

#[derive(Clone, PartialEq, Eq)]
pub enum FieldTy {
    Primitive(Primitive),

    /// Field typed by a registered enum, referenced by name
    Enum(String),

    Relation(Relation),
}

/// Coarse classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Enum,
    Relation,
}

impl Field {
    fn new(name: impl Into<String>, ty: FieldTy) -> Self {
        Self {
            name: name.into(),
            ty,
            list: false,
            nullable: false,
            unique: false,
            primary_key: false,
            read_only: false,
        }
    }

    pub fn primitive(name: impl Into<String>, ty: Primitive) -> Self {
        Self::new(name, FieldTy::Primitive(ty))
    }

    pub fn enumeration(name: impl Into<String>, enum_name: impl Into<String>) -> Self {
        Self::new(name, FieldTy::Enum(enum_name.into()))
    }

    pub fn relation(name: impl Into<String>, relation: Relation) -> Self {
        Self::new(name, FieldTy::Relation(relation))
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn kind(&self) -> FieldKind {
        match &self.ty {
            FieldTy::Primitive(_) => FieldKind::Scalar,
            FieldTy::Enum(_) => FieldKind::Enum,
            FieldTy::Relation(_) => FieldKind::Relation,
        }
    }

    pub fn is_required(&self) -> bool {
        !self.nullable
    }

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// The declared type name: the primitive's name, the enum's name, or the
    /// relation's target model.
    pub fn type_name(&self) -> &str {
        match &self.ty {
            FieldTy::Primitive(primitive) => primitive.name(),
            FieldTy::Enum(name) => name,
            FieldTy::Relation(relation) => &relation.target,
        }
    }

    /// If the field is a relation, return the name of its target model.
    pub fn relation_target(&self) -> Option<&str> {
        self.ty.as_relation().map(|relation| &relation.target[..])
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(..))
    }

    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Self::Enum(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(..))
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_relation(&self) -> &Relation {
        match self {
            Self::Relation(relation) => relation,
            _ => panic!("expected field to be a relation, but was {self:?}"),
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(fmt),
            Self::Enum(name) => write!(fmt, "Enum({name})"),
            Self::Relation(ty) => ty.fmt(fmt),
        }
    }
}

impl From<Primitive> for FieldTy {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<Relation> for FieldTy {
    fn from(value: Relation) -> Self {
        Self::Relation(value)
    }
}
