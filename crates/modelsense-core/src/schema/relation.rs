/// The relation half of a field: which model it points at and which local
/// fields carry the foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Name of the target model
    pub target: String,

    /// Local fields holding the foreign key. Empty on the side of a pair that
    /// does not own the key.
    pub foreign_key: Vec<String>,

    /// Fields on the target that the foreign key references
    pub references: Vec<String>,

    /// Label that pairs this relation with its inverse when two models are
    /// related more than once.
    pub tag: Option<String>,
}

impl Relation {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            foreign_key: vec![],
            references: vec![],
            tag: None,
        }
    }

    pub fn key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.foreign_key = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn references<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns `true` if this side of the relation owns a foreign key.
    pub fn has_foreign_key(&self) -> bool {
        !self.foreign_key.is_empty()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}
