/// A model-level primary key declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Fields composing the primary key
    pub fields: Vec<String>,
}

impl PrimaryKey {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }
}
