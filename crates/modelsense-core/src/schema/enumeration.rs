/// An enum declared in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,

    /// Variant names, in declaration order
    pub variants: Vec<String>,
}

impl Enum {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}
