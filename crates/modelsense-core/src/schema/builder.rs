use super::{Enum, Model, Schema};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Collects models and enums, then checks the graph's structure before
/// handing out a [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<Model>,
    enums: Vec<Enum>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn enumeration(&mut self, enumeration: Enum) -> &mut Self {
        self.enums.push(enumeration);
        self
    }

    pub fn build(&mut self) -> Result<Schema> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for model in self.models.drain(..) {
            if models.contains_key(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is defined more than once",
                    model.name
                )));
            }

            models.insert(model.name.clone(), model);
        }

        let mut enums = IndexMap::with_capacity(self.enums.len());

        for enumeration in self.enums.drain(..) {
            if enums.contains_key(&enumeration.name) {
                return Err(Error::invalid_schema(format!(
                    "enum `{}` is defined more than once",
                    enumeration.name
                )));
            }

            enums.insert(enumeration.name.clone(), enumeration);
        }

        let schema = Schema { models, enums };
        schema.verify()?;
        Ok(schema)
    }
}
