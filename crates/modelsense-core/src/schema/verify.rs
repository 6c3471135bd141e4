use super::{Model, Schema};
use crate::{Error, Result};
use std_util::slice;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for model in self.schema.models() {
            self.verify_field_names_are_unique(model)?;
            self.verify_primary_key(model)?;
            self.verify_unique_constraints(model)?;
            self.verify_foreign_keys(model)?;
        }

        Ok(())
    }

    fn verify_field_names_are_unique(&self, model: &Model) -> Result<()> {
        let names: Vec<&str> = model.fields.iter().map(|field| &field.name[..]).collect();

        if !slice::is_unique(&names) {
            return Err(Error::invalid_schema(format!(
                "model `{}` declares the same field name more than once",
                model.name
            )));
        }

        Ok(())
    }

    fn verify_primary_key(&self, model: &Model) -> Result<()> {
        let Some(pk) = &model.primary_key else {
            return Ok(());
        };

        if pk.fields.is_empty() {
            return Err(Error::invalid_schema(format!(
                "model `{}` declares an empty primary key",
                model.name
            )));
        }

        for name in &pk.fields {
            self.verify_scalar_field(model, name, "primary key")?;
        }

        Ok(())
    }

    fn verify_unique_constraints(&self, model: &Model) -> Result<()> {
        for constraint in &model.unique_constraints {
            if constraint.fields.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "model `{}` declares an empty unique constraint",
                    model.name
                )));
            }

            for name in &constraint.fields {
                self.verify_scalar_field(model, name, "unique constraint")?;
            }
        }

        Ok(())
    }

    fn verify_foreign_keys(&self, model: &Model) -> Result<()> {
        for (field, relation) in model.relations() {
            for name in &relation.foreign_key {
                self.verify_scalar_field(
                    model,
                    name,
                    &format!("foreign key of `{}`", Schema::full_name(model, field)),
                )?;
            }

            if !relation.references.is_empty()
                && relation.references.len() != relation.foreign_key.len()
            {
                return Err(Error::invalid_schema(format!(
                    "relation `{}` has {} foreign key field(s) but references {} field(s)",
                    Schema::full_name(model, field),
                    relation.foreign_key.len(),
                    relation.references.len(),
                )));
            }
        }

        Ok(())
    }

    fn verify_scalar_field(&self, model: &Model, name: &str, usage: &str) -> Result<()> {
        match model.field_by_name(name) {
            Some(field) if !field.is_relation() => Ok(()),
            Some(_) => Err(Error::invalid_schema(format!(
                "{usage} on model `{}` names relation field `{name}`",
                model.name
            ))),
            None => Err(Error::invalid_schema(format!(
                "{usage} on model `{}` names unknown field `{name}`",
                model.name
            ))),
        }
    }
}
