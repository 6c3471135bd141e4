use super::{find_back_reference, is_junction_table};
use super::{AnalyzerConfig, AutoInclude, AutoIncludeContext, Collected};
use crate::schema::{Field, Model, Relation};
use crate::{Error, Schema};

use std::fmt;

/// Cardinality of a relationship, seen from the field declaring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// How a relationship's cardinality was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Paired with the inverse field on the target
    BackReference,

    /// Inferred from the uniqueness of the local foreign key
    ForeignKey,

    /// A list pointing at a junction table
    JunctionTable,

    /// A list with no foreign key and no inverse
    List,

    /// A single value with no foreign key and no inverse. The cardinality is a
    /// guess.
    Implicit,
}

#[derive(Debug, Clone, Copy)]
pub struct RelationshipInfo<'a> {
    /// Model declaring the relation
    pub model: &'a Model,

    /// The relation field
    pub field: &'a Field,

    pub relation: &'a Relation,

    /// The resolved target model
    pub target: &'a Model,

    pub cardinality: Cardinality,

    pub resolution: Resolution,

    /// The inverse field on the target, if one was found
    pub back_reference: Option<&'a Field>,

    /// True if the relationship should be loaded eagerly
    pub should_auto_include: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RelationshipAnalysis<'a> {
    /// Every resolvable relationship, in field declaration order
    pub relationships: Vec<RelationshipInfo<'a>>,

    /// The subset of `relationships` flagged for auto-include
    pub auto_include: Vec<RelationshipInfo<'a>>,

    pub is_junction_table: bool,
}

impl Cardinality {
    /// Cardinality implied by whether each side holds a list.
    pub fn from_sides(this_list: bool, other_list: bool) -> Self {
        match (this_list, other_list) {
            (false, false) => Self::OneToOne,
            (true, true) => Self::ManyToMany,
            (true, false) => Self::OneToMany,
            (false, true) => Self::ManyToOne,
        }
    }

    /// The same relationship seen from the other side.
    pub fn inverse(self) -> Self {
        match self {
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
            other => other,
        }
    }

    pub fn is_one_to_one(self) -> bool {
        matches!(self, Self::OneToOne)
    }

    pub fn is_one_to_many(self) -> bool {
        matches!(self, Self::OneToMany)
    }

    pub fn is_many_to_one(self) -> bool {
        matches!(self, Self::ManyToOne)
    }

    pub fn is_many_to_many(self) -> bool {
        matches!(self, Self::ManyToMany)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToOne => "many-to-one",
            Self::ManyToMany => "many-to-many",
        })
    }
}

impl<'a> RelationshipInfo<'a> {
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    pub fn is_self_referential(&self) -> bool {
        self.target.name == self.model.name
    }

    pub fn is_one_to_one(&self) -> bool {
        self.cardinality.is_one_to_one()
    }

    pub fn is_one_to_many(&self) -> bool {
        self.cardinality.is_one_to_many()
    }

    pub fn is_many_to_one(&self) -> bool {
        self.cardinality.is_many_to_one()
    }

    pub fn is_many_to_many(&self) -> bool {
        self.cardinality.is_many_to_many()
    }
}

impl<'a> RelationshipAnalysis<'a> {
    pub fn get(&self, name: &str) -> Option<&RelationshipInfo<'a>> {
        self.relationships
            .iter()
            .find(|relationship| relationship.field.name == name)
    }
}

/// Classify every relation field of `model`.
///
/// Relations whose target is not in `schema` are skipped and reported in the
/// returned errors, as are guessed one-to-one relations when
/// `strict_relations` is set.
pub fn analyze_relationships<'a>(
    model: &'a Model,
    schema: &'a Schema,
    config: &AnalyzerConfig,
) -> Collected<RelationshipAnalysis<'a>> {
    let is_junction = is_junction_table(model, config);
    let mut analysis = Collected::new(RelationshipAnalysis {
        is_junction_table: is_junction,
        ..RelationshipAnalysis::default()
    });

    for (field, relation) in model.relations() {
        let Some(target) = schema.model(&relation.target) else {
            analysis.errors.push(Error::unresolved_relation(
                &model.name,
                &field.name,
                &relation.target,
            ));
            continue;
        };

        let back_reference = find_back_reference(field, target, model);

        let (cardinality, resolution) = match back_reference {
            Some(inverse) => (
                Cardinality::from_sides(field.list, inverse.list),
                Resolution::BackReference,
            ),
            None if relation.has_foreign_key() => {
                if model.are_fields_unique(&relation.foreign_key[..]) {
                    (Cardinality::OneToOne, Resolution::ForeignKey)
                } else {
                    (Cardinality::ManyToOne, Resolution::ForeignKey)
                }
            }
            None if field.list => {
                if is_junction_table(target, config) {
                    (Cardinality::ManyToMany, Resolution::JunctionTable)
                } else {
                    (Cardinality::OneToMany, Resolution::List)
                }
            }
            None => {
                if config.strict_relations() {
                    analysis
                        .errors
                        .push(Error::ambiguous_relation(&model.name, &field.name));
                    continue;
                }

                tracing::warn!(
                    model = %model.name,
                    field = %field.name,
                    target = %target.name,
                    "no foreign key or back-reference; assuming one-to-one"
                );
                (Cardinality::OneToOne, Resolution::Implicit)
            }
        };

        let should_auto_include = auto_include_for(
            &AutoIncludeContext {
                model,
                field,
                target,
                cardinality,
                is_junction_table: is_junction,
            },
            relation,
            config.auto_include(),
        );

        tracing::trace!(
            model = %model.name,
            field = %field.name,
            target = %target.name,
            %cardinality,
            ?resolution,
            should_auto_include,
            "classified relationship"
        );

        let info = RelationshipInfo {
            model,
            field,
            relation,
            target,
            cardinality,
            resolution,
            back_reference,
            should_auto_include,
        };

        if should_auto_include {
            analysis.value.auto_include.push(info);
        }
        analysis.value.relationships.push(info);
    }

    analysis
}

fn auto_include_for(
    cx: &AutoIncludeContext<'_>,
    relation: &Relation,
    policy: &AutoInclude,
) -> bool {
    match policy {
        AutoInclude::Custom(predicate) => predicate(cx),
        _ if cx.is_junction_table => false,
        AutoInclude::Disabled => false,
        AutoInclude::ManyToOne => cx.cardinality.is_many_to_one(),
        AutoInclude::RequiredManyToOne => {
            cx.cardinality.is_many_to_one()
                && if relation.has_foreign_key() {
                    relation.foreign_key.iter().all(|name| {
                        cx.model
                            .field_by_name(name)
                            .is_some_and(Field::is_required)
                    })
                } else {
                    cx.field.is_required()
                }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_combine_listedness() {
        assert_eq!(Cardinality::from_sides(false, false), Cardinality::OneToOne);
        assert_eq!(Cardinality::from_sides(true, true), Cardinality::ManyToMany);
        assert_eq!(Cardinality::from_sides(true, false), Cardinality::OneToMany);
        assert_eq!(Cardinality::from_sides(false, true), Cardinality::ManyToOne);
    }

    #[test]
    fn inverse_swaps_direction() {
        let sides = [(false, false), (true, true), (true, false), (false, true)];
        for (this_list, other_list) in sides {
            assert_eq!(
                Cardinality::from_sides(this_list, other_list).inverse(),
                Cardinality::from_sides(other_list, this_list),
            );
        }
    }

    #[test]
    fn exactly_one_predicate_holds() {
        for cardinality in [
            Cardinality::OneToOne,
            Cardinality::OneToMany,
            Cardinality::ManyToOne,
            Cardinality::ManyToMany,
        ] {
            let held = [
                cardinality.is_one_to_one(),
                cardinality.is_one_to_many(),
                cardinality.is_many_to_one(),
                cardinality.is_many_to_many(),
            ];
            assert_eq!(held.iter().filter(|held| **held).count(), 1, "{cardinality}");
        }
    }
}
