use super::{AnalyzerConfig, FieldAnalysis, RelationshipAnalysis};
use crate::schema::{Field, Model};

/// A foreign key owned by one of the model's relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyInfo<'a> {
    /// Name of the relation field
    pub alias: &'a str,

    /// Local fields holding the key
    pub fields: &'a [String],

    /// Fields referenced on the target
    pub references: &'a [String],

    pub tag: Option<&'a str>,

    /// Name of the target model
    pub target: &'a str,

    pub self_referential: bool,
}

/// What a generated API for the model can offer.
#[derive(Debug, Clone)]
pub struct ModelCapabilities<'a> {
    pub has_search: bool,
    pub has_filters: bool,
    pub has_find_by_slug: bool,
    pub has_published: bool,
    pub has_soft_delete: bool,
    pub has_view_count: bool,
    pub has_like_count: bool,
    pub has_approval: bool,
    pub has_featured: bool,
    pub has_active: bool,
    pub has_parent_child: bool,
    pub has_relationships: bool,
    pub has_auto_include: bool,
    pub has_composite_primary_key: bool,

    /// The single identifier field, `None` for composite or missing keys
    pub id_field: Option<&'a Field>,

    pub foreign_keys: Vec<ForeignKeyInfo<'a>>,
}

impl ForeignKeyInfo<'_> {
    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }
}

pub fn build_capabilities<'a>(
    model: &'a Model,
    fields: &FieldAnalysis<'a>,
    relationships: &RelationshipAnalysis<'a>,
    config: &AnalyzerConfig,
) -> ModelCapabilities<'a> {
    let special = &fields.special_fields;
    let names = &fields.normalized_names;

    ModelCapabilities {
        has_search: fields.is_searchable(),
        has_filters: fields.is_filterable(),
        has_find_by_slug: special.slug.is_some(),
        has_published: special.published.is_some(),
        has_soft_delete: special.deleted_at.is_some(),
        has_view_count: special.view_count.is_some(),
        has_like_count: special.like_count.is_some(),
        has_approval: special.approved.is_some(),
        has_featured: names.contains_any(&["isfeatured", "featured"]),
        has_active: names.contains_any(&["isactive", "active"]),
        has_parent_child: has_parent_child(model, special.parent, config),
        has_relationships: !relationships.relationships.is_empty(),
        has_auto_include: !relationships.auto_include.is_empty(),
        has_composite_primary_key: model.has_composite_primary_key(),
        id_field: model.id_field(),
        foreign_keys: foreign_keys(model),
    }
}

fn has_parent_child(model: &Model, parent: Option<&Field>, config: &AnalyzerConfig) -> bool {
    let self_relations: Vec<_> = model
        .relations()
        .filter(|(_, relation)| relation.target == model.name)
        .collect();

    if let Some(parent) = parent {
        let keyed_by_parent = self_relations
            .iter()
            .any(|(_, relation)| matches!(&relation.foreign_key[..], [fk] if *fk == parent.name));

        if keyed_by_parent {
            return true;
        }
    }

    let pattern = config.parent_pattern();
    self_relations.iter().any(|(field, relation)| {
        pattern.is_match(&field.name) || relation.foreign_key.iter().any(|fk| pattern.is_match(fk))
    })
}

fn foreign_keys(model: &Model) -> Vec<ForeignKeyInfo<'_>> {
    model
        .relations()
        .filter(|(_, relation)| relation.has_foreign_key())
        .map(|(field, relation)| ForeignKeyInfo {
            alias: &field.name,
            fields: &relation.foreign_key,
            references: &relation.references,
            tag: relation.tag(),
            target: &relation.target,
            self_referential: relation.target == model.name,
        })
        .collect()
}
