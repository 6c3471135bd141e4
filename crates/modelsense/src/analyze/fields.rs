use super::special::Detector;
use super::{AnalyzerConfig, NormalizedNames, SpecialFields};
use crate::schema::{Field, FieldTy, Model, Primitive};
use crate::Schema;

/// How a filterable field is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Equality
    Exact,

    /// Ordered comparison (numbers and timestamps)
    Range,

    Boolean,

    /// One of the enum's variants
    Enum,

    /// Membership in a list field
    Array,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterField<'a> {
    pub field: &'a Field,
    pub kind: FilterKind,

    /// Variant names, for fields typed by a registered enum
    pub enum_values: Option<&'a [String]>,
}

/// Result of the single pass over a model's scalar fields.
#[derive(Debug, Clone)]
pub struct FieldAnalysis<'a> {
    pub special_fields: SpecialFields<'a>,

    /// String fields eligible for text search
    pub search_fields: Vec<&'a Field>,

    pub filter_fields: Vec<FilterField<'a>>,

    pub normalized_names: NormalizedNames<'a>,
}

impl FilterKind {
    fn of(field: &Field) -> Option<Self> {
        if field.list {
            return match &field.ty {
                FieldTy::Enum(_) => Some(Self::Array),
                FieldTy::Primitive(primitive) if is_filterable(primitive) => Some(Self::Array),
                _ => None,
            };
        }

        match &field.ty {
            FieldTy::Enum(_) => Some(Self::Enum),
            FieldTy::Primitive(primitive) if primitive.is_boolean() => Some(Self::Boolean),
            FieldTy::Primitive(primitive) if primitive.is_date_time() || primitive.is_numeric() => {
                Some(Self::Range)
            }
            FieldTy::Primitive(primitive) if is_filterable(primitive) => Some(Self::Exact),
            _ => None,
        }
    }
}

impl<'a> FieldAnalysis<'a> {
    pub fn is_searchable(&self) -> bool {
        !self.search_fields.is_empty()
    }

    pub fn is_filterable(&self) -> bool {
        !self.filter_fields.is_empty()
    }

    pub fn filter_field(&self, name: &str) -> Option<&FilterField<'a>> {
        self.filter_fields
            .iter()
            .find(|filter| filter.field.name == name)
    }
}

/// Classify every scalar field of `model` in one pass.
///
/// The same pass normalizes field names, detects special fields, and collects
/// search and filter fields. Enum variants are looked up in `schema`.
pub fn analyze_fields_once<'a>(
    model: &'a Model,
    schema: &'a Schema,
    config: &AnalyzerConfig,
) -> FieldAnalysis<'a> {
    let mut normalized_names = NormalizedNames::default();
    let mut detector = Detector::new(model, config);
    let mut search_fields = vec![];
    let mut filter_fields = vec![];

    let primary_key = model.primary_key_fields();

    for field in model.scalar_fields() {
        let normalized = normalized_names.insert(field);

        detector.visit(field, normalized);

        if primary_key.contains(&field.name.as_str()) {
            continue;
        }

        if is_searchable(field) {
            if config.exclude_sensitive_fields() && config.is_sensitive(normalized) {
                tracing::trace!(
                    model = %model.name,
                    field = %field.name,
                    "excluding sensitive field from search"
                );
            } else {
                search_fields.push(field);
            }
        }

        if let Some(kind) = FilterKind::of(field) {
            let enum_values = field
                .ty
                .as_enum()
                .and_then(|name| schema.enumeration(name))
                .map(|enumeration| &enumeration.variants[..]);

            filter_fields.push(FilterField {
                field,
                kind,
                enum_values,
            });
        }
    }

    FieldAnalysis {
        special_fields: detector.finish(),
        search_fields,
        filter_fields,
        normalized_names,
    }
}

fn is_searchable(field: &Field) -> bool {
    !field.list
        && !field.read_only
        && field.ty.as_primitive().is_some_and(Primitive::is_string)
}

fn is_filterable(primitive: &Primitive) -> bool {
    matches!(
        primitive,
        Primitive::String
            | Primitive::Int
            | Primitive::BigInt
            | Primitive::Float
            | Primitive::Decimal
            | Primitive::Boolean
            | Primitive::DateTime
    )
}
