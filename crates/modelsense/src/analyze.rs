mod back_reference;
pub use back_reference::find_back_reference;

mod capabilities;
pub use capabilities::{build_capabilities, ForeignKeyInfo, ModelCapabilities};

mod collected;
pub use collected::Collected;

mod config;
pub use config::{
    AnalyzerConfig, AutoInclude, AutoIncludeContext, AutoIncludePredicate, ConfigBuilder,
    ErrorMode, FieldPredicate, SpecialFieldMatcher,
};

mod fields;
pub use fields::{analyze_fields_once, FieldAnalysis, FilterField, FilterKind};

mod include;
#[allow(deprecated)]
pub use include::generate_include_string;
pub use include::{generate_include_object, IncludeGraph};

mod junction;
pub use junction::is_junction_table;

mod names;
pub use names::NormalizedNames;

mod relationship;
pub use relationship::{
    analyze_relationships, Cardinality, RelationshipAnalysis, RelationshipInfo, Resolution,
};

mod special;
pub use special::{detect_special_fields, SpecialFieldKey, SpecialFields};

use crate::schema::{Field, Model};
use crate::{Error, Result, Schema};

use indexmap::IndexMap;
use std::fmt;

/// Everything derived about one model.
#[derive(Debug, Clone)]
pub struct ModelAnalysis<'a> {
    pub model: &'a Model,

    pub relationships: Vec<RelationshipInfo<'a>>,

    /// Relationships flagged for eager loading
    pub auto_include: Vec<RelationshipInfo<'a>>,

    pub is_junction_table: bool,

    pub special_fields: SpecialFields<'a>,
    pub search_fields: Vec<&'a Field>,
    pub filter_fields: Vec<FilterField<'a>>,

    pub has_published_field: bool,
    pub has_slug_field: bool,

    pub capabilities: ModelCapabilities<'a>,

    /// Errors skipped during analysis. Only set under [`ErrorMode::Collect`].
    pub errors: Option<Vec<AnalysisError>>,
}

/// A structural error recorded instead of aborting the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub model: String,
    pub field: String,
    pub message: String,
}

/// Analyses of every model in a schema, keyed by model name.
#[derive(Debug, Clone, Default)]
pub struct SchemaAnalysis<'a> {
    pub models: IndexMap<&'a str, ModelAnalysis<'a>>,
}

impl<'a> ModelAnalysis<'a> {
    pub fn relationship(&self, name: &str) -> Option<&RelationshipInfo<'a>> {
        self.relationships
            .iter()
            .find(|relationship| relationship.field.name == name)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}

impl AnalysisError {
    fn from_error(model: &Model, err: &Error) -> Self {
        Self {
            model: err.model().unwrap_or(model.name.as_str()).to_string(),
            field: err.field().unwrap_or_default().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.message)
    }
}

impl<'a> SchemaAnalysis<'a> {
    pub fn model(&self, name: &str) -> Option<&ModelAnalysis<'a>> {
        self.models.get(name)
    }

    /// Every collected error, in model order.
    pub fn errors(&self) -> impl Iterator<Item = &AnalysisError> + '_ {
        self.models
            .values()
            .filter_map(|analysis| analysis.errors.as_deref())
            .flatten()
    }
}

/// Analyze a single model of `schema`.
///
/// Under [`ErrorMode::FailFast`] the first structural error (an unresolvable
/// relation target, or a guessed relation with `strict_relations` set) is
/// returned. Under [`ErrorMode::Collect`] offending relations are skipped and
/// reported in [`ModelAnalysis::errors`].
pub fn analyze_model<'a>(
    model: &'a Model,
    schema: &'a Schema,
    config: &AnalyzerConfig,
) -> Result<ModelAnalysis<'a>> {
    tracing::debug!(model = %model.name, "analyzing model");

    let (relationships, errors) =
        analyze_relationships(model, schema, config).into_result(config.error_mode())?;

    let fields = analyze_fields_once(model, schema, config);
    let capabilities = build_capabilities(model, &fields, &relationships, config);

    let errors = config.error_mode().is_collect().then(|| {
        errors
            .iter()
            .map(|err| AnalysisError::from_error(model, err))
            .collect()
    });

    let special_fields = fields.special_fields;

    Ok(ModelAnalysis {
        model,
        relationships: relationships.relationships,
        auto_include: relationships.auto_include,
        is_junction_table: relationships.is_junction_table,
        special_fields,
        search_fields: fields.search_fields,
        filter_fields: fields.filter_fields,
        has_published_field: special_fields.published.is_some(),
        has_slug_field: special_fields.slug.is_some(),
        capabilities,
        errors,
    })
}

/// Look up a model by name and analyze it.
pub fn analyze_model_named<'a>(
    name: &str,
    schema: &'a Schema,
    config: &AnalyzerConfig,
) -> Result<ModelAnalysis<'a>> {
    let model = schema
        .model(name)
        .ok_or_else(|| Error::invalid_schema(format!("model `{name}` is not defined")))?;

    analyze_model(model, schema, config)
}

/// Analyze every model of `schema`, in declaration order.
pub fn analyze_schema<'a>(
    schema: &'a Schema,
    config: &AnalyzerConfig,
) -> Result<SchemaAnalysis<'a>> {
    let mut analysis = SchemaAnalysis::default();

    for model in schema.models() {
        analysis
            .models
            .insert(model.name.as_str(), analyze_model(model, schema, config)?);
    }

    Ok(analysis)
}
