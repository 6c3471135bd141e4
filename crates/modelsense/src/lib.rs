//! Static analysis of a parsed data-model schema.
//!
//! Given a [`Schema`], [`analyze_model`] classifies each model's fields and
//! relationships and derives the capabilities a generated API can offer.

pub mod analyze;
pub use analyze::{
    analyze_model, analyze_model_named, analyze_schema, AnalysisError, AnalyzerConfig,
    ModelAnalysis, SchemaAnalysis,
};

pub use modelsense_core::{schema, Error, Result, Schema};
