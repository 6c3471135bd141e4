use super::{Cardinality, SpecialFieldKey};
use crate::schema::{Field, FieldTy, Model, Primitive};
use crate::{Error, Result};

use indexmap::IndexMap;
use regex::Regex;
use std::{fmt, str::FromStr, sync::Arc};

/// Predicate deciding whether a field's type suits a special field slot.
pub type FieldPredicate = Arc<dyn Fn(&Field) -> bool + Send + Sync>;

/// Predicate deciding whether a relationship is eagerly loaded.
pub type AutoIncludePredicate = Arc<dyn Fn(&AutoIncludeContext<'_>) -> bool + Send + Sync>;

const DEFAULT_SENSITIVE_PATTERN: &str =
    "password|passwd|secret|token|apikey|credential|authcode|privatekey|salt$|hash$";

const DEFAULT_PARENT_PATTERN: &str = "(?i)parent|ancestor|root";

const DEFAULT_ADMIN_FIELDS: [&str; 6] = [
    "deletedAt",
    "deletedBy",
    "createdAt",
    "createdBy",
    "updatedAt",
    "updatedBy",
];

const DEFAULT_JUNCTION_MAX_DATA_FIELDS: usize = 2;

/// Matches a field by normalized name and type.
#[derive(Clone)]
pub struct SpecialFieldMatcher {
    pattern: Regex,
    validator: FieldPredicate,
}

/// How structural errors found during analysis are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Return the first structural error.
    #[default]
    FailFast,

    /// Skip the offending relation, record the error, and keep going.
    Collect,
}

/// Policy for flagging relationships as eagerly loaded.
#[derive(Clone, Default)]
pub enum AutoInclude {
    /// Never auto-include.
    Disabled,

    /// Auto-include every many-to-one relationship.
    #[default]
    ManyToOne,

    /// Auto-include many-to-one relationships whose foreign key fields are
    /// all required.
    RequiredManyToOne,

    /// The predicate alone decides, including on junction tables.
    Custom(AutoIncludePredicate),
}

/// What an [`AutoInclude::Custom`] predicate gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct AutoIncludeContext<'a> {
    /// Model owning the relation
    pub model: &'a Model,

    /// The relation field
    pub field: &'a Field,

    /// The resolved target model
    pub target: &'a Model,

    pub cardinality: Cardinality,

    /// True if `model` was classified as a junction table
    pub is_junction_table: bool,
}

/// Validated analyzer configuration.
///
/// Build one with [`AnalyzerConfig::builder`]; [`Default`] gives the stock
/// configuration.
#[derive(Clone)]
pub struct AnalyzerConfig {
    special_fields: IndexMap<SpecialFieldKey, SpecialFieldMatcher>,

    /// Administrative field names, stored normalized
    junction_admin_fields: Vec<String>,
    junction_max_data_fields: usize,

    auto_include: AutoInclude,

    exclude_sensitive_fields: bool,
    sensitive_patterns: Vec<Regex>,

    parent_pattern: Regex,

    error_mode: ErrorMode,
    strict_relations: bool,
}

/// Builds an [`AnalyzerConfig`] from the defaults plus caller overrides.
///
/// Setters never fail; the first invalid override is reported by
/// [`ConfigBuilder::build`].
#[derive(Clone)]
pub struct ConfigBuilder {
    config: AnalyzerConfig,
    error: Option<Error>,
}

impl SpecialFieldMatcher {
    pub fn new(
        pattern: Regex,
        validator: impl Fn(&Field) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            pattern,
            validator: Arc::new(validator),
        }
    }

    /// Compile `pattern` and pair it with `validator`.
    pub fn from_pattern(
        pattern: &str,
        validator: impl Fn(&Field) -> bool + Send + Sync + 'static,
    ) -> Result<Self> {
        Ok(Self::new(compile(pattern)?, validator))
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// `normalized` must be the normalized form of `field.name`.
    pub fn matches(&self, normalized: &str, field: &Field) -> bool {
        self.pattern.is_match(normalized) && (self.validator)(field)
    }

    fn builtin(pattern: &str, validator: fn(&Field) -> bool) -> Self {
        Self::new(builtin_regex(pattern), validator)
    }
}

impl fmt::Debug for SpecialFieldMatcher {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("SpecialFieldMatcher")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl ErrorMode {
    pub fn is_fail_fast(self) -> bool {
        matches!(self, Self::FailFast)
    }

    pub fn is_collect(self) -> bool {
        matches!(self, Self::Collect)
    }
}

impl AutoInclude {
    /// Wrap a closure as [`AutoInclude::Custom`].
    pub fn custom(
        predicate: impl Fn(&AutoIncludeContext<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(predicate))
    }
}

impl fmt::Debug for AutoInclude {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => fmt.write_str("Disabled"),
            Self::ManyToOne => fmt.write_str("ManyToOne"),
            Self::RequiredManyToOne => fmt.write_str("RequiredManyToOne"),
            Self::Custom(_) => fmt.write_str("Custom(..)"),
        }
    }
}

impl AnalyzerConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            config: Self::default(),
            error: None,
        }
    }

    /// The default special field matchers, keyed by slot.
    pub fn default_special_fields() -> IndexMap<SpecialFieldKey, SpecialFieldMatcher> {
        use SpecialFieldKey::*;

        IndexMap::from([
            (Slug, SpecialFieldMatcher::builtin("^slug$", is_scalar_string)),
            (
                Published,
                SpecialFieldMatcher::builtin("^(is)?published$", is_scalar_boolean),
            ),
            (
                ViewCount,
                SpecialFieldMatcher::builtin("^views?(count)?$", is_scalar_integer),
            ),
            (
                LikeCount,
                SpecialFieldMatcher::builtin("^likes?(count)?$", is_scalar_integer),
            ),
            (
                Approved,
                SpecialFieldMatcher::builtin("^(is)?approved$", is_scalar_boolean),
            ),
            (
                DeletedAt,
                SpecialFieldMatcher::builtin("^deleted(at|on)$", is_scalar_date_time),
            ),
            (
                Parent,
                SpecialFieldMatcher::builtin("^parent(id)?$", is_scalar_key),
            ),
        ])
    }

    pub fn special_fields(&self) -> &IndexMap<SpecialFieldKey, SpecialFieldMatcher> {
        &self.special_fields
    }

    pub fn special_field(&self, key: SpecialFieldKey) -> Option<&SpecialFieldMatcher> {
        self.special_fields.get(&key)
    }

    /// Normalized administrative field names ignored by junction detection.
    pub fn junction_admin_fields(&self) -> &[String] {
        &self.junction_admin_fields
    }

    pub fn junction_max_data_fields(&self) -> usize {
        self.junction_max_data_fields
    }

    pub fn auto_include(&self) -> &AutoInclude {
        &self.auto_include
    }

    pub fn exclude_sensitive_fields(&self) -> bool {
        self.exclude_sensitive_fields
    }

    /// Returns `true` if the normalized name matches a sensitive pattern.
    pub fn is_sensitive(&self, normalized: &str) -> bool {
        self.sensitive_patterns
            .iter()
            .any(|pattern| pattern.is_match(normalized))
    }

    pub fn parent_pattern(&self) -> &Regex {
        &self.parent_pattern
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    /// When set, relations whose cardinality can only be guessed are errors.
    pub fn strict_relations(&self) -> bool {
        self.strict_relations
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            special_fields: Self::default_special_fields(),
            junction_admin_fields: DEFAULT_ADMIN_FIELDS
                .iter()
                .map(|name| std_util::str::normalize(name))
                .collect(),
            junction_max_data_fields: DEFAULT_JUNCTION_MAX_DATA_FIELDS,
            auto_include: AutoInclude::default(),
            exclude_sensitive_fields: true,
            sensitive_patterns: vec![builtin_regex(DEFAULT_SENSITIVE_PATTERN)],
            parent_pattern: builtin_regex(DEFAULT_PARENT_PATTERN),
            error_mode: ErrorMode::default(),
            strict_relations: false,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("AnalyzerConfig")
            .field("special_fields", &self.special_fields)
            .field("junction_admin_fields", &self.junction_admin_fields)
            .field("junction_max_data_fields", &self.junction_max_data_fields)
            .field("auto_include", &self.auto_include)
            .field("exclude_sensitive_fields", &self.exclude_sensitive_fields)
            .field(
                "sensitive_patterns",
                &self
                    .sensitive_patterns
                    .iter()
                    .map(Regex::as_str)
                    .collect::<Vec<_>>(),
            )
            .field("parent_pattern", &self.parent_pattern.as_str())
            .field("error_mode", &self.error_mode)
            .field("strict_relations", &self.strict_relations)
            .finish()
    }
}

impl ConfigBuilder {
    /// Override the matcher for a special field slot named by string.
    ///
    /// Keys are compared loosely (`viewCount`, `view_count`). A key outside the
    /// known set makes [`build`](Self::build) fail.
    pub fn special_field(&mut self, key: &str, matcher: SpecialFieldMatcher) -> &mut Self {
        match SpecialFieldKey::from_str(key) {
            Ok(key) => {
                self.config.special_fields.insert(key, matcher);
            }
            Err(err) => self.fail(err),
        }
        self
    }

    /// Override the matcher for a special field slot.
    pub fn special_field_key(
        &mut self,
        key: SpecialFieldKey,
        matcher: SpecialFieldMatcher,
    ) -> &mut Self {
        self.config.special_fields.insert(key, matcher);
        self
    }

    /// Stop detecting a special field slot altogether.
    pub fn without_special_field(&mut self, key: SpecialFieldKey) -> &mut Self {
        self.config.special_fields.shift_remove(&key);
        self
    }

    /// Maximum number of data-bearing fields a junction table may carry.
    pub fn junction_max_data_fields(&mut self, max: usize) -> &mut Self {
        self.config.junction_max_data_fields = max;
        self
    }

    /// Replace the administrative field names ignored by junction detection.
    pub fn junction_admin_fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.junction_admin_fields = names
            .into_iter()
            .map(|name| std_util::str::normalize(name.as_ref()))
            .collect();
        self
    }

    pub fn auto_include(&mut self, policy: AutoInclude) -> &mut Self {
        self.config.auto_include = policy;
        self
    }

    /// Let `predicate` alone decide which relationships are auto-included.
    pub fn auto_include_if(
        &mut self,
        predicate: impl Fn(&AutoIncludeContext<'_>) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.auto_include(AutoInclude::custom(predicate))
    }

    pub fn exclude_sensitive_fields(&mut self, exclude: bool) -> &mut Self {
        self.config.exclude_sensitive_fields = exclude;
        self
    }

    /// Replace the sensitive-name patterns. Patterns are matched against
    /// normalized field names.
    pub fn sensitive_patterns<I, S>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled: Result<Vec<_>> = patterns
            .into_iter()
            .map(|pattern| compile(pattern.as_ref()))
            .collect();

        match compiled {
            Ok(patterns) => self.config.sensitive_patterns = patterns,
            Err(err) => self.fail(err),
        }
        self
    }

    /// Replace the pattern used to recognize parent links on self relations.
    pub fn parent_pattern(&mut self, pattern: &str) -> &mut Self {
        match compile(pattern) {
            Ok(pattern) => self.config.parent_pattern = pattern,
            Err(err) => self.fail(err),
        }
        self
    }

    pub fn error_mode(&mut self, mode: ErrorMode) -> &mut Self {
        self.config.error_mode = mode;
        self
    }

    /// Shorthand for `error_mode(ErrorMode::Collect)`.
    pub fn collect_errors(&mut self) -> &mut Self {
        self.error_mode(ErrorMode::Collect)
    }

    pub fn strict_relations(&mut self, strict: bool) -> &mut Self {
        self.config.strict_relations = strict;
        self
    }

    pub fn build(&self) -> Result<AnalyzerConfig> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.config.clone()),
        }
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| {
        Error::invalid_config_caused_by(format!("pattern `{pattern}` does not compile"), err)
    })
}

fn builtin_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

fn scalar_primitive(field: &Field) -> Option<&Primitive> {
    match &field.ty {
        FieldTy::Primitive(primitive) if !field.list => Some(primitive),
        _ => None,
    }
}

fn is_scalar_string(field: &Field) -> bool {
    scalar_primitive(field).is_some_and(Primitive::is_string)
}

fn is_scalar_boolean(field: &Field) -> bool {
    scalar_primitive(field).is_some_and(Primitive::is_boolean)
}

fn is_scalar_integer(field: &Field) -> bool {
    scalar_primitive(field).is_some_and(Primitive::is_integer)
}

fn is_scalar_date_time(field: &Field) -> bool {
    scalar_primitive(field).is_some_and(Primitive::is_date_time)
}

fn is_scalar_key(field: &Field) -> bool {
    scalar_primitive(field).is_some_and(|ty| ty.is_integer() || ty.is_string())
}
