use super::{AnalyzerConfig, NormalizedNames};
use crate::schema::{Field, Model};
use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// Slots for fields with well-known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialFieldKey {
    Slug,
    Published,
    ViewCount,
    LikeCount,
    Approved,
    DeletedAt,
    Parent,
}

/// Special fields detected on a model. Each slot holds at most one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialFields<'a> {
    pub slug: Option<&'a Field>,
    pub published: Option<&'a Field>,
    pub view_count: Option<&'a Field>,
    pub like_count: Option<&'a Field>,
    pub approved: Option<&'a Field>,
    pub deleted_at: Option<&'a Field>,
    pub parent: Option<&'a Field>,
}

/// Incremental special field detection, fed one field at a time.
#[derive(Debug)]
pub(crate) struct Detector<'a, 'c> {
    model: &'a Model,
    config: &'c AnalyzerConfig,
    found: SpecialFields<'a>,
    remaining: usize,
}

impl SpecialFieldKey {
    pub const ALL: [Self; 7] = [
        Self::Slug,
        Self::Published,
        Self::ViewCount,
        Self::LikeCount,
        Self::Approved,
        Self::DeletedAt,
        Self::Parent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Published => "published",
            Self::ViewCount => "viewCount",
            Self::LikeCount => "likeCount",
            Self::Approved => "approved",
            Self::DeletedAt => "deletedAt",
            Self::Parent => "parent",
        }
    }
}

impl FromStr for SpecialFieldKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| std_util::str::loosely_eq(key.as_str(), s))
            .ok_or_else(|| Error::invalid_config(format!("unknown special field key `{s}`")))
    }
}

impl fmt::Display for SpecialFieldKey {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl<'a> SpecialFields<'a> {
    pub fn get(&self, key: SpecialFieldKey) -> Option<&'a Field> {
        match key {
            SpecialFieldKey::Slug => self.slug,
            SpecialFieldKey::Published => self.published,
            SpecialFieldKey::ViewCount => self.view_count,
            SpecialFieldKey::LikeCount => self.like_count,
            SpecialFieldKey::Approved => self.approved,
            SpecialFieldKey::DeletedAt => self.deleted_at,
            SpecialFieldKey::Parent => self.parent,
        }
    }

    fn slot_mut(&mut self, key: SpecialFieldKey) -> &mut Option<&'a Field> {
        match key {
            SpecialFieldKey::Slug => &mut self.slug,
            SpecialFieldKey::Published => &mut self.published,
            SpecialFieldKey::ViewCount => &mut self.view_count,
            SpecialFieldKey::LikeCount => &mut self.like_count,
            SpecialFieldKey::Approved => &mut self.approved,
            SpecialFieldKey::DeletedAt => &mut self.deleted_at,
            SpecialFieldKey::Parent => &mut self.parent,
        }
    }

    /// Filled slots, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SpecialFieldKey, &'a Field)> + '_ {
        SpecialFieldKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|field| (key, field)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a, 'c> Detector<'a, 'c> {
    pub(crate) fn new(model: &'a Model, config: &'c AnalyzerConfig) -> Self {
        Self {
            model,
            config,
            found: SpecialFields::default(),
            remaining: config.special_fields().len(),
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Offer a scalar field to every still-empty slot.
    pub(crate) fn visit(&mut self, field: &'a Field, normalized: &str) {
        if self.is_complete() {
            return;
        }

        let config = self.config;
        for (key, matcher) in config.special_fields() {
            if self.found.get(*key).is_some() || !matcher.matches(normalized, field) {
                continue;
            }

            // A slug must identify a row on its own
            if *key == SpecialFieldKey::Slug && !self.model.is_field_unique(&field.name, true) {
                tracing::debug!(
                    model = %self.model.name,
                    field = %field.name,
                    "slug candidate is not uniquely constrained on its own; skipping"
                );
                continue;
            }

            *self.found.slot_mut(*key) = Some(field);
            self.remaining -= 1;
        }
    }

    pub(crate) fn finish(self) -> SpecialFields<'a> {
        self.found
    }
}

/// Detect special fields on `model` using the configured matchers.
///
/// Only scalar fields are considered. For each slot, the first field in
/// declaration order whose normalized name and type both match wins.
pub fn detect_special_fields<'a>(
    model: &'a Model,
    names: &NormalizedNames<'a>,
    config: &AnalyzerConfig,
) -> SpecialFields<'a> {
    let mut detector = Detector::new(model, config);

    for field in model.scalar_fields() {
        if detector.is_complete() {
            break;
        }

        if let Some(normalized) = names.get(&field.name) {
            detector.visit(field, normalized);
        }
    }

    detector.finish()
}
