use super::AnalyzerConfig;
use crate::schema::{Model, Relation};

use std_util::slice;
use std_util::str::normalize;

/// Returns `true` if `model` exists mainly to link other models.
///
/// The model must own foreign keys to at least two distinct ends: two
/// different targets, or the same target through two different key sets.
/// Ignoring foreign key fields and the configured administrative fields
/// (timestamps, soft-delete markers), at most `junction_max_data_fields`
/// scalar fields may remain.
pub fn is_junction_table(model: &Model, config: &AnalyzerConfig) -> bool {
    let keyed: Vec<&Relation> = model
        .relations()
        .map(|(_, relation)| relation)
        .filter(|relation| relation.has_foreign_key())
        .collect();

    let links_two_ends = keyed.iter().enumerate().any(|(i, lhs)| {
        keyed[i + 1..].iter().any(|rhs| {
            lhs.target != rhs.target
                || !slice::same_members(&lhs.foreign_key[..], &rhs.foreign_key[..])
        })
    });

    if !links_two_ends {
        return false;
    }

    let admin = config.junction_admin_fields();

    let data_fields = model
        .scalar_fields()
        .filter(|field| !model.is_foreign_key_field(&field.name))
        .filter(|field| !admin.contains(&normalize(&field.name)))
        .count();

    data_fields <= config.junction_max_data_fields()
}
