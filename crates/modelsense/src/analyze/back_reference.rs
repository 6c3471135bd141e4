use crate::schema::{Field, Model, Relation};

use std_util::slice;

/// Find the field on `target` pointing back at `source` through `field`.
///
/// Candidates are the target's relation fields whose target is `source`,
/// excluding `field` itself when the relation is self-referential. When more
/// than one candidate exists, relation tags decide; when neither side is
/// tagged, the foreign-key field sets decide. A candidate is only accepted if
/// looking up its own back-reference yields `field` again, so a match always
/// holds in both directions. If none of that settles it, no back-reference is
/// returned.
pub fn find_back_reference<'a>(
    field: &Field,
    target: &'a Model,
    source: &Model,
) -> Option<&'a Field> {
    let found = candidate(field, target, source)?;

    match candidate(found, source, target) {
        Some(back) if back.name == field.name => Some(found),
        _ => {
            tracing::debug!(
                model = %source.name,
                field = %field.name,
                target = %target.name,
                candidate = %found.name,
                "candidate does not point back; no back-reference"
            );
            None
        }
    }
}

fn candidate<'a>(field: &Field, target: &'a Model, source: &Model) -> Option<&'a Field> {
    let relation = field.ty.as_relation()?;

    let candidates: Vec<(&'a Field, &'a Relation)> = target
        .relations()
        .filter(|(candidate, candidate_relation)| {
            candidate_relation.target == source.name
                && !(target.name == source.name && candidate.name == field.name)
        })
        .collect();

    match &candidates[..] {
        [] => None,
        [(only, _)] => Some(*only),
        _ => {
            let found = disambiguate(relation, &candidates);

            if found.is_none() {
                tracing::debug!(
                    model = %source.name,
                    field = %field.name,
                    target = %target.name,
                    candidates = candidates.len(),
                    "could not pick a back-reference among several candidates"
                );
            }

            found
        }
    }
}

fn disambiguate<'a>(
    relation: &Relation,
    candidates: &[(&'a Field, &'a Relation)],
) -> Option<&'a Field> {
    if let Some(tag) = relation.tag() {
        return sole(candidates.iter().filter(|(_, other)| other.tag() == Some(tag)));
    }

    let untagged = candidates.iter().filter(|(_, other)| other.tag().is_none());

    if !relation.has_foreign_key() {
        // The owner of the only foreign key pointing here
        return sole(untagged.filter(|(_, other)| other.has_foreign_key()));
    }

    let keyed: Vec<_> = untagged
        .clone()
        .filter(|(_, other)| same_key(relation, other))
        .collect();

    if keyed.is_empty() {
        sole(untagged.filter(|(_, other)| !other.has_foreign_key()))
    } else {
        sole(keyed.into_iter())
    }
}

fn same_key(lhs: &Relation, rhs: &Relation) -> bool {
    lhs.foreign_key.len() == rhs.foreign_key.len()
        && slice::same_members(&lhs.foreign_key[..], &rhs.foreign_key[..])
}

/// The single item yielded, or `None` if there are zero or several.
fn sole<'a, 'b>(
    mut matches: impl Iterator<Item = &'b (&'a Field, &'a Relation)>,
) -> Option<&'a Field>
where
    'a: 'b,
{
    let (first, _) = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(*first),
    }
}
