//! Evaluation of coerced selector lists.

use quarry_foundation::{Error, MergePolicy, Result, TargetLabel};
use quarry_model::{CoercedValue, ResolvedValue, Selector, SelectorList};

use crate::context::ConfigurationContext;

/// Resolves coerced selector lists against a configuration context.
///
/// Pure: identical inputs produce identical outputs, including errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectorResolver;

impl SelectorResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves every entry of `list` and combines the results per
    /// `merge`.
    ///
    /// Every error is attributed to `target` and `attribute`.
    pub fn resolve(
        &self,
        ctx: &ConfigurationContext,
        target: &TargetLabel,
        attribute: &str,
        list: &SelectorList,
        merge: MergePolicy,
    ) -> Result<ResolvedValue> {
        let mut resolved = Vec::with_capacity(list.len());
        for selector in list.selectors() {
            resolved.push(
                self.resolve_selector(ctx, attribute, selector)
                    .map_err(|e| e.with_target(target.clone()).with_attribute(attribute))?,
            );
        }
        combine(resolved, merge)
            .map_err(|e| e.with_target(target.clone()).with_attribute(attribute))
    }

    /// Resolves one selector to the value of its winning branch.
    fn resolve_selector(
        &self,
        ctx: &ConfigurationContext,
        attribute: &str,
        selector: &Selector,
    ) -> Result<ResolvedValue> {
        let satisfied: Vec<&(TargetLabel, CoercedValue)> = selector
            .entries()
            .iter()
            .filter(|(key, _)| ctx.oracle().satisfies(key, ctx.platform()))
            .collect();

        let winner = match satisfied.as_slice() {
            [] => match selector.default_value() {
                Some(value) => value,
                None => {
                    let message = selector.no_match_message().map_or_else(
                        || {
                            format!(
                                "no matching configuration for platform '{}' in attribute '{attribute}'",
                                ctx.platform()
                            )
                        },
                        ToString::to_string,
                    );
                    return Err(Error::no_match(message));
                }
            },
            [(_, value)] => value,
            _ => self.break_tie(ctx, &satisfied)?,
        };

        winner.clone().into_resolved()
    }

    /// Specificity tie-break: the winner must dominate every other
    /// satisfied key.
    fn break_tie<'a>(
        &self,
        ctx: &ConfigurationContext,
        satisfied: &[&'a (TargetLabel, CoercedValue)],
    ) -> Result<&'a CoercedValue> {
        let mut winner: Option<&(TargetLabel, CoercedValue)> = None;
        for &candidate in satisfied {
            let dominates_all = satisfied.iter().all(|&other| {
                std::ptr::eq(candidate, other) || ctx.oracle().dominates(&candidate.0, &other.0)
            });
            if dominates_all {
                if winner.is_some() {
                    winner = None;
                    break;
                }
                winner = Some(candidate);
            }
        }
        match winner {
            Some((_, value)) => Ok(value),
            None => Err(Error::ambiguous_match(
                satisfied.iter().map(|(key, _)| key.to_string()).collect(),
            )),
        }
    }
}

/// Combines the per-selector results per the attribute's merge policy.
fn combine(mut values: Vec<ResolvedValue>, merge: MergePolicy) -> Result<ResolvedValue> {
    if values.len() == 1 {
        return Ok(values.remove(0));
    }
    match merge {
        MergePolicy::Single => Err(Error::scalar_merge(values.len())),
        MergePolicy::Combine => combine_in_order(values),
    }
}

/// Ordered concatenation for lists, in-order key merge for dicts.
fn combine_in_order(values: Vec<ResolvedValue>) -> Result<ResolvedValue> {
    let mut iter = values.into_iter();
    let first = iter.next().ok_or_else(|| Error::scalar_merge(0))?;
    match first {
        ResolvedValue::List(mut acc) => {
            for value in iter {
                match value {
                    ResolvedValue::List(items) => acc = acc.append(&items),
                    other => return Err(shape_mismatch(&other)),
                }
            }
            Ok(ResolvedValue::List(acc))
        }
        ResolvedValue::Dict(mut acc) => {
            for value in iter {
                match value {
                    ResolvedValue::Dict(entries) => {
                        for (key, entry) in entries.iter() {
                            acc = acc.insert(key.clone(), entry.clone());
                        }
                    }
                    other => return Err(shape_mismatch(&other)),
                }
            }
            Ok(ResolvedValue::Dict(acc))
        }
        _ => Err(Error::scalar_merge(1 + iter.count())),
    }
}

fn shape_mismatch(value: &ResolvedValue) -> Error {
    Error::construction(format!(
        "select() entries resolved to incompatible shapes (unexpected {value:?})"
    ))
}
