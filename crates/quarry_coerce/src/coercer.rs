//! The attribute coercer.

use std::collections::HashSet;
use std::sync::Arc;

use quarry_foundation::{AttrType, Error, ErrorKind, PackagePath, Result};
use quarry_model::selector::DEFAULT_KEY;
use quarry_model::{
    CoercedValue, RawSelector, RawSelectorEntry, RawSelectorList, RawValue, Selector,
    SelectorList,
};

use crate::resolver::CellResolver;

/// Coerces raw attribute values against their declared types.
///
/// Stateless apart from the injected resolver; safe to share across
/// concurrent materializations.
pub struct AttrCoercer {
    resolver: Arc<dyn CellResolver>,
}

impl AttrCoercer {
    /// Creates a coercer using the given cell resolver.
    #[must_use]
    pub fn new(resolver: Arc<dyn CellResolver>) -> Self {
        Self { resolver }
    }

    /// Coerces one raw value against a declared attribute type.
    ///
    /// A `select()` is accepted only here, at the top of an attribute
    /// value; its branches are coerced against the same declared type
    /// but left unevaluated.
    pub fn coerce(
        &self,
        package: &PackagePath,
        ty: &AttrType,
        raw: &RawValue,
    ) -> Result<CoercedValue> {
        match raw {
            RawValue::Select(list) => self.coerce_selector_list(package, ty, list),
            _ => self.coerce_plain(package, ty, raw),
        }
    }

    /// Coerces a value in a position where `select()` is not allowed:
    /// list elements, dict values, and selector branches.
    fn coerce_plain(
        &self,
        package: &PackagePath,
        ty: &AttrType,
        raw: &RawValue,
    ) -> Result<CoercedValue> {
        match (ty, raw) {
            (_, RawValue::Select(_)) => Err(Error::new(ErrorKind::NestedSelect)),
            (AttrType::Bool, RawValue::Bool(b)) => Ok(CoercedValue::Bool(*b)),
            (AttrType::Int, RawValue::Int(n)) => Ok(CoercedValue::Int(*n)),
            (AttrType::String, RawValue::String(s)) => {
                Ok(CoercedValue::String(s.as_str().into()))
            }
            (AttrType::Path, RawValue::String(s)) => {
                Ok(CoercedValue::Path(self.resolver.resolve_path(package, s)?))
            }
            (AttrType::Target, RawValue::String(s)) => Ok(CoercedValue::Target(
                self.resolver.resolve_target(package, s)?,
            )),
            (AttrType::List(elem), RawValue::List(items)) => Ok(CoercedValue::List(
                items
                    .iter()
                    .map(|item| self.coerce_plain(package, elem, item))
                    .collect::<Result<_>>()?,
            )),
            (AttrType::Dict(vty), RawValue::Dict(entries)) => {
                let mut seen = HashSet::new();
                let mut coerced = quarry_foundation::QMap::new();
                for (key, value) in entries {
                    if !seen.insert(key.as_str()) {
                        return Err(Error::duplicate_key(key));
                    }
                    coerced = coerced.insert(
                        key.as_str().into(),
                        self.coerce_plain(package, vty, value)?,
                    );
                }
                Ok(CoercedValue::Dict(coerced))
            }
            (expected, found) => Err(Error::coercion(expected.clone(), found.describe())),
        }
    }

    /// Coerces a raw selector list structurally.
    ///
    /// Literal entries become default-only selectors so ordered
    /// concatenation needs no special casing downstream. Keys other than
    /// `DEFAULT` are resolved as target labels.
    fn coerce_selector_list(
        &self,
        package: &PackagePath,
        ty: &AttrType,
        list: &RawSelectorList,
    ) -> Result<CoercedValue> {
        let mut selectors = Vec::with_capacity(list.entries().len());
        for entry in list.entries() {
            match entry {
                RawSelectorEntry::Literal(raw) => {
                    selectors.push(Selector::literal(self.coerce_plain(package, ty, raw)?));
                }
                RawSelectorEntry::Selector(raw_sel) => {
                    selectors.push(self.coerce_selector(package, ty, raw_sel)?);
                }
            }
        }
        Ok(CoercedValue::Select(SelectorList::new(selectors)))
    }

    fn coerce_selector(
        &self,
        package: &PackagePath,
        ty: &AttrType,
        raw_sel: &RawSelector,
    ) -> Result<Selector> {
        let mut entries = Vec::new();
        let mut default = None;
        let mut seen = HashSet::new();
        for (key, value) in raw_sel.entries() {
            if !seen.insert(key.as_str()) {
                return Err(Error::duplicate_key(key));
            }
            let branch = self.coerce_plain(package, ty, value)?;
            if key == DEFAULT_KEY {
                default = Some(branch);
            } else {
                entries.push((self.resolver.resolve_target(package, key)?, branch));
            }
        }
        let mut selector = Selector::new(entries);
        if let Some(value) = default {
            selector = selector.with_default(value);
        }
        if let Some(message) = raw_sel.no_match_message() {
            selector = selector.with_no_match_message(message);
        }
        Ok(selector)
    }
}
