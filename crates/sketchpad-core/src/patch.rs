//! Partial deep updates over the document's JSON value form.
//!
//! A [`Patch`] describes only the fields that changed between two document
//! states. It is a recursive tree with an explicit three-way distinction at
//! every field: absent from the patch means *unchanged*, [`Patch::Replace`]
//! means *set this value*, and [`Patch::Remove`] means *delete this field*.
//! Plain optional fields cannot express that last case, which is why the
//! tombstone is its own variant.
//!
//! Merge semantics: object fields recurse, array and scalar fields are
//! replaced wholesale. Patches never encode array-element diffs; a freehand
//! point list always travels as one value, so there is no index-shift
//! ambiguity to resolve.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::PatchError;
use crate::id::{BindingId, PageId, ShapeId};

// Keys into the document's serialized form. These must stay in sync with
// the serde attributes on `Document` and `Page`.
const PAGES: &str = "pages";
const PAGE_STATES: &str = "pageStates";
const SHAPES: &str = "shapes";
const BINDINGS: &str = "bindings";

/// A partial, recursively-partial description of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Patch {
    /// Recurse into an object's fields. Fields not named are untouched.
    Update(BTreeMap<String, Patch>),
    /// Replace the value at this field wholesale.
    Replace(Value),
    /// Delete this field from its parent object.
    Remove,
}

impl Patch {
    /// The patch that changes nothing.
    pub fn empty() -> Self {
        Patch::Update(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Patch::Update(fields) if fields.is_empty())
    }

    /// Computes the minimal patch turning `before` into `after`. Equal
    /// subtrees contribute nothing; object fields recurse; everything else
    /// is replaced wholesale.
    pub fn diff(before: &Value, after: &Value) -> Patch {
        diff_value(before, after).unwrap_or_else(Patch::empty)
    }

    /// Applies this patch to a value in place.
    pub fn apply_to(&self, target: &mut Value) {
        match self {
            Patch::Replace(value) => *target = value.clone(),
            // Removal is resolved by the parent object during recursion; a
            // bare Remove at the root degenerates to null.
            Patch::Remove => *target = Value::Null,
            Patch::Update(fields) => {
                if !matches!(target, Value::Object(_)) {
                    // Merging into a non-object replaces it with one.
                    *target = Value::Object(Map::new());
                }
                if let Value::Object(map) = target {
                    for (key, patch) in fields {
                        match patch {
                            Patch::Remove => {
                                map.remove(key);
                            }
                            Patch::Replace(value) => {
                                map.insert(key.clone(), value.clone());
                            }
                            Patch::Update(_) => {
                                let slot = map
                                    .entry(key.clone())
                                    .or_insert_with(|| Value::Object(Map::new()));
                                patch.apply_to(slot);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Returns a new value with this patch applied.
    pub fn applied_to(&self, value: &Value) -> Value {
        let mut out = value.clone();
        self.apply_to(&mut out);
        out
    }

    /// Computes the patch that, applied after this one, restores `before`.
    ///
    /// Fields this patch created (absent in `before`) invert to
    /// [`Patch::Remove`]: undoing a creation is a deletion, never a merge
    /// of an empty object.
    pub fn invert(&self, before: &Value) -> Patch {
        match self {
            Patch::Replace(_) | Patch::Remove => Patch::Replace(before.clone()),
            Patch::Update(fields) => match before {
                Value::Object(map) => {
                    let mut inverse = BTreeMap::new();
                    for (key, patch) in fields {
                        match map.get(key) {
                            Some(previous) => {
                                let p = patch.invert(previous);
                                if !p.is_empty() {
                                    inverse.insert(key.clone(), p);
                                }
                            }
                            None => {
                                // Removing an already-absent field needs no
                                // inverse at all.
                                if !matches!(patch, Patch::Remove) {
                                    inverse.insert(key.clone(), Patch::Remove);
                                }
                            }
                        }
                    }
                    Patch::Update(inverse)
                }
                // The merge replaced a non-object; restore it wholesale.
                other => Patch::Replace(other.clone()),
            },
        }
    }

    /// Merges a later patch into this one, such that applying the result
    /// equals applying `self` then `later`.
    pub fn compose(self, later: Patch) -> Patch {
        match (self, later) {
            (Patch::Update(mut first), Patch::Update(second)) => {
                for (key, late) in second {
                    match first.remove(&key) {
                        Some(early) => {
                            first.insert(key, early.compose(late));
                        }
                        None => {
                            first.insert(key, late);
                        }
                    }
                }
                Patch::Update(first)
            }
            (Patch::Replace(mut value), Patch::Update(fields)) => {
                Patch::Update(fields).apply_to(&mut value);
                Patch::Replace(value)
            }
            (Patch::Remove, Patch::Update(fields)) => {
                // Remove then merge re-creates the object from scratch.
                let mut value = Value::Object(Map::new());
                Patch::Update(fields).apply_to(&mut value);
                Patch::Replace(value)
            }
            // A later Replace or Remove wins outright.
            (_, later) => later,
        }
    }
}

fn diff_value(before: &Value, after: &Value) -> Option<Patch> {
    if before == after {
        return None;
    }
    match (before, after) {
        (Value::Object(a), Value::Object(b)) => {
            let mut fields = BTreeMap::new();
            for (key, old) in a {
                match b.get(key) {
                    Some(new) => {
                        if let Some(p) = diff_value(old, new) {
                            fields.insert(key.clone(), p);
                        }
                    }
                    None => {
                        fields.insert(key.clone(), Patch::Remove);
                    }
                }
            }
            for (key, new) in b {
                if !a.contains_key(key) {
                    fields.insert(key.clone(), Patch::Replace(new.clone()));
                }
            }
            Some(Patch::Update(fields))
        }
        // Arrays and scalars replace wholesale.
        _ => Some(Patch::Replace(after.clone())),
    }
}

/// Names, in advance, which entities an operation touched, so diffing two
/// documents never scans shapes the operation could not have changed.
#[derive(Debug, Clone, Default)]
pub struct Touched {
    pub shapes: HashSet<ShapeId>,
    pub bindings: HashSet<BindingId>,
    /// Whether the page's view state (selection, hover, brush) may differ.
    pub page_state: bool,
}

impl Touched {
    pub fn shapes<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ShapeId>,
    {
        Self {
            shapes: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_bindings<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BindingId>,
    {
        self.bindings.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_page_state(mut self) -> Self {
        self.page_state = true;
        self
    }

    pub fn merge(&mut self, other: Touched) {
        self.shapes.extend(other.shapes);
        self.bindings.extend(other.bindings);
        self.page_state |= other.page_state;
    }
}

/// Diffs two documents, restricted to the named page and the entities in
/// `touched`. Entities present on one side only become creations or
/// tombstones; entities changed on both sides diff field-by-field.
pub fn diff_documents(
    before: &Document,
    after: &Document,
    page_id: &PageId,
    touched: &Touched,
) -> Result<Patch, PatchError> {
    let before_page = before.page(page_id);
    let after_page = after.page(page_id);

    let mut shapes = BTreeMap::new();
    for id in &touched.shapes {
        let old = before_page.and_then(|p| p.shapes.get(id));
        let new = after_page.and_then(|p| p.shapes.get(id));
        if let Some(patch) = diff_entity(old, new)? {
            shapes.insert(id.clone(), patch);
        }
    }

    let mut bindings = BTreeMap::new();
    for id in &touched.bindings {
        let old = before_page.and_then(|p| p.bindings.get(id));
        let new = after_page.and_then(|p| p.bindings.get(id));
        if let Some(patch) = diff_entity(old, new)? {
            bindings.insert(id.clone(), patch);
        }
    }

    let mut page_fields = BTreeMap::new();
    if !shapes.is_empty() {
        page_fields.insert(SHAPES.to_string(), Patch::Update(shapes));
    }
    if !bindings.is_empty() {
        page_fields.insert(BINDINGS.to_string(), Patch::Update(bindings));
    }

    let mut root = BTreeMap::new();
    if !page_fields.is_empty() {
        let mut pages = BTreeMap::new();
        pages.insert(page_id.clone(), Patch::Update(page_fields));
        root.insert(PAGES.to_string(), Patch::Update(pages));
    }

    if touched.page_state {
        let old = before.page_state(page_id);
        let new = after.page_state(page_id);
        if let Some(patch) = diff_entity(old, new)? {
            let mut states = BTreeMap::new();
            states.insert(page_id.clone(), patch);
            root.insert(PAGE_STATES.to_string(), Patch::Update(states));
        }
    }

    Ok(Patch::Update(root))
}

fn diff_entity<T: Serialize + PartialEq>(
    before: Option<&T>,
    after: Option<&T>,
) -> Result<Option<Patch>, PatchError> {
    Ok(match (before, after) {
        (None, None) => None,
        (Some(_), None) => Some(Patch::Remove),
        (None, Some(new)) => Some(Patch::Replace(serde_json::to_value(new)?)),
        (Some(old), Some(new)) => {
            if old == new {
                None
            } else {
                let patch = Patch::diff(&serde_json::to_value(old)?, &serde_json::to_value(new)?);
                if patch.is_empty() {
                    None
                } else {
                    Some(patch)
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn diff_recurses_into_objects() {
        let before = json!({ "a": { "x": 1, "y": 2 }, "b": 3 });
        let after = json!({ "a": { "x": 1, "y": 9 }, "b": 3 });
        let patch = Patch::diff(&before, &after);
        assert_eq!(patch.applied_to(&before), after);
        // Only the changed leaf appears in the patch.
        let Patch::Update(fields) = &patch else {
            panic!("expected an update patch");
        };
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("a"));
    }

    #[test]
    fn arrays_replace_wholesale() {
        let before = json!({ "points": [[0, 0], [1, 1], [2, 2]] });
        let after = json!({ "points": [[0, 0], [9, 9]] });
        let patch = Patch::diff(&before, &after);
        let Patch::Update(fields) = &patch else {
            panic!("expected an update patch");
        };
        assert_eq!(
            fields.get("points"),
            Some(&Patch::Replace(json!([[0, 0], [9, 9]])))
        );
    }

    #[test]
    fn removed_fields_become_tombstones() {
        let before = json!({ "a": 1, "b": 2 });
        let after = json!({ "a": 1 });
        let patch = Patch::diff(&before, &after);
        assert_eq!(patch.applied_to(&before), after);
        let Patch::Update(fields) = &patch else {
            panic!("expected an update patch");
        };
        assert_eq!(fields.get("b"), Some(&Patch::Remove));
    }

    #[test]
    fn invert_restores_before() {
        let before = json!({ "a": { "x": 1 }, "gone": true });
        let after = json!({ "a": { "x": 2, "new": "field" } });
        let patch = Patch::diff(&before, &after);
        let inverse = patch.invert(&before);
        assert_eq!(inverse.applied_to(&patch.applied_to(&before)), before);
    }

    #[test]
    fn invert_of_creation_is_removal() {
        let before = json!({});
        let after = json!({ "created": { "deep": [1, 2] } });
        let patch = Patch::diff(&before, &after);
        let inverse = patch.invert(&before);
        let Patch::Update(fields) = &inverse else {
            panic!("expected an update patch");
        };
        assert_eq!(fields.get("created"), Some(&Patch::Remove));
        assert_eq!(inverse.applied_to(&after), before);
    }

    #[test]
    fn compose_equals_sequential_application() {
        let base = json!({ "a": 1, "b": { "c": 2 }, "d": [1, 2] });
        let mid = json!({ "a": 1, "b": { "c": 5, "e": 6 }, "d": [3] });
        let end = json!({ "b": { "c": 5 }, "d": [3], "f": "new" });
        let p1 = Patch::diff(&base, &mid);
        let p2 = Patch::diff(&mid, &end);
        let merged = p1.clone().compose(p2.clone());
        assert_eq!(
            p2.applied_to(&p1.applied_to(&base)),
            merged.applied_to(&base)
        );
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let value = json!({ "a": 1 });
        assert!(Patch::empty().is_empty());
        assert_eq!(Patch::empty().applied_to(&value), value);
    }

    #[test]
    fn merge_into_scalar_replaces_with_object() {
        let before = json!({ "slot": 3 });
        let mut fields = BTreeMap::new();
        fields.insert("inner".to_string(), Patch::Replace(json!(1)));
        let mut outer = BTreeMap::new();
        outer.insert("slot".to_string(), Patch::Update(fields));
        let patch = Patch::Update(outer);
        assert_eq!(patch.applied_to(&before), json!({ "slot": { "inner": 1 } }));
        // And the inverse restores the scalar wholesale.
        let inverse = patch.invert(&before);
        assert_eq!(inverse.applied_to(&patch.applied_to(&before)), before);
    }
}
