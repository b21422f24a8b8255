//! Atomic, non-interactive operations.
//!
//! Each action is a pure function from the current document (plus
//! parameters) to a new document and the set of entities it touched. The
//! editor diffs the two documents and records exactly one command; actions
//! never touch history themselves.
//!
//! Ids that do not resolve in the current page are skipped, and the rest
//! of the batch proceeds; a delete of an already-deleted shape is a no-op,
//! not an error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sketchpad_core::{
    new_id, Binding, Document, Page, PageId, Point, Shape, ShapeId, Touched,
};

use crate::bindings::resolve_bindings;
use crate::error::EditorError;

/// Offset applied to duplicated and pasted shapes.
pub const DUPLICATE_OFFSET: Point = Point { x: 16.0, y: 16.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignType {
    Top,
    CenterVertical,
    Bottom,
    Left,
    CenterHorizontal,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributeType {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StretchType {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipType {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    ToFront,
    ToBack,
    Forward,
    Backward,
}

/// Shapes and their intra-set bindings lifted out of a page by a copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clipboard {
    pub shapes: Vec<Shape>,
    pub bindings: Vec<Binding>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn page_mut<'a>(doc: &'a mut Document, page_id: &PageId) -> Result<&'a mut Page, EditorError> {
    doc.page_mut(page_id)
        .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))
}

fn page_ref<'a>(doc: &'a Document, page_id: &PageId) -> Result<&'a Page, EditorError> {
    doc.page(page_id)
        .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))
}

/// Ids from `ids` that resolve in the page, in their given order.
fn present_ids(page: &Page, ids: &[ShapeId]) -> Vec<ShapeId> {
    ids.iter()
        .filter(|id| page.shapes.contains_key(*id))
        .cloned()
        .collect()
}

/// Inserts copies of the given shapes (and the bindings fully contained in
/// the set) into the page under fresh ids, then selects exactly the new
/// ids. The shared core of duplicate and paste.
fn insert_copies(
    doc: &Document,
    page_id: &PageId,
    shapes: &[Shape],
    bindings: &[Binding],
    delta: Point,
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;

    let id_map: HashMap<ShapeId, ShapeId> = shapes
        .iter()
        .map(|s| (s.id.clone(), new_id()))
        .collect();

    // Bindings survive only when both endpoints are part of the set.
    let binding_map: HashMap<String, Binding> = bindings
        .iter()
        .filter(|b| id_map.contains_key(&b.from_id) && id_map.contains_key(&b.to_id))
        .map(|b| {
            let mut copy = b.clone();
            copy.id = new_id();
            copy.from_id = id_map[&b.from_id].clone();
            copy.to_id = id_map[&b.to_id].clone();
            (b.id.clone(), copy)
        })
        .collect();

    let base_index = page.next_child_index();
    let mut new_ids = Vec::with_capacity(shapes.len());
    for (i, original) in shapes.iter().enumerate() {
        let mut copy = original.clone();
        copy.id = id_map[&original.id].clone();
        copy.parent_id = page_id.clone();
        copy.child_index = base_index + i as f64;
        copy.translate_by(delta);
        // Remap surviving handle bindings; detach the rest.
        if let Some(handles) = copy.handles_mut() {
            for handle in handles.iter_mut() {
                handle.binding_id = handle
                    .binding_id
                    .take()
                    .and_then(|old| binding_map.get(&old).map(|b| b.id.clone()));
            }
        }
        new_ids.push(copy.id.clone());
        page.add_shape(copy);
    }
    for binding in binding_map.values() {
        page.add_binding(binding.clone());
    }

    if let Some(state) = after.page_state_mut(page_id) {
        state.selected_ids = new_ids.clone();
    }

    let touched = Touched::shapes(new_ids)
        .with_bindings(binding_map.values().map(|b| b.id.clone()))
        .with_page_state();
    Ok((after, touched))
}

/// Duplicates the given shapes in place, offset by `delta`. Copies get
/// fresh, globally-unique ids; the originals are left untouched and the
/// selection moves to the copies.
pub fn duplicate(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
    delta: Point,
) -> Result<(Document, Touched), EditorError> {
    let page = page_ref(doc, page_id)?;
    let present = present_ids(page, ids);
    if present.is_empty() {
        return Ok((doc.clone(), Touched::default()));
    }
    let shapes: Vec<Shape> = present
        .iter()
        .filter_map(|id| page.shapes.get(id).cloned())
        .collect();
    let bindings: Vec<Binding> = page.bindings.values().cloned().collect();
    insert_copies(doc, page_id, &shapes, &bindings, delta)
}

/// Lifts the given shapes and their intra-set bindings into a clipboard.
pub fn copy(doc: &Document, page_id: &PageId, ids: &[ShapeId]) -> Result<Clipboard, EditorError> {
    let page = page_ref(doc, page_id)?;
    let present = present_ids(page, ids);
    let set: HashSet<&ShapeId> = present.iter().collect();
    Ok(Clipboard {
        shapes: present
            .iter()
            .filter_map(|id| page.shapes.get(id).cloned())
            .collect(),
        bindings: page
            .bindings
            .values()
            .filter(|b| set.contains(&b.from_id) && set.contains(&b.to_id))
            .cloned()
            .collect(),
    })
}

/// Inserts the clipboard's contents under fresh ids and selects them.
pub fn paste(
    doc: &Document,
    page_id: &PageId,
    clipboard: &Clipboard,
    delta: Point,
) -> Result<(Document, Touched), EditorError> {
    if clipboard.is_empty() {
        return Ok((doc.clone(), Touched::default()));
    }
    insert_copies(doc, page_id, &clipboard.shapes, &clipboard.bindings, delta)
}

/// Removes the given shapes. Bindings referencing a removed shape are
/// resolved away, surviving arrows are detached, and the removed ids are
/// cleared from the page's view state.
pub fn delete(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;

    let removed: HashSet<ShapeId> = present_ids(page, ids).into_iter().collect();
    if removed.is_empty() {
        return Ok((doc.clone(), Touched::default()));
    }
    for id in &removed {
        page.shapes.remove(id);
    }
    let resolution = resolve_bindings(page, &HashSet::new(), &removed);

    if let Some(state) = after.page_state_mut(page_id) {
        state.selected_ids.retain(|id| !removed.contains(id));
        if state.hovered_id.as_ref().is_some_and(|id| removed.contains(id)) {
            state.hovered_id = None;
        }
        if state.editing_id.as_ref().is_some_and(|id| removed.contains(id)) {
            state.editing_id = None;
        }
    }

    let mut touched = Touched {
        shapes: removed,
        bindings: resolution.bindings,
        page_state: true,
    };
    touched.shapes.extend(resolution.shapes);
    Ok((after, touched))
}

/// Aligns two or more shapes along an edge or center line of their common
/// bounds.
pub fn align(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
    align: AlignType,
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;
    let present = present_ids(page, ids);
    if present.len() < 2 {
        return Ok((doc.clone(), Touched::default()));
    }
    let common = match page.common_bounds(&present) {
        Some(b) => b,
        None => return Ok((doc.clone(), Touched::default())),
    };

    let mut changed = HashSet::new();
    for id in &present {
        if let Some(shape) = page.shapes.get_mut(id) {
            let b = shape.bounds();
            let delta = match align {
                AlignType::Top => Point::new(0.0, common.min_y - b.min_y),
                AlignType::CenterVertical => Point::new(0.0, common.center().y - b.center().y),
                AlignType::Bottom => Point::new(0.0, common.max_y - b.max_y),
                AlignType::Left => Point::new(common.min_x - b.min_x, 0.0),
                AlignType::CenterHorizontal => Point::new(common.center().x - b.center().x, 0.0),
                AlignType::Right => Point::new(common.max_x - b.max_x, 0.0),
            };
            shape.translate_by(delta);
            changed.insert(id.clone());
        }
    }
    let resolution = resolve_bindings(page, &changed, &HashSet::new());
    let mut touched = Touched {
        shapes: changed,
        bindings: resolution.bindings,
        page_state: false,
    };
    touched.shapes.extend(resolution.shapes);
    Ok((after, touched))
}

/// Distributes three or more shapes so their centers are evenly spaced.
pub fn distribute(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
    distribute: DistributeType,
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;
    let present = present_ids(page, ids);
    if present.len() < 3 {
        return Ok((doc.clone(), Touched::default()));
    }

    let axis = |p: Point| match distribute {
        DistributeType::Horizontal => p.x,
        DistributeType::Vertical => p.y,
    };

    let mut ordered: Vec<(ShapeId, f64)> = present
        .iter()
        .filter_map(|id| page.shapes.get(id).map(|s| (id.clone(), axis(s.center()))))
        .collect();
    ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

    let first = ordered[0].1;
    let last = ordered[ordered.len() - 1].1;
    let step = (last - first) / (ordered.len() - 1) as f64;

    let mut changed = HashSet::new();
    for (i, (id, current)) in ordered.iter().enumerate() {
        let offset = first + step * i as f64 - current;
        if offset.abs() > f64::EPSILON {
            if let Some(shape) = page.shapes.get_mut(id) {
                let delta = match distribute {
                    DistributeType::Horizontal => Point::new(offset, 0.0),
                    DistributeType::Vertical => Point::new(0.0, offset),
                };
                shape.translate_by(delta);
                changed.insert(id.clone());
            }
        }
    }
    let resolution = resolve_bindings(page, &changed, &HashSet::new());
    let mut touched = Touched {
        shapes: changed,
        bindings: resolution.bindings,
        page_state: false,
    };
    touched.shapes.extend(resolution.shapes);
    Ok((after, touched))
}

/// Stretches two or more shapes to fill their common bounds along one
/// axis.
pub fn stretch(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
    stretch: StretchType,
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;
    let present = present_ids(page, ids);
    if present.len() < 2 {
        return Ok((doc.clone(), Touched::default()));
    }
    let common = match page.common_bounds(&present) {
        Some(b) => b,
        None => return Ok((doc.clone(), Touched::default())),
    };

    let mut changed = HashSet::new();
    for id in &present {
        if let Some(shape) = page.shapes.get_mut(id) {
            let from = shape.bounds();
            let mut to = from;
            match stretch {
                StretchType::Horizontal => {
                    to.min_x = common.min_x;
                    to.max_x = common.max_x;
                }
                StretchType::Vertical => {
                    to.min_y = common.min_y;
                    to.max_y = common.max_y;
                }
            }
            shape.transform(&from, &to);
            changed.insert(id.clone());
        }
    }
    let resolution = resolve_bindings(page, &changed, &HashSet::new());
    let mut touched = Touched {
        shapes: changed,
        bindings: resolution.bindings,
        page_state: false,
    };
    touched.shapes.extend(resolution.shapes);
    Ok((after, touched))
}

/// Mirrors the shapes within their common bounds.
pub fn flip(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
    flip: FlipType,
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;
    let present = present_ids(page, ids);
    if present.is_empty() {
        return Ok((doc.clone(), Touched::default()));
    }
    let common = match page.common_bounds(&present) {
        Some(b) => b,
        None => return Ok((doc.clone(), Touched::default())),
    };

    let mut changed = HashSet::new();
    for id in &present {
        if let Some(shape) = page.shapes.get_mut(id) {
            match flip {
                FlipType::Horizontal => shape.flip_x_within(&common),
                FlipType::Vertical => shape.flip_y_within(&common),
            }
            changed.insert(id.clone());
        }
    }
    let resolution = resolve_bindings(page, &changed, &HashSet::new());
    let mut touched = Touched {
        shapes: changed,
        bindings: resolution.bindings,
        page_state: false,
    };
    touched.shapes.extend(resolution.shapes);
    Ok((after, touched))
}

/// Reorders the shapes in z-order. Moves are relative to the page's full
/// draw order; child indices are renumbered densely afterwards.
pub fn reorder(
    doc: &Document,
    page_id: &PageId,
    ids: &[ShapeId],
    move_type: MoveType,
) -> Result<(Document, Touched), EditorError> {
    let mut after = doc.clone();
    let page = page_mut(&mut after, page_id)?;
    let selected: HashSet<ShapeId> = present_ids(page, ids).into_iter().collect();
    if selected.is_empty() {
        return Ok((doc.clone(), Touched::default()));
    }

    let mut order = page.shape_ids_in_order();
    match move_type {
        MoveType::ToFront => {
            let (rest, mut front): (Vec<ShapeId>, Vec<ShapeId>) =
                order.into_iter().partition(|id| !selected.contains(id));
            order = rest;
            order.append(&mut front);
        }
        MoveType::ToBack => {
            let (mut back, rest): (Vec<ShapeId>, Vec<ShapeId>) =
                order.into_iter().partition(|id| selected.contains(id));
            back.extend(rest);
            order = back;
        }
        MoveType::Forward => {
            // Swap each selected shape with the unselected neighbor above
            // it, topmost first so a block of selections moves as one.
            for i in (0..order.len().saturating_sub(1)).rev() {
                if selected.contains(&order[i]) && !selected.contains(&order[i + 1]) {
                    order.swap(i, i + 1);
                }
            }
        }
        MoveType::Backward => {
            for i in 1..order.len() {
                if selected.contains(&order[i]) && !selected.contains(&order[i - 1]) {
                    order.swap(i, i - 1);
                }
            }
        }
    }

    let mut changed = HashSet::new();
    for (position, id) in order.iter().enumerate() {
        let index = (position + 1) as f64;
        if let Some(shape) = page.shapes.get_mut(id) {
            if shape.child_index != index {
                shape.child_index = index;
                changed.insert(id.clone());
            }
        }
    }
    Ok((after, Touched::shapes(changed)))
}
