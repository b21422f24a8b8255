//! Keeps bindings consistent when the shapes they reference change.
//!
//! The resolver runs as part of every operation that moves, resizes or
//! deletes shapes, before the operation's patch is finalized, so its
//! effects commit atomically with the triggering command.
//!
//! Resolution is a single pass. Bindings reference shapes, never other
//! bindings, so resolving one binding cannot invalidate another and no
//! fixed-point iteration is needed.

use std::collections::HashSet;

use sketchpad_core::{BindingId, Page, Point, ShapeId};

/// The entities a resolution pass touched, for patch restriction.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub shapes: HashSet<ShapeId>,
    pub bindings: HashSet<BindingId>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.bindings.is_empty()
    }
}

/// Re-resolves every binding affected by the given shape changes.
///
/// - A binding whose source or target was removed (or is missing from the
///   page) is deleted. If the source arrow survives, its handle is
///   detached: the `binding_id` is cleared and the handle keeps its
///   current point, which is always a valid position.
/// - A binding whose target changed is recomputed: the source arrow's
///   bound handle is re-anchored against the target's new bounds.
/// - A binding whose source moved away from an unchanged target is
///   detached; dragging an arrow off its target releases the binding.
pub fn resolve_bindings(
    page: &mut Page,
    changed: &HashSet<ShapeId>,
    removed: &HashSet<ShapeId>,
) -> Resolution {
    let mut resolution = Resolution::default();
    let binding_ids: Vec<BindingId> = page.bindings.keys().cloned().collect();

    for binding_id in binding_ids {
        let Some(binding) = page.bindings.get(&binding_id).cloned() else {
            continue;
        };

        let from_gone =
            removed.contains(&binding.from_id) || !page.shapes.contains_key(&binding.from_id);
        let to_gone =
            removed.contains(&binding.to_id) || !page.shapes.contains_key(&binding.to_id);

        if from_gone || to_gone {
            page.bindings.remove(&binding_id);
            resolution.bindings.insert(binding_id);
            if !from_gone {
                detach_handle(page, &binding.from_id, binding.handle_id, &mut resolution);
            }
            continue;
        }

        if changed.contains(&binding.to_id) {
            // Target moved or resized: re-anchor the bound handle.
            let Some(target) = page.shapes.get(&binding.to_id) else {
                continue;
            };
            let anchor = target.bounds().absolute_point(binding.point);

            let Some(arrow) = page.shapes.get_mut(&binding.from_id) else {
                continue;
            };
            let opposite = arrow
                .handle(binding.handle_id.opposite())
                .map(|h| arrow.point.add(h.point));
            let handle_point = match opposite {
                Some(opposite) if binding.distance.abs() > f64::EPSILON => {
                    let direction = anchor.sub(opposite).normalized();
                    anchor.sub(Point::new(
                        direction.x * binding.distance,
                        direction.y * binding.distance,
                    ))
                }
                _ => anchor,
            };
            arrow.set_handle_point(binding.handle_id, handle_point.sub(arrow.point));
            resolution.shapes.insert(binding.from_id.clone());
        } else if changed.contains(&binding.from_id) {
            // The arrow moved while its target stayed put: release it.
            page.bindings.remove(&binding_id);
            resolution.bindings.insert(binding_id);
            detach_handle(page, &binding.from_id, binding.handle_id, &mut resolution);
        }
    }

    resolution
}

fn detach_handle(
    page: &mut Page,
    shape_id: &ShapeId,
    handle_id: sketchpad_core::HandleId,
    resolution: &mut Resolution,
) {
    if let Some(shape) = page.shapes.get_mut(shape_id) {
        if let Some(handle) = shape.handle_mut(handle_id) {
            if handle.binding_id.take().is_some() {
                resolution.shapes.insert(shape_id.clone());
            }
        }
    }
}
