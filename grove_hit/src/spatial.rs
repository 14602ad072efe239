// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference rendering surface: one rectangle per drawn node.

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use grove_tree::NodeId;

use crate::surface::RenderSurface;

/// Handle of an element in a [`SpatialSurface`].
///
/// Ids are never reused, so a larger id is always the newer element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

bitflags::bitflags! {
    /// Element flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is drawn.
        const VISIBLE  = 0b0000_0001;
        /// Element participates in hit testing.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

#[derive(Clone, Debug)]
struct Entry {
    node: NodeId,
    bounds: Rect,
    z_index: i32,
    flags: ElementFlags,
}

/// Flat surface of node rectangles with z-ordering.
///
/// Each node is drawn by at most one element. Hit testing picks, among
/// visible and pickable elements whose bounds contain the point (edges
/// included), the highest `z_index`; ties go to the newer element.
#[derive(Clone, Debug, Default)]
pub struct SpatialSurface {
    entries: HashMap<ElementId, Entry>,
    by_node: HashMap<NodeId, ElementId>,
    next_id: u32,
}

impl SpatialSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `node` at `bounds`, replacing any element it already had.
    pub fn insert(&mut self, node: NodeId, bounds: Rect, z_index: i32) -> ElementId {
        self.remove_node(node);
        let id = ElementId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.insert(
            id,
            Entry {
                node,
                bounds,
                z_index,
                flags: ElementFlags::default(),
            },
        );
        self.by_node.insert(node, id);
        id
    }

    /// Update an element's bounds. Returns `false` for unknown elements.
    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) -> bool {
        let Some(entry) = self.entries.get_mut(&element) else {
            return false;
        };
        entry.bounds = bounds;
        true
    }

    /// Update an element's z-index. Returns `false` for unknown elements.
    pub fn set_z_index(&mut self, element: ElementId, z_index: i32) -> bool {
        let Some(entry) = self.entries.get_mut(&element) else {
            return false;
        };
        entry.z_index = z_index;
        true
    }

    /// Update an element's flags. Returns `false` for unknown elements.
    pub fn set_flags(&mut self, element: ElementId, flags: ElementFlags) -> bool {
        let Some(entry) = self.entries.get_mut(&element) else {
            return false;
        };
        entry.flags = flags;
        true
    }

    /// Remove an element, returning the node it drew.
    pub fn remove(&mut self, element: ElementId) -> Option<NodeId> {
        let entry = self.entries.remove(&element)?;
        self.by_node.remove(&entry.node);
        Some(entry.node)
    }

    /// Remove whatever element draws `node`.
    pub fn remove_node(&mut self, node: NodeId) -> Option<ElementId> {
        let id = self.by_node.remove(&node)?;
        self.entries.remove(&id);
        Some(id)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_node.clear();
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[inline]
fn contains(rect: Rect, point: Point) -> bool {
    rect.x0 <= point.x && rect.y0 <= point.y && point.x <= rect.x1 && point.y <= rect.y1
}

impl RenderSurface for SpatialSurface {
    type Element = ElementId;

    fn element_from_point(&self, point: Point) -> Option<ElementId> {
        let required = ElementFlags::VISIBLE | ElementFlags::PICKABLE;
        self.entries
            .iter()
            .filter(|(_, e)| e.flags.contains(required) && contains(e.bounds, point))
            .max_by_key(|(id, e)| (e.z_index, **id))
            .map(|(id, _)| *id)
    }

    fn node_of(&self, element: ElementId) -> Option<NodeId> {
        self.entries.get(&element).map(|e| e.node)
    }

    fn element_of(&self, node: NodeId) -> Option<ElementId> {
        self.by_node.get(&node).copied()
    }

    fn element_bounds(&self, element: ElementId) -> Option<Rect> {
        self.entries.get(&element).map(|e| e.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit_test;
    use grove_tree::Tree;

    fn tree3() -> (Tree<()>, NodeId, NodeId) {
        let mut tree = Tree::new(());
        let a = tree.insert(tree.root(), ()).unwrap();
        let b = tree.insert(tree.root(), ()).unwrap();
        (tree, a, b)
    }

    #[test]
    fn topmost_by_z_wins() {
        let (tree, a, b) = tree3();
        let mut surface = SpatialSurface::new();
        surface.insert(a, Rect::new(40.0, 40.0, 120.0, 120.0), 10);
        surface.insert(b, Rect::new(10.0, 10.0, 60.0, 60.0), 0);
        assert_eq!(
            hit_test(&surface, &tree, Point::new(50.0, 50.0)),
            Some(a),
            "topmost by z should win"
        );
        assert_eq!(hit_test(&surface, &tree, Point::new(20.0, 20.0)), Some(b));
    }

    #[test]
    fn equal_z_newer_wins() {
        let (tree, a, b) = tree3();
        let mut surface = SpatialSurface::new();
        surface.insert(a, Rect::new(0.0, 0.0, 100.0, 100.0), 5);
        surface.insert(b, Rect::new(0.0, 0.0, 100.0, 100.0), 5);
        assert_eq!(hit_test(&surface, &tree, Point::new(50.0, 50.0)), Some(b));

        // Re-inserting `a` makes its element the newer one.
        surface.insert(a, Rect::new(0.0, 0.0, 100.0, 100.0), 5);
        assert_eq!(hit_test(&surface, &tree, Point::new(50.0, 50.0)), Some(a));
        assert_eq!(surface.len(), 2, "one element per node");
    }

    #[test]
    fn edges_are_inside_and_outside_is_none() {
        let (tree, a, _) = tree3();
        let mut surface = SpatialSurface::new();
        surface.insert(a, Rect::new(0.0, 0.0, 10.0, 10.0), 0);
        assert_eq!(hit_test(&surface, &tree, Point::new(10.0, 10.0)), Some(a));
        assert_eq!(hit_test(&surface, &tree, Point::new(10.5, 10.0)), None);
        assert_eq!(hit_test(&surface, &tree, Point::new(-1.0e12, 1.0e12)), None);
    }

    #[test]
    fn unpickable_elements_are_skipped() {
        let (tree, a, b) = tree3();
        let mut surface = SpatialSurface::new();
        surface.insert(a, Rect::new(0.0, 0.0, 100.0, 100.0), 0);
        let top = surface.insert(b, Rect::new(0.0, 0.0, 100.0, 100.0), 1);
        surface.set_flags(top, ElementFlags::VISIBLE);
        assert_eq!(hit_test(&surface, &tree, Point::new(5.0, 5.0)), Some(a));
    }

    #[test]
    fn updates_and_removal() {
        let (tree, a, b) = tree3();
        let mut surface = SpatialSurface::new();
        let ea = surface.insert(a, Rect::new(0.0, 0.0, 10.0, 10.0), 0);
        let eb = surface.insert(b, Rect::new(0.0, 0.0, 10.0, 10.0), 0);
        assert!(surface.set_z_index(ea, 3));
        assert_eq!(hit_test(&surface, &tree, Point::new(5.0, 5.0)), Some(a));
        assert!(surface.set_bounds(ea, Rect::new(50.0, 50.0, 60.0, 60.0)));
        assert_eq!(hit_test(&surface, &tree, Point::new(5.0, 5.0)), Some(b));
        assert_eq!(surface.remove(eb), Some(b));
        assert_eq!(surface.element_of(b), None);
        assert_eq!(surface.remove_node(a), Some(ea));
        assert!(surface.is_empty());
        assert!(!surface.set_bounds(ea, Rect::ZERO));
    }
}
