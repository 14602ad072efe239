// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host rendering surface contract and the hit-test entry point.

use grove_tree::{NodeId, Tree};
use kurbo::{Point, Rect};

/// Read-only view of the host's rendering surface.
///
/// Elements are whatever handle the renderer uses for a drawn node (a DOM
/// element id, a widget id, an index into a display list). Implementations
/// must not panic for any input, including points far outside the canvas.
pub trait RenderSurface {
    /// Handle of a rendered element.
    type Element: Copy + PartialEq + core::fmt::Debug;

    /// Topmost element under `point`, in surface coordinates.
    fn element_from_point(&self, point: Point) -> Option<Self::Element>;

    /// Node drawn by `element`, if any.
    fn node_of(&self, element: Self::Element) -> Option<NodeId>;

    /// Element currently drawing `node`, if any.
    fn element_of(&self, node: NodeId) -> Option<Self::Element>;

    /// Surface-space bounds of `element`.
    fn element_bounds(&self, element: Self::Element) -> Option<Rect>;
}

/// Resolve the live node drawn at `point`.
///
/// Returns `None` for non-finite points, empty space, elements that do not
/// draw a node, and nodes that are no longer live in `tree`.
pub fn hit_test<S, P>(surface: &S, tree: &Tree<P>, point: Point) -> Option<NodeId>
where
    S: RenderSurface + ?Sized,
{
    if !point.is_finite() {
        return None;
    }
    let element = surface.element_from_point(point)?;
    let node = surface.node_of(element)?;
    tree.is_alive(node).then_some(node)
}

/// Surface-space bounds of the element drawing `node`.
pub fn node_bounds<S>(surface: &S, node: NodeId) -> Option<Rect>
where
    S: RenderSurface + ?Sized,
{
    surface
        .element_of(node)
        .and_then(|element| surface.element_bounds(element))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A surface that claims every point belongs to one fixed element.
    struct Everywhere {
        node: Option<NodeId>,
    }

    impl RenderSurface for Everywhere {
        type Element = u8;

        fn element_from_point(&self, _point: Point) -> Option<u8> {
            Some(7)
        }

        fn node_of(&self, _element: u8) -> Option<NodeId> {
            self.node
        }

        fn element_of(&self, node: NodeId) -> Option<u8> {
            (Some(node) == self.node).then_some(7)
        }

        fn element_bounds(&self, _element: u8) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, 10.0, 10.0))
        }
    }

    #[test]
    fn element_without_node_is_no_target() {
        let tree = Tree::new(());
        let surface = Everywhere { node: None };
        assert_eq!(hit_test(&surface, &tree, Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn stale_node_is_no_target() {
        let mut tree = Tree::new(());
        let gone = tree.insert(tree.root(), ()).unwrap();
        tree.remove(gone);
        let surface = Everywhere { node: Some(gone) };
        assert_eq!(hit_test(&surface, &tree, Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn non_finite_points_never_reach_the_surface() {
        let tree = Tree::new(());
        let surface = Everywhere {
            node: Some(tree.root()),
        };
        assert_eq!(
            hit_test(&surface, &tree, Point::new(f64::INFINITY, 0.0)),
            None
        );
        assert_eq!(hit_test(&surface, &tree, Point::new(0.0, f64::NAN)), None);
        assert_eq!(
            hit_test(&surface, &tree, Point::new(3.0, 3.0)),
            Some(tree.root())
        );
    }

    #[test]
    fn node_bounds_goes_through_element() {
        let tree = Tree::new(());
        let surface = Everywhere {
            node: Some(tree.root()),
        };
        assert_eq!(
            node_bounds(&surface, tree.root()),
            Some(Rect::new(0.0, 0.0, 10.0, 10.0))
        );
    }
}
