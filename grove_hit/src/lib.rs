// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Hit: map a screen coordinate to the tree node drawn there.
//!
//! Hit testing is split in two steps, mirroring how a rendering surface is
//! usually queried:
//!
//! 1. Ask the host's [`RenderSurface`] which rendered element occupies the point.
//! 2. Map that element back to a [`NodeId`] and confirm the node is still
//!    live in the [`Tree`](grove_tree::Tree).
//!
//! [`hit_test`] performs both steps. It never fails: non-finite points, empty
//! space, elements without a node, and nodes that went stale (for example after
//! a history restore dropped them) all come back as `None`.
//!
//! ```rust
//! use grove_hit::{SpatialSurface, hit_test};
//! use grove_tree::Tree;
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new("root");
//! let idea = tree.insert(tree.root(), "idea").unwrap();
//!
//! let mut surface = SpatialSurface::new();
//! surface.insert(tree.root(), Rect::new(0.0, 0.0, 80.0, 30.0), 0);
//! surface.insert(idea, Rect::new(120.0, 0.0, 200.0, 30.0), 0);
//!
//! assert_eq!(hit_test(&surface, &tree, Point::new(150.0, 10.0)), Some(idea));
//! assert_eq!(hit_test(&surface, &tree, Point::new(100.0, 10.0)), None);
//! assert_eq!(hit_test(&surface, &tree, Point::new(f64::NAN, 0.0)), None);
//! ```
//!
//! [`SpatialSurface`] is a small reference surface (rectangles with z-order)
//! used by tests and demos. Hosts with their own renderer implement
//! [`RenderSurface`] directly.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod spatial;
mod surface;

pub use grove_tree::NodeId;
pub use spatial::{ElementFlags, ElementId, SpatialSurface};
pub use surface::{RenderSurface, hit_test, node_bounds};
