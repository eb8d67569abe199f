// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle fields.

use core::hash::{Hash, Hasher};

use kurbo::{Line, Rect};

use crate::predicates::orient;
use crate::types::{Position, TeamId};

/// A triangular field of controlled territory.
///
/// Two fields are equal when they have the same three vertices, in any order
/// and orientation. The owner takes no part in equality or hashing, so a
/// field can be looked up in a set regardless of who holds it.
///
/// Area, edges and bounds are computed once at construction.
#[derive(Clone, Copy, Debug)]
pub struct TriangleField {
    vertices: [Position; 3],
    owner: Option<TeamId>,
    area: f64,
    edges: [Line; 3],
    bounds: Rect,
}

impl TriangleField {
    /// Build a field from its three corner beacons' positions.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Doubled areas of in-world triangles are far below 2^53."
    )]
    pub fn new(a: Position, b: Position, c: Position, owner: Option<TeamId>) -> Self {
        let doubled = orient(a, b, c).unsigned_abs();
        let (pa, pb, pc) = (a.to_point(), b.to_point(), c.to_point());
        Self {
            vertices: [a, b, c],
            owner,
            area: doubled as f64 / 2.0,
            edges: [Line::new(pa, pb), Line::new(pb, pc), Line::new(pc, pa)],
            bounds: Rect::from_points(pa, pb).union_pt(pc),
        }
    }

    /// The vertices in construction order.
    pub fn vertices(&self) -> [Position; 3] {
        self.vertices
    }

    /// The vertices in ascending order; the canonical form used for equality.
    pub fn sorted_vertices(&self) -> [Position; 3] {
        let mut v = self.vertices;
        v.sort_unstable();
        v
    }

    /// The owning team, if any.
    pub fn owner(&self) -> Option<TeamId> {
        self.owner
    }

    /// Hand the field to another team.
    pub fn set_owner(&mut self, owner: Option<TeamId>) {
        self.owner = owner;
    }

    /// Unsigned area in square blocks.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// The three edges `a–b`, `b–c`, `c–a`.
    pub fn edges(&self) -> &[Line; 3] {
        &self.edges
    }

    /// Axis-aligned bounds (kurbo `y` is the world `z`).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether all three vertices are collinear.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.vertices;
        orient(a, b, c) == 0
    }

    /// Whether `p` is one of the vertices.
    pub fn has_vertex(&self, p: Position) -> bool {
        self.vertices.contains(&p)
    }

    /// Whether `p–q` is one of the edges (in either direction).
    pub fn has_edge(&self, p: Position, q: Position) -> bool {
        p != q && self.has_vertex(p) && self.has_vertex(q)
    }

    /// Whether `p` lies inside the closed triangle; boundary points count.
    pub fn contains(&self, p: Position) -> bool {
        let pt = p.to_point();
        if pt.x < self.bounds.x0
            || pt.x > self.bounds.x1
            || pt.y < self.bounds.y0
            || pt.y > self.bounds.y1
        {
            return false;
        }
        let [a, b, c] = self.vertices;
        let d1 = orient(a, b, p);
        let d2 = orient(b, c, p);
        let d3 = orient(c, a, p);
        let has_neg = d1 < 0 || d2 < 0 || d3 < 0;
        let has_pos = d1 > 0 || d2 > 0 || d3 > 0;
        !(has_neg && has_pos)
    }
}

impl PartialEq for TriangleField {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_vertices() == other.sorted_vertices()
    }
}

impl Eq for TriangleField {}

impl Hash for TriangleField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_vertices().hash(state);
    }
}
