// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Union-area scoring.
//!
//! Overlapping fields must not be counted twice, so the score of a set of
//! fields is the area of their union. [`UnionArea`] accumulates triangles and
//! measures the covered region with a vertical slab sweep:
//!
//! - slab boundaries are placed at every vertex `x` and at every `x` where two
//!   edges cross;
//! - inside a slab no edges cross and no vertex lies, so every triangle cuts
//!   the slab in a trapezoid and the covered length along a vertical line is
//!   linear in `x`;
//! - the covered length on the slab's midline times the slab width is
//!   therefore the exact covered area of the slab.
//!
//! The sweep is cubic in the number of triangles, which is fine for the tens
//! of fields a world holds.

use alloc::vec::Vec;

use kurbo::Line;

use crate::predicates::crossing_x;
use crate::triangle::TriangleField;
use crate::types::TeamId;

/// Slab boundaries closer than this are merged.
const SLAB_EPSILON: f64 = 1e-9;

/// An incrementally built union of triangles.
///
/// ```
/// use territory_field::{Position, TriangleField, UnionArea};
///
/// let p = Position::new;
/// let mut union = UnionArea::new();
/// union.add(&TriangleField::new(p(50, 50), p(60, 50), p(60, 60), None));
/// union.add(&TriangleField::new(p(50, 50), p(50, 60), p(60, 50), None));
/// assert!((union.area() - 75.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnionArea {
    pieces: Vec<Piece>,
}

#[derive(Clone, Copy, Debug)]
struct Piece {
    edges: [Line; 3],
    min_x: f64,
    max_x: f64,
}

impl Piece {
    /// The covered `z` interval where the vertical line at `x` cuts this
    /// triangle. `x` must not be a vertex `x`.
    fn span_at(&self, x: f64) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for edge in &self.edges {
            let (x0, x1) = (edge.p0.x, edge.p1.x);
            if x0.min(x1) < x && x < x0.max(x1) {
                let z = edge.p0.y + (x - x0) * (edge.p1.y - edge.p0.y) / (x1 - x0);
                lo = lo.min(z);
                hi = hi.max(z);
            }
        }
        (hi > lo).then_some((lo, hi))
    }
}

impl UnionArea {
    /// An empty union.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a field's triangle into the union. Degenerate fields cover no
    /// area and are skipped.
    pub fn add(&mut self, field: &TriangleField) {
        if field.is_degenerate() {
            return;
        }
        let bounds = field.bounds();
        self.pieces.push(Piece {
            edges: *field.edges(),
            min_x: bounds.x0,
            max_x: bounds.x1,
        });
    }

    /// Number of non-degenerate triangles merged so far.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether nothing with area has been merged.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Area of the union, counting every covered point once.
    pub fn area(&self) -> f64 {
        if self.pieces.is_empty() {
            return 0.0;
        }
        let events = self.slab_boundaries();
        let mut spans: Vec<(f64, f64)> = Vec::with_capacity(self.pieces.len());
        let mut total = 0.0;
        for pair in events.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let mid = 0.5 * (left + right);
            spans.clear();
            spans.extend(
                self.pieces
                    .iter()
                    .filter(|p| p.min_x < mid && mid < p.max_x)
                    .filter_map(|p| p.span_at(mid)),
            );
            total += covered_length(&mut spans) * (right - left);
        }
        total
    }

    fn slab_boundaries(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .pieces
            .iter()
            .flat_map(|p| p.edges.iter().map(|e| e.p0.x))
            .collect();
        let edges: Vec<(&Line, f64, f64)> = self
            .pieces
            .iter()
            .flat_map(|p| p.edges.iter())
            .filter(|e| e.p0.x != e.p1.x)
            .map(|e| (e, e.p0.x.min(e.p1.x), e.p0.x.max(e.p1.x)))
            .collect();
        for (i, &(a, a_min, a_max)) in edges.iter().enumerate() {
            for &(b, b_min, b_max) in &edges[i + 1..] {
                if a_max <= b_min || b_max <= a_min {
                    continue;
                }
                if let Some(x) = crossing_x(*a, *b) {
                    xs.push(x);
                }
            }
        }
        xs.sort_by(f64::total_cmp);
        xs.dedup_by(|later, earlier| *later - *earlier <= SLAB_EPSILON);
        xs
    }
}

impl<'a> Extend<&'a TriangleField> for UnionArea {
    fn extend<I: IntoIterator<Item = &'a TriangleField>>(&mut self, iter: I) {
        for field in iter {
            self.add(field);
        }
    }
}

impl<'a> FromIterator<&'a TriangleField> for UnionArea {
    fn from_iter<I: IntoIterator<Item = &'a TriangleField>>(iter: I) -> Self {
        let mut union = Self::new();
        union.extend(iter);
        union
    }
}

/// Length covered by a set of intervals; sorts `spans` in place.
fn covered_length(spans: &mut [(f64, f64)]) -> f64 {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut total = 0.0;
    let mut current: Option<(f64, f64)> = None;
    for &(lo, hi) in spans.iter() {
        current = match current {
            Some((c_lo, c_hi)) if lo <= c_hi => Some((c_lo, c_hi.max(hi))),
            Some((c_lo, c_hi)) => {
                total += c_hi - c_lo;
                Some((lo, hi))
            }
            None => Some((lo, hi)),
        };
    }
    if let Some((c_lo, c_hi)) = current {
        total += c_hi - c_lo;
    }
    total
}

/// Deduplicated area covered by all `fields`, whoever owns them.
pub fn total_area<'a, I>(fields: I) -> f64
where
    I: IntoIterator<Item = &'a TriangleField>,
{
    fields.into_iter().collect::<UnionArea>().area()
}

/// Deduplicated area covered by the fields `team` owns.
///
/// Unowned fields count toward no team.
pub fn score_for_team<'a, I>(fields: I, team: TeamId) -> f64
where
    I: IntoIterator<Item = &'a TriangleField>,
{
    fields
        .into_iter()
        .filter(|f| f.owner() == Some(team))
        .collect::<UnionArea>()
        .area()
}

/// Whole blocks in an area, truncated toward zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Truncation toward zero is the scoring rule; negative inputs saturate to zero."
)]
pub fn blocks(area: f64) -> u64 {
    area as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    const EPSILON: f64 = 1e-6;

    fn tri(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> TriangleField {
        TriangleField::new(a.into(), b.into(), c.into(), None)
    }

    fn owned(a: (i32, i32), b: (i32, i32), c: (i32, i32), team: u16) -> TriangleField {
        TriangleField::new(a.into(), b.into(), c.into(), Some(TeamId::new(team)))
    }

    fn assert_area(fields: &[TriangleField], expected: f64) {
        let got = total_area(fields);
        assert!(
            (got - expected).abs() < EPSILON,
            "expected union area {expected}, got {got}"
        );
    }

    #[test]
    fn empty_union_has_no_area() {
        assert_area(&[], 0.0);
        assert!(UnionArea::new().is_empty());
    }

    #[test]
    fn single_triangle() {
        assert_area(&[tri((0, 0), (10, 0), (0, 10))], 50.0);
    }

    #[test]
    fn disjoint_triangles_sum() {
        assert_area(
            &[tri((0, 0), (10, 0), (0, 10)), tri((20, 0), (30, 0), (30, 10))],
            100.0,
        );
    }

    #[test]
    fn crossing_diagonal_halves_share_a_quarter() {
        assert_area(
            &[
                tri((50, 50), (60, 50), (60, 60)),
                tri((50, 50), (50, 60), (60, 50)),
            ],
            75.0,
        );
    }

    #[test]
    fn shared_edge_or_vertex_adds_no_overlap() {
        // Two halves of a square meeting along the diagonal.
        assert_area(
            &[tri((0, 0), (10, 0), (0, 10)), tri((10, 0), (0, 10), (10, 10))],
            100.0,
        );
        // Touching at a single corner.
        assert_area(
            &[tri((0, 0), (10, 0), (0, 10)), tri((10, 0), (20, 0), (20, 10))],
            100.0,
        );
    }

    #[test]
    fn nested_triangle_adds_nothing() {
        assert_area(
            &[
                tri((0, 0), (100, 0), (0, 100)),
                tri((10, 10), (20, 10), (10, 20)),
            ],
            5000.0,
        );
    }

    #[test]
    fn repeated_triangles_count_once() {
        let t = tri((0, 0), (10, 0), (0, 10));
        let flipped = tri((0, 10), (10, 0), (0, 0));
        assert_area(&[t, t, flipped], 50.0);
    }

    #[test]
    fn triple_overlap_star() {
        // Square 0..12 split three ways plus a triangle across the middle.
        // The first two tile the square (144); the third is inside it.
        assert_area(
            &[
                tri((0, 0), (12, 0), (12, 12)),
                tri((0, 0), (0, 12), (12, 12)),
                tri((2, 2), (10, 2), (6, 10)),
            ],
            144.0,
        );
        // Two overlapping wedges and a third crossing both: 0..10 square
        // covered by the two halves plus a cap sticking out above it.
        assert_area(
            &[
                tri((0, 0), (10, 0), (10, 10)),
                tri((0, 0), (0, 10), (10, 10)),
                tri((0, 5), (10, 5), (5, 15)),
            ],
            100.0 + 12.5,
        );
    }

    #[test]
    fn degenerate_fields_are_ignored() {
        let mut union = UnionArea::new();
        union.add(&tri((0, 0), (5, 5), (10, 10)));
        assert!(union.is_empty());
        assert_eq!(union.len(), 0);
        assert!(union.area().abs() < EPSILON);
    }

    #[test]
    fn incremental_matches_batch() {
        let fields = vec![
            tri((0, 0), (40, 0), (10, 30)),
            tri((5, -10), (35, 25), (-5, 20)),
            tri((20, -5), (50, 10), (15, 15)),
        ];
        let mut union = UnionArea::new();
        let mut areas = Vec::new();
        for f in &fields {
            union.add(f);
            areas.push(union.area());
        }
        assert!((areas[2] - total_area(&fields)).abs() < EPSILON);
        // A union never shrinks and never exceeds the plain sum.
        assert!(areas.windows(2).all(|w| w[1] + EPSILON >= w[0]));
        let sum: f64 = fields.iter().map(TriangleField::area).sum();
        assert!(areas[2] <= sum + EPSILON);
    }

    #[test]
    fn team_scores_are_separate() {
        let fields = [
            owned((0, 0), (10, 0), (0, 10), 0),
            owned((20, 0), (30, 0), (30, 10), 0),
            owned((100, 100), (110, 100), (100, 110), 1),
            tri((-50, -50), (-40, -50), (-50, -40)),
        ];
        assert!((score_for_team(&fields, TeamId::new(0)) - 100.0).abs() < EPSILON);
        assert!((score_for_team(&fields, TeamId::new(1)) - 50.0).abs() < EPSILON);
        assert!(score_for_team(&fields, TeamId::new(2)).abs() < EPSILON);
        assert!((total_area(&fields) - 200.0).abs() < EPSILON);
    }

    #[test]
    fn blocks_truncate_toward_zero() {
        assert_eq!(blocks(74.999), 74);
        assert_eq!(blocks(75.0), 75);
        assert_eq!(blocks(-3.5), 0);
    }

    #[test]
    fn covered_length_merges_touching_spans() {
        let mut spans = [(5.0, 7.0), (0.0, 2.0), (2.0, 4.0), (6.0, 9.0)];
        assert!((covered_length(&mut spans) - 8.0).abs() < EPSILON);
    }
}
