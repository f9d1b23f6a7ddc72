//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
use arrayvec::ArrayVec;
use cgmath::{vec2, Vector2};

/// The maximum number of input points accepted by `convex_hull`.
pub const MAX_HULL_POINTS: usize = 8;

pub type Hull = ArrayVec<Vector2<f32>, MAX_HULL_POINTS>;

/// `cross(b - a, c - a)`. Positive iff `a`, `b`, `c` are counter-clockwise.
#[inline]
fn cross(a: Vector2<f32>, b: Vector2<f32>, c: Vector2<f32>) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Compute the convex hull of a set of points using Andrew's monotone chain
/// algorithm. The output is in counter-clockwise order and does not contain
/// collinear points.
///
/// Returns `None` if the hull is degenerate (has no area).
pub fn convex_hull(points: &[Vector2<f32>]) -> Option<Hull> {
    assert!(points.len() <= MAX_HULL_POINTS);

    let mut sorted: ArrayVec<Vector2<f32>, MAX_HULL_POINTS> = points.iter().cloned().collect();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });

    // The chain can temporarily hold every point twice
    let mut chain: ArrayVec<Vector2<f32>, { MAX_HULL_POINTS * 2 }> = ArrayVec::new();

    // Lower hull
    for &p in sorted.iter() {
        while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
            chain.pop();
        }
        chain.push(p);
    }

    // Upper hull
    let lower_len = chain.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while chain.len() >= lower_len
            && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0
        {
            chain.pop();
        }
        chain.push(p);
    }

    // The last point is the same as the first one
    chain.pop();

    if chain.len() < 3 {
        return None;
    }

    Some(chain.into_iter().collect())
}

/// Check if `p` is inside (or on the boundary of) a counter-clockwise convex
/// polygon.
pub fn convex_contains(hull: &[Vector2<f32>], p: Vector2<f32>) -> bool {
    let n = hull.len();
    (0..n).all(|i| cross(hull[i], hull[(i + 1) % n], p) >= 0.0)
}

/// Find an axis-aligned rectangle inside a convex polygon by shrinking the
/// polygon's bounding rectangle towards its center until all four corners
/// are inside.
///
/// Returns `[min, max]`, or `None` if no attempt succeeded.
pub fn inscribed_rect(hull: &[Vector2<f32>], steps: u32) -> Option<[Vector2<f32>; 2]> {
    let mut min = hull[0];
    let mut max = hull[0];
    for p in &hull[1..] {
        min = vec2(min.x.min(p.x), min.y.min(p.y));
        max = vec2(max.x.max(p.x), max.y.max(p.y));
    }

    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;

    for i in 1..=steps {
        let scale = 1.0 - i as f32 / (steps + 1) as f32;
        let h = half * scale;
        let corners = [
            vec2(center.x - h.x, center.y - h.y),
            vec2(center.x + h.x, center.y - h.y),
            vec2(center.x + h.x, center.y + h.y),
            vec2(center.x - h.x, center.y + h.y),
        ];
        if corners.iter().all(|&c| convex_contains(hull, c)) {
            return Some([corners[0], corners[2]]);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convex_hull_of_square_with_interior_points() {
        let points = [
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(2.0, 0.0),
            vec2(0.5, 1.5),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
            vec2(1.0, 0.0),
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 4, "{:?}", hull);
        assert!(convex_contains(&hull, vec2(1.0, 1.0)));
        assert!(convex_contains(&hull, vec2(2.0, 2.0)));
        assert!(!convex_contains(&hull, vec2(2.1, 1.0)));
    }

    #[test]
    fn convex_hull_degenerate() {
        assert!(convex_hull(&[vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(2.0, 2.0)]).is_none());
        assert!(convex_hull(&[vec2(1.0, 1.0); 8]).is_none());
    }

    #[test]
    fn inscribed_rect_of_diamond() {
        let hull =
            convex_hull(&[vec2(0.0, -1.0), vec2(1.0, 0.0), vec2(0.0, 1.0), vec2(-1.0, 0.0)])
                .unwrap();
        let [min, max] = inscribed_rect(&hull, 8).unwrap();
        for &c in &[min, max, vec2(min.x, max.y), vec2(max.x, min.y)] {
            assert!(convex_contains(&hull, c), "{:?}", c);
        }
        assert!(max.x - min.x > 0.5);
    }
}
