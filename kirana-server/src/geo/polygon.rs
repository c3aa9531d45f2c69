//! Ray casting point-in-polygon test.

/// Tests whether `(x, y)` lies inside the polygon described by `ring`.
///
/// Casts a horizontal ray towards +X and toggles on every crossed edge.
/// Edges are treated as half-open vertical intervals `(min_y, max_y]`,
/// so a vertex shared by two edges is counted exactly once. Horizontal
/// edges never toggle. The boundary is deterministic but not symmetric:
/// with counter-clockwise rings the right/top edges test inside while
/// the left/bottom edges test outside.
///
/// Rings with fewer than 3 vertices reject every point. Open and closed
/// rings are equivalent: a closing vertex equal to the first forms a
/// degenerate edge that never crosses.
pub fn point_in_ring(x: f64, y: f64, ring: &[[f64; 2]]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let [mut p1x, mut p1y] = ring[0];

    for i in 1..=n {
        let [p2x, p2y] = ring[i % n];

        if y > p1y.min(p2y) && y <= p1y.max(p2y) && x <= p1x.max(p2x) && p1y != p2y {
            let x_intersection = (y - p1y) * (p2x - p1x) / (p2y - p1y) + p1x;
            if p1x == p2x || x <= x_intersection {
                inside = !inside;
            }
        }

        (p1x, p1y) = (p2x, p2y);
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    }

    #[test]
    fn point_inside_square() {
        assert!(point_in_ring(5.0, 5.0, &square()));
    }

    #[test]
    fn point_outside_square() {
        assert!(!point_in_ring(15.0, 5.0, &square()));
        assert!(!point_in_ring(-1.0, 5.0, &square()));
        assert!(!point_in_ring(5.0, 11.0, &square()));
    }

    #[test]
    fn degenerate_rings_reject_everything() {
        assert!(!point_in_ring(0.0, 0.0, &[]));
        assert!(!point_in_ring(0.0, 0.0, &[[0.0, 0.0]]));
        assert!(!point_in_ring(0.5, 0.5, &[[0.0, 0.0], [1.0, 1.0]]));
    }

    #[test]
    fn boundary_is_deterministic_but_asymmetric() {
        let ring = square();
        // right and top edges test inside, left and bottom outside
        assert!(point_in_ring(10.0, 5.0, &ring));
        assert!(point_in_ring(5.0, 10.0, &ring));
        assert!(!point_in_ring(0.0, 5.0, &ring));
        assert!(!point_in_ring(5.0, 0.0, &ring));
    }

    #[test]
    fn open_and_closed_rings_agree() {
        let open = square();
        let mut closed = square();
        closed.push(closed[0]);

        for point in [[5.0, 5.0], [15.0, 5.0], [10.0, 5.0], [0.0, 5.0]] {
            assert_eq!(
                point_in_ring(point[0], point[1], &open),
                point_in_ring(point[0], point[1], &closed),
            );
        }
    }

    #[test]
    fn concave_notch_is_outside() {
        let u_shape = vec![
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [6.0, 10.0],
            [6.0, 4.0],
            [4.0, 4.0],
            [4.0, 10.0],
            [0.0, 10.0],
        ];

        assert!(point_in_ring(2.0, 8.0, &u_shape), "left arm");
        assert!(point_in_ring(5.0, 2.0, &u_shape), "base");
        assert!(!point_in_ring(5.0, 8.0, &u_shape), "notch");
    }

    #[test]
    fn real_world_ring_in_geojson_order() {
        // North Bangalore quadrilateral, vertices as [lng, lat]
        let ring = vec![
            [77.5951, 13.1056],
            [77.5849, 13.0993],
            [77.6007, 13.0897],
            [77.6094, 13.1040],
        ];

        assert!(point_in_ring(77.5975, 13.0997, &ring));
        assert!(point_in_ring(77.5900, 13.1000, &ring));
        assert!(!point_in_ring(77.0, 12.0, &ring));
        // inside the bounding box but outside the quadrilateral
        assert!(!point_in_ring(77.5849, 13.1056, &ring));
    }
}
