//! Property-based tests for box intersection and the broad phase.
//!
//! Run with: cargo test -p dental-collision -- proptest

use dental_collision::{Obb, detect_all_collisions, separation_distance, test_intersection};
use dental_types::{Aabb, Point3, RigidTransform, UnitQuaternion, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_half_extents() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(0.5..5.0f64).prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

fn arb_center() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-50.0..50.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn arb_rotated_box() -> impl Strategy<Value = Obb> {
    (
        arb_center(),
        arb_half_extents(),
        prop::array::uniform3(-3.2..3.2f64),
    )
        .prop_map(|(center, half, [roll, pitch, yaw])| {
            let pose = RigidTransform::new(
                UnitQuaternion::from_euler_angles(roll, pitch, yaw),
                center.coords,
            );
            Obb::from_bounds(&Aabb::from_half_extents(half), &pose, &Vector3::repeat(1.0))
        })
}

fn cardinal(axis: usize) -> Vector3<f64> {
    match axis {
        0 => Vector3::x(),
        1 => Vector3::y(),
        _ => Vector3::z(),
    }
}

// =============================================================================
// Property Tests: Narrow Phase
// =============================================================================

proptest! {
    /// Boxes separated along a cardinal axis by a positive gap never collide.
    #[test]
    fn separated_boxes_never_collide(
        center in arb_center(),
        half_a in arb_half_extents(),
        half_b in arb_half_extents(),
        axis in 0usize..3,
        gap in 0.01..10.0f64,
        flip in any::<bool>(),
    ) {
        let dir = if flip { -cardinal(axis) } else { cardinal(axis) };
        let offset = half_a[axis] + half_b[axis] + gap;
        let a = Obb::axis_aligned(center, half_a);
        let b = Obb::axis_aligned(center + dir * offset, half_b);

        let result = test_intersection(&a, &b);
        prop_assert!(!result.is_colliding);
        prop_assert_eq!(result.correction, Vector3::zeros());
        prop_assert!((separation_distance(&a, &b) - gap).abs() < 1e-9);
    }

    /// A known overlap along a cardinal axis is reported with that depth, and
    /// the correction pushes the first box away from the second.
    #[test]
    fn known_overlap_reports_depth(
        center in arb_center(),
        half_a in arb_half_extents(),
        half_b in arb_half_extents(),
        axis in 0usize..3,
        depth in 0.01..0.9f64,
        flip in any::<bool>(),
    ) {
        let dir = if flip { -cardinal(axis) } else { cardinal(axis) };
        let offset = half_a[axis] + half_b[axis] - depth;
        let a = Obb::axis_aligned(center, half_a);
        let b = Obb::axis_aligned(center + dir * offset, half_b);

        let result = test_intersection(&a, &b);
        prop_assert!(result.is_colliding);
        prop_assert!((result.penetration_depth - depth).abs() < 1e-9);

        let before = (a.center - b.center).norm();
        let after = (a.center + result.correction - b.center).norm();
        prop_assert!(after > before);
    }

    /// The test is symmetric in its arguments.
    #[test]
    fn intersection_is_symmetric(a in arb_rotated_box(), b in arb_rotated_box()) {
        let ab = test_intersection(&a, &b);
        let ba = test_intersection(&b, &a);
        prop_assert_eq!(ab.is_colliding, ba.is_colliding);
        prop_assert!((ab.penetration_depth - ba.penetration_depth).abs() < 1e-9);
        prop_assert!(ab.penetration_depth >= 0.0);
        prop_assert!(ab.penetration_depth.is_finite());
    }
}

// =============================================================================
// Property Tests: Broad Phase
// =============================================================================

fn grid(count: usize) -> Vec<Obb> {
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let (col, row) = ((i % 6) as f64, (i / 6) as f64);
            Obb::axis_aligned(Point3::new(col * 3.0, row * 3.0, 0.0), Vector3::repeat(1.0))
        })
        .collect()
}

proptest! {
    /// A grid of separated boxes produces no collisions.
    #[test]
    fn separated_grid_is_clean(count in 1usize..60) {
        prop_assert!(detect_all_collisions(&grid(count)).is_empty());
    }

    /// Adding one box that overlaps a single grid member yields exactly that pair.
    #[test]
    fn single_overlap_is_found(count in 1usize..60, pick in any::<prop::sample::Index>()) {
        let mut boxes = grid(count);
        let target = pick.index(count);
        let intruder = Obb::axis_aligned(boxes[target].center + Vector3::new(0.0, 0.0, 1.5), Vector3::repeat(1.0));
        boxes.push(intruder);

        let pairs = detect_all_collisions(&boxes);
        prop_assert_eq!(pairs.len(), 1);
        prop_assert_eq!((pairs[0].first, pairs[0].second), (target, count));
    }
}
