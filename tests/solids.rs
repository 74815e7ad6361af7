//! Host-side tests for the solid geometry tables and animation rules.

use approx::assert_abs_diff_eq;
use glam::Vec3;
use solids_wasm::solids::Solid;

const STEP_MS: f32 = 16.7;

fn vertex_count(solid: &Solid) -> usize {
    solid.vertices().len() / 3
}

/// Every vertex must carry the color of the face it was generated from,
/// with faces consuming `counts[f]` consecutive vertices.
fn check_vertex_colors(solid: &Solid, counts: &[usize]) {
    assert_eq!(solid.vertex_colors().len() / 4, vertex_count(solid));
    let mut v = 0;
    for (face, &n) in counts.iter().enumerate() {
        for _ in 0..n {
            let color = &solid.vertex_colors()[v * 4..v * 4 + 4];
            assert_eq!(
                color,
                &solid.face_colors()[face],
                "vertex {v} should carry the color of face {face}"
            );
            v += 1;
        }
    }
    assert_eq!(v, vertex_count(solid), "face counts must cover all vertices");
}

fn check_indices(solid: &Solid) {
    assert_eq!(solid.indices().len() % 3, 0);
    let n = vertex_count(solid);
    for &i in solid.indices() {
        assert!((i as usize) < n, "index {i} out of range for {n} vertices");
    }
}

#[test]
fn pyramid_tables() {
    let p = Solid::pyramid(Vec3::ZERO, Vec3::Y);
    assert_eq!(vertex_count(&p), 20);
    assert_eq!(p.face_colors().len(), 6);
    assert_eq!(p.indices().len(), 24);
    assert_eq!(p.index_count(), 24);
    check_indices(&p);
    // Base pentagon first (5 vertices), then 5 triangular sides.
    check_vertex_colors(&p, &[5, 3, 3, 3, 3, 3]);
}

#[test]
fn pyramid_base_fan() {
    let p = Solid::pyramid(Vec3::ZERO, Vec3::Y);
    assert_eq!(&p.indices()[..9], &[0, 1, 4, 4, 1, 2, 4, 2, 3]);
}

#[test]
fn dodecahedron_tables() {
    let d = Solid::dodecahedron(Vec3::ZERO, [Vec3::X, Vec3::Y]);
    assert_eq!(vertex_count(&d), 60);
    assert_eq!(d.face_colors().len(), 12);
    assert_eq!(d.indices().len(), 108);
    check_indices(&d);
    check_vertex_colors(&d, &[5; 12]);
}

#[test]
fn dodecahedron_face_triangulation() {
    // Face f (vertices 5f..5f+4) splits into the local triangles
    // {0,1,2},{1,2,3},{2,3,4}, and nothing else.
    let d = Solid::dodecahedron(Vec3::ZERO, [Vec3::X, Vec3::Y]);
    for f in 0..12u16 {
        let b = 5 * f;
        let expected = [b, b + 1, b + 2, b + 1, b + 2, b + 3, b + 2, b + 3, b + 4];
        let face = f as usize;
        assert_eq!(
            &d.indices()[face * 9..face * 9 + 9],
            &expected,
            "triangulation of face {face}"
        );
    }
}

#[test]
fn octahedron_tables() {
    let o = Solid::octahedron(Vec3::ZERO, Vec3::Y);
    assert_eq!(vertex_count(&o), 24);
    assert_eq!(o.face_colors().len(), 8);
    assert_eq!(o.indices().len(), 24);
    check_indices(&o);
    check_vertex_colors(&o, &[3; 8]);
    // 1:1 face-to-triangle mapping.
    let expected: Vec<u16> = (0..24).collect();
    assert_eq!(o.indices(), &expected[..]);
}

#[test]
fn spawn_translation_applied_once() {
    let p = Solid::pyramid(Vec3::new(2.0, -2.5, -16.0), Vec3::Y);
    let t = p.transform();
    assert_eq!(t.w_axis.x, 2.0);
    assert_eq!(t.w_axis.y, -2.5);
    assert_eq!(t.w_axis.z, -16.0);
    // Rotation part still identity.
    assert_eq!(t.x_axis.x, 1.0);
    assert_eq!(t.y_axis.y, 1.0);
    assert_eq!(t.z_axis.z, 1.0);
}

#[test]
fn pyramid_full_turn_is_identity() {
    // 5000 ms of elapsed time is exactly one 2π revolution.
    let mut p = Solid::pyramid(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
    let before = p.transform().to_cols_array();
    p.advance(5000.0);
    let after = p.transform().to_cols_array();
    for (a, b) in before.iter().zip(after.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
    }
}

#[test]
fn pyramid_half_turn_is_not_identity() {
    let mut p = Solid::pyramid(Vec3::ZERO, Vec3::Y);
    p.advance(2500.0);
    // A half revolution about Y flips the X basis vector.
    assert_abs_diff_eq!(p.transform().x_axis.x, -1.0, epsilon = 1e-3);
}

#[test]
fn rotation_axis_is_normalized() {
    let mut unit = Solid::pyramid(Vec3::ZERO, Vec3::Y);
    let mut scaled = Solid::pyramid(Vec3::ZERO, Vec3::new(0.0, 7.0, 0.0));
    unit.advance(1250.0);
    scaled.advance(1250.0);
    let a = unit.transform().to_cols_array();
    let b = scaled.transform().to_cols_array();
    for (x, y) in a.iter().zip(b.iter()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-5);
    }
}

#[test]
fn octahedron_full_turn_keeps_rotation() {
    let mut o = Solid::octahedron(Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 1.0, 0.0));
    let before = o.transform();
    o.advance(5000.0);
    let after = o.transform();
    // Rotational component returns to where it started; only the bounce has
    // moved the Y translation by one step.
    for (a, b) in before
        .to_cols_array()
        .iter()
        .take(12)
        .zip(after.to_cols_array().iter().take(12))
    {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
    }
    assert_abs_diff_eq!(after.w_axis.y, before.w_axis.y + 0.05, epsilon = 1e-5);
}

#[test]
fn octahedron_bounce_cycle() {
    let mut o = Solid::octahedron(Vec3::ZERO, Vec3::Y);
    let y = |o: &Solid| o.transform().w_axis.y;

    // First call nudges up one step, second flips the flag and starts down.
    o.advance(STEP_MS);
    assert_abs_diff_eq!(y(&o), 0.05, epsilon = 1e-4);
    o.advance(STEP_MS);
    assert_abs_diff_eq!(y(&o), 0.0, epsilon = 1e-4);

    // Monotonic descent to the floor.
    let mut prev = y(&o);
    for _ in 0..160 {
        o.advance(STEP_MS);
        let cur = y(&o);
        assert!(cur < prev, "descent must be monotonic ({cur} vs {prev})");
        prev = cur;
    }
    assert_abs_diff_eq!(y(&o), -8.0, epsilon = 1e-3);

    // One step past the floor, then a flag-flip call that does not move.
    o.advance(STEP_MS);
    assert_abs_diff_eq!(y(&o), -8.05, epsilon = 1e-3);
    let parked = y(&o);
    o.advance(STEP_MS);
    assert_abs_diff_eq!(y(&o), parked, epsilon = 1e-6);

    // Monotonic ascent back to the top.
    prev = y(&o);
    for _ in 0..161 {
        o.advance(STEP_MS);
        let cur = y(&o);
        assert!(cur > prev, "ascent must be monotonic ({cur} vs {prev})");
        prev = cur;
    }
    assert_abs_diff_eq!(y(&o), 0.0, epsilon = 1e-2);

    // Never outside [-8, 0] by more than one step.
    let mut o = Solid::octahedron(Vec3::ZERO, Vec3::Y);
    for _ in 0..1000 {
        o.advance(STEP_MS);
        let cur = y(&o);
        assert!((-8.051..=0.051).contains(&cur), "y out of bounds: {cur}");
    }
}

#[test]
fn first_tick_advances_by_zero() {
    let mut p = Solid::pyramid(Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
    let before = p.transform().to_cols_array();
    p.tick(123456.0);
    assert_eq!(before, p.transform().to_cols_array());
    // The next tick rotates by the delta.
    p.tick(123456.0 + 2500.0);
    assert_abs_diff_eq!(p.transform().x_axis.x, -1.0, epsilon = 1e-3);
}

#[test]
fn hundred_cycles_stay_finite() {
    let mut solids = vec![
        Solid::pyramid(Vec3::new(2.0, -2.5, -16.0), Vec3::Y),
        Solid::dodecahedron(Vec3::new(5.0, -3.5, -24.0), [Vec3::Y, Vec3::X]),
        Solid::octahedron(Vec3::new(-7.0, 0.0, -20.0), Vec3::new(1.0, 1.0, 0.0)),
    ];
    let mut now = 0.0;
    for _ in 0..100 {
        now += STEP_MS as f64;
        for solid in &mut solids {
            solid.tick(now);
        }
    }
    for solid in &solids {
        assert!(
            solid.transform().is_finite(),
            "transform must stay finite after 100 updates"
        );
    }
}
