//! Geometry and animation for the three demo solids.
//!
//! Vertex/color/index tables are baked in as `const` arrays (vertices are
//! duplicated per face so each face can be flat-colored), and every table is
//! checked at compile time, so the renderer can index blindly. Only each
//! solid's transform and timestamp mutate after construction.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// One full rotation every 5 seconds, regardless of frame rate.
pub const DURATION_MS: f32 = 5000.0;

/// Y-translation increment per update for the octahedron's bounce.
const BOB_STEP: f32 = 0.05;
const BOB_FLOOR: f32 = -8.0;

// Pentagonal-base pyramid: 5 base vertices, then 5 side faces of 3 vertices
// each (base corners re-listed with the apex) so side faces color flat.
const PYRAMID_VERTS: [f32; 60] = [
    -3.5, 0.0, 0.0, //
    -1.5, 0.0, 0.0, //
    -0.88, 0.0, 1.9, //
    -2.5, 0.0, 3.08, //
    -4.12, 0.0, 1.9, //
    //
    -3.5, 0.0, 0.0, //
    -1.5, 0.0, 0.0, //
    -2.46, 3.84, 1.34, //
    //
    -1.5, 0.0, 0.0, //
    -0.88, 0.0, 1.9, //
    -2.46, 3.84, 1.34, //
    //
    -0.88, 0.0, 1.9, //
    -2.5, 0.0, 3.08, //
    -2.46, 3.84, 1.34, //
    //
    -2.5, 0.0, 3.08, //
    -4.12, 0.0, 1.9, //
    -2.46, 3.84, 1.34, //
    //
    -4.12, 0.0, 1.9, //
    -3.5, 0.0, 0.0, //
    -2.46, 3.84, 1.34,
];

const PYRAMID_FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
];

// The pentagonal base is a fan of 3 triangles; each side face is one triangle.
const PYRAMID_INDICES: [u16; 24] = [
    0, 1, 4, 4, 1, 2, 4, 2, 3, //
    5, 6, 7, //
    8, 9, 10, //
    11, 12, 13, //
    14, 15, 16, //
    17, 18, 19,
];

// Dodecahedron: 12 pentagonal faces, 5 vertices each, no sharing.
const DODECAHEDRON_VERTS: [f32; 180] = [
    -3.5, 0.0, 0.0, //
    -1.5, 0.0, 0.0, //
    -0.88, 1.9, 0.0, //
    -2.5, 3.08, 0.0, //
    -4.12, 1.9, 0.0, //
    //
    -3.5, 0.0, 0.0, //
    -1.5, 0.0, 0.0, //
    -4.12, -0.85, 1.7, //
    -0.88, -0.85, 1.7, //
    -2.5, -1.38, 2.75, //
    //
    -1.5, 0.0, 0.0, //
    -0.88, 1.9, 0.0, //
    -0.88, -0.85, 1.7, //
    0.12, 2.23, 1.7, //
    0.12, 0.53, 2.75, //
    //
    -0.88, 1.9, 0.0, //
    -2.5, 3.08, 0.0, //
    0.12, 2.23, 1.7, //
    -2.5, 4.13, 1.7, //
    -0.88, 3.6, 2.75, //
    //
    -2.5, 3.08, 0.0, //
    -4.12, 1.9, 0.0, //
    -2.5, 4.13, 1.7, //
    -5.12, 2.23, 1.7, //
    -4.12, 3.6, 2.75, //
    //
    -4.12, 1.9, 0.0, //
    -3.5, 0.0, 0.0, //
    -5.12, 2.23, 1.7, //
    -4.12, -0.85, 1.7, //
    -5.12, 0.53, 2.75, //
    //
    -4.12, -0.85, 1.7, //
    -5.12, 0.53, 2.75, //
    -2.5, -1.38, 2.75, //
    -4.12, 0.85, 4.45, //
    -2.5, -0.32, 4.45, //
    //
    -0.88, -0.85, 1.7, //
    -2.5, -1.38, 2.75, //
    0.12, 0.53, 2.75, //
    -2.5, -0.32, 4.45, //
    -0.88, 0.85, 4.45, //
    //
    0.12, 2.23, 1.7, //
    0.12, 0.53, 2.75, //
    -0.88, 3.6, 2.75, //
    -0.88, 0.85, 4.45, //
    -1.5, 2.75, 4.45, //
    //
    -2.5, 4.13, 1.7, //
    -0.88, 3.6, 2.75, //
    -4.12, 3.6, 2.75, //
    -1.5, 2.75, 4.45, //
    -3.5, 2.75, 4.45, //
    //
    -5.12, 2.23, 1.7, //
    -4.12, 3.6, 2.75, //
    -5.12, 0.53, 2.75, //
    -3.5, 2.75, 4.45, //
    -4.12, 0.85, 4.45, //
    //
    -3.5, 2.75, 4.45, //
    -4.12, 0.85, 4.45, //
    -1.5, 2.75, 4.45, //
    -2.5, -0.32, 4.45, //
    -0.88, 0.85, 4.45,
];

const DODECAHEDRON_FACE_COLORS: [[f32; 4]; 12] = [
    [1.0, 0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.5, 0.0, 0.0, 1.0],
    [0.5, 0.5, 0.0, 1.0],
    [0.5, 0.5, 0.5, 1.0],
    [0.5, 0.0, 0.5, 1.0],
    [0.1, 0.5, 0.0, 1.0],
    [0.1, 0.5, 0.5, 1.0],
];

// Each pentagon is split into the local triangles {0,1,2},{1,2,3},{2,3,4}.
// This is the triangle set the demo has always drawn; it is not a proper fan
// of the pentagon (it never emits the {0,4} edge), and is kept as-is.
const DODECAHEDRON_INDICES: [u16; 108] = [
    0, 1, 2, 1, 2, 3, 2, 3, 4, //
    5, 6, 7, 6, 7, 8, 7, 8, 9, //
    10, 11, 12, 11, 12, 13, 12, 13, 14, //
    15, 16, 17, 16, 17, 18, 17, 18, 19, //
    20, 21, 22, 21, 22, 23, 22, 23, 24, //
    25, 26, 27, 26, 27, 28, 27, 28, 29, //
    30, 31, 32, 31, 32, 33, 32, 33, 34, //
    35, 36, 37, 36, 37, 38, 37, 38, 39, //
    40, 41, 42, 41, 42, 43, 42, 43, 44, //
    45, 46, 47, 46, 47, 48, 47, 48, 49, //
    50, 51, 52, 51, 52, 53, 52, 53, 54, //
    55, 56, 57, 56, 57, 58, 57, 58, 59,
];

// Octahedron: 8 triangular faces, 3 vertices each, no sharing.
const OCTAHEDRON_VERTS: [f32; 72] = [
    4.53, 3.06, 0.0, //
    2.0, 5.0, 0.0, //
    1.58, 1.84, 0.0, //
    //
    2.0, 5.0, 0.0, //
    0.88, 3.54, 2.6, //
    1.58, 1.84, 0.0, //
    //
    0.88, 3.54, 2.6, //
    3.4, 1.6, 2.6, //
    1.58, 1.84, 0.0, //
    //
    3.4, 1.6, 2.6, //
    4.53, 3.06, 0.0, //
    1.58, 1.84, 0.0, //
    //
    4.53, 3.06, 0.0, //
    2.0, 5.0, 0.0, //
    3.82, 4.76, 2.6, //
    //
    2.0, 5.0, 0.0, //
    0.88, 3.54, 2.6, //
    3.82, 4.76, 2.6, //
    //
    0.88, 3.54, 2.6, //
    3.4, 1.6, 2.6, //
    3.82, 4.76, 2.6, //
    //
    3.4, 1.6, 2.6, //
    4.53, 3.06, 0.0, //
    3.82, 4.76, 2.6,
];

const OCTAHEDRON_FACE_COLORS: [[f32; 4]; 8] = [
    [1.0, 0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.5, 0.0, 1.0],
    [1.0, 1.0, 0.5, 1.0],
    [0.05, 0.5, 0.5, 1.0],
    [1.0, 0.5, 1.0, 1.0],
];

const OCTAHEDRON_INDICES: [u16; 24] = [
    0, 1, 2, //
    3, 4, 5, //
    6, 7, 8, //
    9, 10, 11, //
    12, 13, 14, //
    15, 16, 17, //
    18, 19, 20, //
    21, 22, 23,
];

// Index tables are fixed, so validate them once at compile time instead of
// bounds-checking at draw time.
const fn indices_valid(indices: &[u16], vertex_count: usize) -> bool {
    if indices.len() % 3 != 0 {
        return false;
    }
    let mut i = 0;
    while i < indices.len() {
        if indices[i] as usize >= vertex_count {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(indices_valid(&PYRAMID_INDICES, PYRAMID_VERTS.len() / 3));
const _: () = assert!(indices_valid(&DODECAHEDRON_INDICES, DODECAHEDRON_VERTS.len() / 3));
const _: () = assert!(indices_valid(&OCTAHEDRON_INDICES, OCTAHEDRON_VERTS.len() / 3));
const _: () = assert!(PYRAMID_VERTS.len() % 3 == 0);
const _: () = assert!(DODECAHEDRON_VERTS.len() % 3 == 0);
const _: () = assert!(OCTAHEDRON_VERTS.len() % 3 == 0);

/// Per-shape animation rule, applied once per frame.
#[derive(Clone, Copy, Debug)]
enum Motion {
    /// Continuous rotation about one fixed axis.
    Spin { axis: Vec3 },
    /// Two rotations by the same angle, about `axes[0]` then `axes[1]`.
    DoubleSpin { axes: [Vec3; 2] },
    /// Bounce between Y=0 and Y=-8 while spinning about one axis.
    BounceSpin { axis: Vec3, is_up: bool },
}

/// One renderable polyhedron: immutable geometry plus a mutable transform.
pub struct Solid {
    vertices: &'static [f32],
    face_colors: &'static [[f32; 4]],
    vertex_colors: Vec<f32>,
    indices: &'static [u16],
    transform: Mat4,
    last_update_ms: Option<f64>,
    motion: Motion,
}

impl Solid {
    fn new(
        vertices: &'static [f32],
        face_colors: &'static [[f32; 4]],
        vertex_colors: Vec<f32>,
        indices: &'static [u16],
        translation: Vec3,
        motion: Motion,
    ) -> Self {
        debug_assert_eq!(vertex_colors.len() / 4, vertices.len() / 3);
        Solid {
            vertices,
            face_colors,
            vertex_colors,
            indices,
            transform: Mat4::from_translation(translation),
            last_update_ms: None,
            motion,
        }
    }

    /// Pentagonal-base pyramid spinning about `rotation_axis`.
    pub fn pyramid(translation: Vec3, rotation_axis: Vec3) -> Self {
        // The base pentagon takes 5 copies of the first color, every side
        // face 3 copies of its own.
        let counts = std::iter::once(5).chain(std::iter::repeat(3));
        Solid::new(
            &PYRAMID_VERTS,
            &PYRAMID_FACE_COLORS,
            expand_face_colors(&PYRAMID_FACE_COLORS, counts),
            &PYRAMID_INDICES,
            translation,
            Motion::Spin {
                axis: rotation_axis.normalize_or_zero(),
            },
        )
    }

    /// Dodecahedron tumbling about both axes each frame.
    pub fn dodecahedron(translation: Vec3, rotation_axes: [Vec3; 2]) -> Self {
        Solid::new(
            &DODECAHEDRON_VERTS,
            &DODECAHEDRON_FACE_COLORS,
            expand_face_colors(&DODECAHEDRON_FACE_COLORS, std::iter::repeat(5)),
            &DODECAHEDRON_INDICES,
            translation,
            Motion::DoubleSpin {
                axes: [
                    rotation_axes[0].normalize_or_zero(),
                    rotation_axes[1].normalize_or_zero(),
                ],
            },
        )
    }

    /// Octahedron that bounces vertically while spinning about `rotation_axis`.
    pub fn octahedron(translation: Vec3, rotation_axis: Vec3) -> Self {
        Solid::new(
            &OCTAHEDRON_VERTS,
            &OCTAHEDRON_FACE_COLORS,
            expand_face_colors(&OCTAHEDRON_FACE_COLORS, std::iter::repeat(3)),
            &OCTAHEDRON_INDICES,
            translation,
            Motion::BounceSpin {
                axis: rotation_axis.normalize_or_zero(),
                is_up: false,
            },
        )
    }

    /// Advance the animation by `elapsed_ms` of simulated time.
    ///
    /// Rotations are composed onto the existing transform, so motion is
    /// continuous and its speed depends only on elapsed time, not on how
    /// often this is called.
    pub fn advance(&mut self, elapsed_ms: f32) {
        let angle = TAU * elapsed_ms / DURATION_MS;
        match self.motion {
            Motion::Spin { axis } => {
                self.transform = rotated(self.transform, axis, angle);
            }
            Motion::DoubleSpin { axes: [a, b] } => {
                self.transform = rotated(self.transform, a, angle);
                self.transform = rotated(self.transform, b, angle);
            }
            Motion::BounceSpin { axis, is_up } => {
                // The bounce drives the matrix's Y-translation component
                // directly, so it survives the rotation composed below.
                let mut up = is_up;
                let y = &mut self.transform.w_axis.y;
                if *y <= 0.0 && !up {
                    *y += BOB_STEP;
                } else {
                    if *y >= 0.0 && !up {
                        up = true;
                    }
                    if *y >= BOB_FLOOR && up {
                        *y -= BOB_STEP;
                    } else {
                        up = false;
                    }
                }
                self.transform = rotated(self.transform, axis, angle);
                self.motion = Motion::BounceSpin { axis, is_up: up };
            }
        }
    }

    /// Advance using a wall-clock timestamp in milliseconds.
    ///
    /// The first call records the timestamp and advances by zero; later
    /// calls advance by the delta since the previous one.
    pub fn tick(&mut self, now_ms: f64) {
        let elapsed = self
            .last_update_ms
            .map_or(0.0, |prev| (now_ms - prev) as f32);
        self.last_update_ms = Some(now_ms);
        self.advance(elapsed);
    }

    pub fn vertices(&self) -> &[f32] {
        self.vertices
    }

    /// One RGBA color per logical face.
    pub fn face_colors(&self) -> &[[f32; 4]] {
        self.face_colors
    }

    /// Per-vertex RGBA colors, `face_colors` expanded by face vertex count.
    pub fn vertex_colors(&self) -> &[f32] {
        &self.vertex_colors
    }

    pub fn indices(&self) -> &[u16] {
        self.indices
    }

    pub fn index_count(&self) -> i32 {
        self.indices.len() as i32
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }
}

/// Post-multiplies a rotation about `axis` onto `transform`.
/// A degenerate axis leaves the transform unchanged.
fn rotated(transform: Mat4, axis: Vec3, angle: f32) -> Mat4 {
    if axis == Vec3::ZERO {
        return transform;
    }
    transform * Mat4::from_axis_angle(axis, angle)
}

fn expand_face_colors(
    face_colors: &[[f32; 4]],
    counts: impl IntoIterator<Item = usize>,
) -> Vec<f32> {
    let mut out = Vec::new();
    for (color, n) in face_colors.iter().zip(counts) {
        for _ in 0..n {
            out.extend_from_slice(color);
        }
    }
    out
}
