//! Axial-coordinate math, pixel projection, and polygon hit-testing.

use serde::{Deserialize, Serialize};

/// Slack applied to the circumscribed-circle rejection so hits near a hex
/// edge are still handed to the exact polygon test.
const CIRCUMCIRCLE_SLACK: f32 = 1.05;

/// Axial hex-grid coordinate with implicit third component `s = -q - r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axial {
    q: i32,
    r: i32,
}

impl Axial {
    /// Offsets of the six neighbouring coordinates in canonical order.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] =
        [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The origin coordinate at the board center.
    #[must_use]
    pub const fn origin() -> Self {
        Self { q: 0, r: 0 }
    }

    /// First axial component.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Second axial component.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Implicit third cube component.
    #[must_use]
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance between two coordinates, `(|dq| + |dr| + |ds|) / 2`.
    #[must_use]
    pub fn distance_to(self, other: Axial) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        let ds = self.s() - other.s();
        (dq.unsigned_abs() + dr.unsigned_abs() + ds.unsigned_abs()) / 2
    }

    /// Hex distance from the board origin.
    #[must_use]
    pub fn distance_from_origin(self) -> u32 {
        self.distance_to(Axial::origin())
    }

    /// The six adjacent coordinates in canonical order.
    #[must_use]
    pub fn neighbors(self) -> [Axial; 6] {
        Self::NEIGHBOR_OFFSETS.map(|(dq, dr)| Axial::new(self.q + dq, self.r + dr))
    }
}

/// A position in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    x: f32,
    y: f32,
}

impl PixelPoint {
    /// Creates a new pixel point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: PixelPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Projects an axial coordinate to its pixel center for a pointy-top layout
/// centred on the origin: `x = size·√3·(q + r/2)`, `y = size·1.5·r`.
#[must_use]
pub fn axial_to_pixel(axial: Axial, hex_size: f32) -> PixelPoint {
    let q = axial.q() as f32;
    let r = axial.r() as f32;
    PixelPoint::new(
        hex_size * 3.0_f32.sqrt() * (q + r / 2.0),
        hex_size * 1.5 * r,
    )
}

/// The six vertices of a pointy-top hexagon, starting at the top vertex and
/// proceeding in 60° increments.
#[must_use]
pub fn hex_vertices(center: PixelPoint, size: f32) -> [PixelPoint; 6] {
    let mut vertices = [PixelPoint::new(0.0, 0.0); 6];
    for (index, vertex) in vertices.iter_mut().enumerate() {
        let angle = -std::f32::consts::FRAC_PI_2
            + index as f32 * std::f32::consts::FRAC_PI_3;
        *vertex = PixelPoint::new(
            center.x() + size * angle.cos(),
            center.y() + size * angle.sin(),
        );
    }
    vertices
}

/// Reports whether `point` lies inside the pointy-top hexagon of the given
/// circumradius centred on `center`.
///
/// A squared circumscribed-circle check rejects most misses before the exact
/// ray-casting test runs.
#[must_use]
pub fn point_in_hex(center: PixelPoint, size: f32, point: PixelPoint) -> bool {
    let dx = point.x() - center.x();
    let dy = point.y() - center.y();
    if dx * dx + dy * dy > CIRCUMCIRCLE_SLACK * size * size {
        return false;
    }
    point_in_polygon(&hex_vertices(center, size), point)
}

fn point_in_polygon(polygon: &[PixelPoint], point: PixelPoint) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x(), polygon[i].y());
        let (xj, yj) = (polygon[j].x(), polygon[j].y());
        let crosses = (yi > point.y()) != (yj > point.y())
            && point.x() < (xj - xi) * (point.y() - yi) / (yj - yi + 1e-12) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}
