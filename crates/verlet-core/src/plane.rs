use glam::{Vec2, Vec3};

/// Infinite plane `dot(normal, p) + d = 0`. The normal points to the free side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// `normal` is used as given and should be unit length.
    pub const fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane through `point` facing `normal` (normalized here).
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Signed distance from the plane; positive on the side the normal points to.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Project `point` onto the plane shifted by `-offset` along the normal.
    ///
    /// `project(p, -r)` lands the point at signed distance `r`, i.e. a sphere of
    /// radius `r` resting on the plane.
    #[inline]
    pub fn project(&self, point: Vec3, offset: f32) -> Vec3 {
        point - self.normal * (self.distance(point) + offset)
    }

    /// The four inward-facing walls of the rectangle `[min, max]` in the xy plane:
    /// floor, ceiling, left, right.
    pub fn box_walls(min: Vec2, max: Vec2) -> [Plane; 4] {
        [
            Plane::new(Vec3::Y, -min.y),
            Plane::new(Vec3::NEG_Y, max.y),
            Plane::new(Vec3::X, -min.x),
            Plane::new(Vec3::NEG_X, max.x),
        ]
    }
}
