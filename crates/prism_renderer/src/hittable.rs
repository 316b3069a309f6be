//! Hittable trait and Hit record for ray-object intersection.

use prism_core::Object;
use prism_math::{Color, Interval, Ray, Vector3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter where the intersection occurs
    pub impact: f64,
    /// Unit geometric normal at the intersection
    pub normal: Vector3,
    /// The object that was hit
    pub thing: &'a dyn Hittable,
}

impl<'a> Hit<'a> {
    /// World-space point of the hit along `ray`.
    pub fn point(&self, ray: &Ray) -> Vector3 {
        ray.at(self.impact)
    }

    /// The normal flipped, if needed, to point against the ray.
    pub fn face_normal(&self, ray: &Ray) -> Vector3 {
        if ray.direction().dot(self.normal) > 0.0 {
            -self.normal
        } else {
            self.normal
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// All intersections of `ray` with this object, in no particular order.
    ///
    /// Hits behind the ray origin may be included; callers filter by range.
    fn intersect(&self, ray: &Ray) -> Vec<Hit<'_>>;

    /// Flat color of the surface.
    fn surface_color(&self) -> Color;
}

impl Hittable for Object {
    fn intersect(&self, ray: &Ray) -> Vec<Hit<'_>> {
        match self {
            Object::Sphere(sphere) => sphere.intersect(ray),
            Object::Plane(plane) => plane.intersect(ray),
            Object::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    fn surface_color(&self) -> Color {
        self.pigment()
    }
}

/// Closest hit whose impact lies strictly inside `range`.
pub fn nearest_hit<'a>(objects: &'a [Object], ray: &Ray, range: Interval) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;

    for object in objects {
        for hit in object.intersect(ray) {
            if !range.surrounds(hit.impact) {
                continue;
            }
            if closest.map_or(true, |c| hit.impact < c.impact) {
                closest = Some(hit);
            }
        }
    }

    closest
}
