//! Ray-plane intersection.
//!
//! A plane with unit normal `N` and distance `D` is the set
//! `{ P : dot(N, P) + D = 0 }`, so `plane { y, 1 }` is the floor `y = -1`.

use prism_core::Plane;
use prism_math::{Color, Ray, EPSILON};

use crate::hittable::{Hit, Hittable};

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Vec<Hit<'_>> {
        let normal = self.normal();
        let denom = normal.dot(ray.direction());
        if denom.abs() < EPSILON {
            return Vec::new();
        }

        let t = -(normal.dot(ray.origin()) + self.distance()) / denom;
        if t < 0.0 {
            return Vec::new();
        }

        vec![Hit {
            impact: t,
            normal,
            thing: self,
        }]
    }

    fn surface_color(&self) -> Color {
        self.pigment()
    }
}
