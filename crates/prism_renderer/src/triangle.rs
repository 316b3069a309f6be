//! Ray-triangle intersection.
//!
//! Intersects the supporting plane, then checks that the hit point lies on
//! the same side of all three edges. The side test does not depend on
//! winding, so both orientations of a triangle are hit.

use prism_core::Triangle;
use prism_math::{Color, Normalize, Ray, EPSILON};

use crate::hittable::{Hit, Hittable};

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Vec<Hit<'_>> {
        let [v0, v1, v2] = self.vertices();
        let n = -(v1 - v0).cross(v2 - v0);

        let denom = n.dot(ray.direction());
        if denom.abs() < EPSILON {
            return Vec::new();
        }

        let t = n.dot(v0 - ray.origin()) / denom;
        if t < 0.0 {
            return Vec::new();
        }

        let p = ray.at(t);
        let e0 = n.dot((v1 - v0).cross(p - v0));
        let e1 = n.dot((v2 - v1).cross(p - v1));
        let e2 = n.dot((v0 - v2).cross(p - v2));

        let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
        if !inside {
            return Vec::new();
        }

        let Ok(normal) = n.try_normalized() else {
            return Vec::new();
        };

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

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::sdl::{ParamList, ParamValue};
    use prism_math::Vector3;

    fn triangle(v0: Vector3, v1: Vector3, v2: Vector3) -> Triangle {
        let params = ParamList::new()
            .with("v0", ParamValue::Vector(v0))
            .with("v1", ParamValue::Vector(v1))
            .with("v2", ParamValue::Vector(v2));
        Triangle::from_params(params).unwrap()
    }

    fn centroid_ray() -> Ray {
        Ray::new(Vector3::new(1.0 / 3.0, 1.0 / 3.0, -5.0), Vector3::Z)
    }

    #[test]
    fn test_centroid_hit() {
        let tri = triangle(Vector3::ZERO, Vector3::X, Vector3::Y);

        let hits = tri.intersect(&centroid_ray());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].impact > 0.0);
        assert!((hits[0].impact - 5.0).abs() < 1e-9);
        assert!((hits[0].normal.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_hit_reversed_winding() {
        let tri = triangle(Vector3::ZERO, Vector3::Y, Vector3::X);

        let hits = tri.intersect(&centroid_ray());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].impact - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_point() {
        let tri = triangle(Vector3::ZERO, Vector3::X, Vector3::Y);
        let ray = Ray::new(Vector3::new(2.0, 2.0, -5.0), Vector3::Z);
        assert!(tri.intersect(&ray).is_empty());
    }

    #[test]
    fn test_parallel_ray() {
        let tri = triangle(Vector3::ZERO, Vector3::X, Vector3::Y);
        let ray = Ray::new(Vector3::new(0.2, 0.2, -1.0), Vector3::X);
        assert!(tri.intersect(&ray).is_empty());
    }

    #[test]
    fn test_behind_ray() {
        let tri = triangle(Vector3::ZERO, Vector3::X, Vector3::Y);
        let ray = Ray::new(Vector3::new(0.2, 0.2, 5.0), Vector3::Z);
        assert!(tri.intersect(&ray).is_empty());
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = triangle(Vector3::ZERO, Vector3::X, Vector3::new(2.0, 0.0, 0.0));
        assert!(tri.intersect(&centroid_ray()).is_empty());
    }
}
