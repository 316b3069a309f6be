//! Ray-sphere intersection.

use prism_core::Sphere;
use prism_math::{Color, Normalize, Ray, EPSILON};

use crate::hittable::{Hit, Hittable};

fn hit_at<'a>(sphere: &'a Sphere, ray: &Ray, t: f64) -> Hit<'a> {
    // A zero radius puts every hit at the center; fall back to facing the ray
    let normal = (ray.at(t) - sphere.center())
        .try_normalized()
        .unwrap_or_else(|_| -ray.direction() / ray.direction().length());

    Hit {
        impact: t,
        normal,
        thing: sphere,
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Vec<Hit<'_>> {
        let oc = ray.origin() - self.center();
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return Vec::new();
        }

        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius() * self.radius();
        let discriminant = b * b - 4.0 * a * c;

        if discriminant.abs() < EPSILON {
            return vec![hit_at(self, ray, -b / (2.0 * a))];
        }
        if discriminant < 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        vec![
            hit_at(self, ray, (-b - sqrtd) / (2.0 * a)),
            hit_at(self, ray, (-b + sqrtd) / (2.0 * a)),
        ]
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

    fn unit_sphere() -> Sphere {
        let params = ParamList::new()
            .with("location", ParamValue::Vector(Vector3::ZERO))
            .with("radius", ParamValue::Number(1.0));
        Sphere::from_params(params).unwrap()
    }

    #[test]
    fn test_sphere_two_hits() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::X);

        let mut impacts: Vec<f64> = sphere.intersect(&ray).iter().map(|h| h.impact).collect();
        impacts.sort_by(|a, b| a.total_cmp(b));

        assert_eq!(impacts.len(), 2);
        assert!((impacts[0] - 4.0).abs() < 1e-9);
        assert!((impacts[1] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_normals() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::X);

        for hit in sphere.intersect(&ray) {
            assert!((hit.normal.length() - 1.0).abs() < 1e-9);
            let expected = hit.point(&ray) - sphere.center();
            assert!((hit.normal - expected).length() < 1e-9);
        }
    }

    #[test]
    fn test_sphere_tangent() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-5.0, 1.0, 0.0), Vector3::X);

        let hits = sphere.intersect(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].impact - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-5.0, 2.0, 0.0), Vector3::X);
        assert!(sphere.intersect(&ray).is_empty());
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0));

        let mut impacts: Vec<f64> = sphere.intersect(&ray).iter().map(|h| h.impact).collect();
        impacts.sort_by(|a, b| a.total_cmp(b));
        assert!((impacts[0] - 2.0).abs() < 1e-9);
        assert!((impacts[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_direction() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::ZERO);
        assert!(sphere.intersect(&ray).is_empty());
    }
}
