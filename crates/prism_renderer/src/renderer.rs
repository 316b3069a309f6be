//! Flat shading with hard shadows.
//!
//! Each primary ray takes the color of the nearest surface scaled by the
//! ambient level, plus a Lambert term from every light that reaches the hit
//! point unobstructed.

use prism_core::{Light, Scene};
use prism_math::{Color, Interval, Normalize, Ray, Vector3};

use crate::hittable::nearest_hit;

/// Slack when comparing a shadow ray's first hit against the light distance.
pub const SHADOW_EPSILON: f64 = 1e-6;

/// Color of pixels whose ray hits nothing.
pub const BACKGROUND: Color = Color::BLACK;

/// Compute the color seen along a primary ray.
pub fn trace_ray(scene: &Scene, ray: &Ray, ambient: f64) -> Color {
    let Some(hit) = nearest_hit(&scene.objects, ray, Interval::FORWARD) else {
        return BACKGROUND;
    };

    let surface = hit.thing.surface_color();
    let point = hit.point(ray);
    let normal = hit.face_normal(ray);

    let mut color = surface * ambient;
    for light in &scene.lights {
        color += diffuse(scene, light, surface, point, normal);
    }
    color
}

/// Lambert contribution of one light, zero when shadowed.
fn diffuse(scene: &Scene, light: &Light, surface: Color, point: Vector3, normal: Vector3) -> Color {
    let to_point = point - light.location();
    let Ok(incident) = to_point.try_normalized() else {
        // Light sits on the surface
        return Color::BLACK;
    };

    let blocker = shadow_impact(scene, light.location(), incident);
    if !is_lit(blocker, to_point.length()) {
        return Color::BLACK;
    }

    let cos = (-normal.dot(incident)).max(0.0);
    surface * light.color() * cos
}

/// First impact of a ray cast from the light toward the point.
fn shadow_impact(scene: &Scene, light: Vector3, incident: Vector3) -> Option<f64> {
    let shadow_ray = Ray::new(light, incident);
    nearest_hit(&scene.objects, &shadow_ray, Interval::FORWARD).map(|hit| hit.impact)
}

/// Lit when the shadow ray's first impact is the point itself or beyond it.
/// A shadow ray that meets nothing leaves the point unlit.
fn is_lit(shadow_impact: Option<f64>, distance: f64) -> bool {
    shadow_impact.is_some_and(|impact| impact - distance > -SHADOW_EPSILON)
}
