//! Prism math - value types shared by the parser and the tracer.
//!
//! Vectors come straight from glam (double precision); colors, rays and
//! intervals are defined here.

// Re-export glam for convenience
pub use glam::*;

mod color;
mod interval;
mod ray;
mod vector;

pub use color::Color;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{MathError, MathResult, Normalize, Vector3};

/// Tolerance for geometric degeneracies (parallel rays, tangent hits).
pub const EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3_creation() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vector3_operations() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::new(3.0, 4.0, 0.0).length(), 5.0);
    }
}
