use crate::Vector3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length; callers that need a
/// distance-valued `t` normalize it before building the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vector3::new(1.0, 2.0, 3.0);
        let direction = Vector3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vector3::ZERO, Vector3::X);

        assert_eq!(ray.at(0.0), Vector3::ZERO);
        assert_eq!(ray.at(1.0), Vector3::X);
        assert_eq!(ray.at(2.0), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_at_unnormalized_direction() {
        let ray = Ray::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(ray.at(1.5), Vector3::new(1.0, 1.0, 4.0));
    }
}
