//! Primary ray generation.
//!
//! Builds an orthonormal basis from the scene camera and walks the image
//! plane row by row. Pixel `y` counts upward from the bottom row; the
//! framebuffer flips it when writing.

use prism_core::Camera;
use prism_math::{MathResult, Normalize, Ray, Vector3};

/// A camera ray tagged with the pixel it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryRay {
    pub ray: Ray,
    pub x: u32,
    pub y: u32,
}

/// Iterator over the primary rays of an image, row-major with `y` outer.
#[derive(Debug, Clone)]
pub struct RayGenerator {
    location: Vector3,
    forward: Vector3,
    right: Vector3,
    up: Vector3,
    /// World units per pixel on a plane at unit distance
    scale: f64,
    /// Distance from location to look_at
    focal: f64,
    orthographic: bool,
    width: u32,
    height: u32,
    next: u64,
}

impl RayGenerator {
    /// Set up the camera basis for a `width` x `height` image.
    ///
    /// Fails when `location == look_at` or `up` is parallel to the view
    /// direction.
    pub fn new(camera: &Camera, width: u32, height: u32) -> MathResult<Self> {
        let view = camera.look_at() - camera.location();
        let forward = view.try_normalized()?;
        let right = camera.up().cross(forward).try_normalized()?;
        let up = forward.cross(right);

        let plane_width = 2.0 * (camera.angle().to_radians() / 2.0).tan();
        let scale = plane_width / (width.max(2) - 1) as f64;

        Ok(Self {
            location: camera.location(),
            forward,
            right,
            up,
            scale,
            focal: view.length(),
            orthographic: camera.is_orthographic(),
            width,
            height,
            next: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ray through the center of pixel `(x, y)`.
    pub fn ray_for(&self, x: u32, y: u32) -> Ray {
        let dx = x as f64 - (self.width as f64 - 1.0) / 2.0;
        let dy = y as f64 - (self.height as f64 - 1.0) / 2.0;
        let offset = self.right * (dx * self.scale) + self.up * (dy * self.scale);

        if self.orthographic {
            Ray::new(self.location + offset * self.focal, self.forward)
        } else {
            // forward is unit and orthogonal to offset, so this never has zero length
            Ray::new(self.location, (self.forward + offset).normalize())
        }
    }

    fn total(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Iterator for RayGenerator {
    type Item = PrimaryRay;

    fn next(&mut self) -> Option<PrimaryRay> {
        if self.next >= self.total() {
            return None;
        }

        let x = (self.next % self.width as u64) as u32;
        let y = (self.next / self.width as u64) as u32;
        self.next += 1;

        Some(PrimaryRay {
            ray: self.ray_for(x, y),
            x,
            y,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total() - self.next.min(self.total())) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RayGenerator {}
