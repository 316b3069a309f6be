//! Row-band parallel rendering.
//!
//! Splits the image into horizontal bands of rows that are rendered
//! independently with rayon against the same read-only scene. The output
//! matches a sequential [`RenderSession`](crate::RenderSession) pixel for
//! pixel.

use prism_core::{RenderSettings, Scene};
use prism_math::Color;
use rayon::prelude::*;

use crate::camera::RayGenerator;
use crate::framebuffer::Framebuffer;
use crate::renderer::trace_ray;
use crate::session::{prepare, AbortHandle, RenderResult};

/// Default number of rows per band.
pub const DEFAULT_BAND_HEIGHT: u32 = 16;

/// A contiguous range of rows.
///
/// Rows are counted like camera rays, from the bottom of the image up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub y: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Index of this band in render order
    pub index: usize,
}

impl RowBand {
    pub fn new(y: u32, height: u32, index: usize) -> Self {
        Self { y, height, index }
    }

    pub fn pixel_count(&self, width: u32) -> usize {
        width as usize * self.height as usize
    }
}

/// Split `height` rows into bands of at most `band_height` rows.
pub fn generate_bands(height: u32, band_height: u32) -> Vec<RowBand> {
    let band_height = band_height.max(1);

    (0..height)
        .step_by(band_height as usize)
        .enumerate()
        .map(|(index, y)| RowBand::new(y, band_height.min(height - y), index))
        .collect()
}

/// Pixels of one rendered band.
#[derive(Debug, Clone)]
pub struct BandResult {
    /// The band that was rendered
    pub band: RowBand,
    /// Pixel colors in row-major order; shorter than the band if aborted
    pub pixels: Vec<Color>,
}

/// Render one band, stopping early if `abort` is raised.
pub fn render_band(
    band: RowBand,
    rays: &RayGenerator,
    scene: &Scene,
    ambient: f64,
    abort: &AbortHandle,
) -> BandResult {
    let mut pixels = Vec::with_capacity(band.pixel_count(rays.width()));

    'rows: for y in band.y..band.y + band.height {
        for x in 0..rays.width() {
            if abort.is_aborted() {
                break 'rows;
            }
            pixels.push(trace_ray(scene, &rays.ray_for(x, y), ambient));
        }
    }

    BandResult { band, pixels }
}

/// Render a scene on the rayon thread pool.
///
/// Validation is the same as for a session. If `abort` is raised, bands
/// stop at the next pixel and the pixels drawn so far are kept.
pub fn render_parallel(
    scene: &Scene,
    settings: &RenderSettings,
    abort: &AbortHandle,
) -> RenderResult<Framebuffer> {
    let rays = prepare(scene, settings)?;
    let bands = generate_bands(settings.height, DEFAULT_BAND_HEIGHT);

    log::info!(
        "Rendering {}x{} in {} bands on {} threads",
        settings.width,
        settings.height,
        bands.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BandResult> = bands
        .into_par_iter()
        .map(|band| render_band(band, &rays, scene, settings.ambient, abort))
        .collect();

    let mut framebuffer = Framebuffer::new(settings.width, settings.height);
    for result in results {
        for (i, color) in result.pixels.into_iter().enumerate() {
            let x = (i % settings.width as usize) as u32;
            let y = result.band.y + (i / settings.width as usize) as u32;
            framebuffer.set(x, settings.height - 1 - y, color);
        }
    }

    if abort.is_aborted() {
        log::info!("Parallel render aborted");
    }

    Ok(framebuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{render, SceneError};
    use prism_core::load_scene_from_string;

    const SCENE: &str = r#"
        camera { location <0, 2, -6> angle 50 look_at <0, 0, 0> }
        plane { y, 1 pigment { rgb <0.8, 0.8, 0.8> } }
        sphere { <0, 0, 0>, 1 texture { pigment { rgb <1, 0.2, 0.2> } } }
        triangle { <-2, -1, 2>, <2, -1, 2>, <0, 2, 2> pigment { rgb <0.2, 0.2, 1> } }
        light_source { <5, 10, -5>, rgb <1, 1, 1> }
    "#;

    fn scene() -> Scene {
        load_scene_from_string(SCENE).unwrap().scene
    }

    #[test]
    fn test_generate_bands_exact_fit() {
        let bands = generate_bands(64, 16);
        assert_eq!(bands.len(), 4);
        assert_eq!(bands[3], RowBand::new(48, 16, 3));
    }

    #[test]
    fn test_generate_bands_partial_fit() {
        let bands = generate_bands(40, 16);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[2].height, 8);

        let total: usize = bands.iter().map(|b| b.pixel_count(10)).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn test_generate_bands_empty() {
        assert!(generate_bands(0, 16).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let settings = RenderSettings::new(40, 37);

        let sequential = render(scene(), settings).unwrap();
        let parallel = render_parallel(&scene(), &settings, &AbortHandle::new()).unwrap();

        assert_eq!(parallel, sequential);
        assert!(parallel.pixels().iter().any(|c| !c.is_black()));
    }

    #[test]
    fn test_parallel_validates() {
        let source = "sphere { <0, 0, 0>, 1 }";
        let scene = load_scene_from_string(source).unwrap().scene;

        let err = render_parallel(&scene, &RenderSettings::new(8, 8), &AbortHandle::new())
            .unwrap_err();
        assert_eq!(err, SceneError::CameraCount(0));
    }

    #[test]
    fn test_pre_aborted_render_is_black() {
        let abort = AbortHandle::new();
        abort.abort();

        let fb = render_parallel(&scene(), &RenderSettings::new(16, 16), &abort).unwrap();
        assert!(fb.pixels().iter().all(Color::is_black));
    }
}
