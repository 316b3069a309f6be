//! Prism Renderer - a Whitted-style ray tracer without reflections.
//!
//! Renders a classified [`prism_core::Scene`] with flat ambient plus
//! Lambert shading and hard shadows from point lights.
//!
//! Rendering is driven either one pixel at a time through a
//! [`RenderSession`], or across threads with [`render_parallel`].

mod band;
mod camera;
mod framebuffer;
mod hittable;
mod plane;
mod renderer;
mod session;
mod sphere;
mod triangle;

pub use band::{generate_bands, render_band, render_parallel, BandResult, RowBand, DEFAULT_BAND_HEIGHT};
pub use camera::{PrimaryRay, RayGenerator};
pub use framebuffer::Framebuffer;
pub use hittable::{nearest_hit, Hit, Hittable};
pub use renderer::{trace_ray, BACKGROUND, SHADOW_EPSILON};
pub use session::{
    prepare, render, AbortHandle, DisplaySink, Progress, RenderResult, RenderSession, RenderState,
    SceneError,
};

/// Re-export common math types from prism_math
pub use prism_math::{Color, Interval, Ray, Vector3};
