//! Render sessions.
//!
//! A [`RenderSession`] owns everything one render needs: the scene, the
//! settings, the framebuffer and the abort flag. It computes one pixel per
//! [`RenderSession::step`] so a host can interleave rendering with its own
//! event handling, or it can be driven to completion with
//! [`RenderSession::run`], which reports progress to a [`DisplaySink`].
//!
//! ```text
//! NotStarted -> Validating -> Rendering -> Finished
//!                   |             |
//!                   +-------------+-----> Aborted
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use prism_core::{RenderSettings, Scene};
use prism_math::MathError;
use thiserror::Error;

use crate::camera::RayGenerator;
use crate::framebuffer::Framebuffer;
use crate::renderer::trace_ray;

/// Reasons a scene cannot be rendered. Reported before any pixel is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("exactly one camera required, found {0}")]
    CameraCount(usize),

    #[error("no objects in scene")]
    NoObjects,

    #[error("invalid camera: {0}")]
    Camera(#[from] MathError),

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, SceneError>;

/// Check that a scene can be rendered and build its primary rays.
pub fn prepare(scene: &Scene, settings: &RenderSettings) -> RenderResult<RayGenerator> {
    if settings.width == 0 || settings.height == 0 {
        return Err(SceneError::InvalidDimensions {
            width: settings.width,
            height: settings.height,
        });
    }

    let camera = match scene.cameras.as_slice() {
        [camera] => camera,
        cameras => return Err(SceneError::CameraCount(cameras.len())),
    };

    if scene.objects.is_empty() {
        return Err(SceneError::NoObjects);
    }

    Ok(RayGenerator::new(camera, settings.width, settings.height)?)
}

/// Lifecycle of a render session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    NotStarted,
    Validating,
    Rendering,
    Finished,
    Aborted,
}

impl RenderState {
    /// True for `Finished` and `Aborted`.
    pub fn is_terminal(self) -> bool {
        matches!(self, RenderState::Finished | RenderState::Aborted)
    }
}

/// How far a render has come.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub pixels_done: usize,
    pub pixels_total: usize,
}

impl Progress {
    /// Completed fraction in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.pixels_total == 0 {
            return 1.0;
        }
        self.pixels_done as f64 / self.pixels_total as f64
    }
}

/// Receives framebuffer snapshots while a session runs.
pub trait DisplaySink {
    fn show(&mut self, framebuffer: &Framebuffer, progress: Progress);
}

impl<F> DisplaySink for F
where
    F: FnMut(&Framebuffer, Progress),
{
    fn show(&mut self, framebuffer: &Framebuffer, progress: Progress) {
        self(framebuffer, progress)
    }
}

/// Shared flag for stopping a render from another thread.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the render to stop at the next pixel boundary.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A single render of a scene.
pub struct RenderSession {
    scene: Scene,
    settings: RenderSettings,
    state: RenderState,
    framebuffer: Framebuffer,
    rays: Option<RayGenerator>,
    pixels_done: usize,
    snapshot_interval: usize,
    abort: AbortHandle,
    error: Option<SceneError>,
    started: Option<Instant>,
}

impl RenderSession {
    /// Create a session. Nothing is validated until the first step.
    pub fn new(scene: Scene, settings: RenderSettings) -> Self {
        Self {
            framebuffer: Framebuffer::new(settings.width, settings.height),
            snapshot_interval: settings.width.max(1) as usize,
            scene,
            settings,
            state: RenderState::NotStarted,
            rays: None,
            pixels_done: 0,
            abort: AbortHandle::new(),
            error: None,
            started: None,
        }
    }

    /// Number of pixels between `DisplaySink` updates in [`run`](Self::run).
    /// Defaults to one image row.
    pub fn with_snapshot_interval(mut self, pixels: usize) -> Self {
        self.snapshot_interval = pixels.max(1);
        self
    }

    /// Use an existing abort flag, e.g. one shared with a UI thread.
    pub fn with_abort_handle(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
    }

    /// The validation failure that aborted the session, if any.
    pub fn error(&self) -> Option<&SceneError> {
        self.error.as_ref()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            pixels_done: self.pixels_done,
            pixels_total: self.settings.pixel_count(),
        }
    }

    /// Advance the render by one pixel.
    ///
    /// The first call validates the scene. A validation failure moves the
    /// session to `Aborted` and is returned as an error; later calls keep
    /// returning `Ok(Aborted)`. Calls after a terminal state do nothing.
    pub fn step(&mut self) -> RenderResult<RenderState> {
        if self.state == RenderState::NotStarted {
            self.start()?;
        }
        if self.state != RenderState::Rendering {
            return Ok(self.state);
        }

        if self.abort.is_aborted() {
            log::info!(
                "Render aborted after {} of {} pixels",
                self.pixels_done,
                self.settings.pixel_count()
            );
            self.state = RenderState::Aborted;
            return Ok(self.state);
        }

        let Some(rays) = self.rays.as_mut() else {
            self.state = RenderState::Aborted;
            return Ok(self.state);
        };

        if let Some(primary) = rays.next() {
            let color = trace_ray(&self.scene, &primary.ray, self.settings.ambient);
            let row = self.settings.height - 1 - primary.y;
            self.framebuffer.set(primary.x, row, color);
            self.pixels_done += 1;
        }

        if rays.len() == 0 {
            self.finish();
        }

        Ok(self.state)
    }

    /// Step until the session is finished or aborted.
    ///
    /// `sink` is shown the framebuffer every `snapshot_interval` pixels and
    /// once more at the end.
    pub fn run(&mut self, sink: &mut dyn DisplaySink) -> RenderResult<RenderState> {
        loop {
            let state = self.step()?;
            if state.is_terminal() {
                break;
            }
            if self.pixels_done % self.snapshot_interval == 0 {
                sink.show(&self.framebuffer, self.progress());
            }
        }

        sink.show(&self.framebuffer, self.progress());
        Ok(self.state)
    }

    fn start(&mut self) -> RenderResult<()> {
        self.state = RenderState::Validating;

        match prepare(&self.scene, &self.settings) {
            Ok(rays) => {
                log::info!(
                    "Rendering {}x{}: {} objects, {} lights",
                    self.settings.width,
                    self.settings.height,
                    self.scene.objects.len(),
                    self.scene.lights.len()
                );
                self.rays = Some(rays);
                self.started = Some(Instant::now());
                self.state = RenderState::Rendering;
                Ok(())
            }
            Err(err) => {
                log::error!("Cannot render scene: {}", err);
                self.error = Some(err.clone());
                self.state = RenderState::Aborted;
                Err(err)
            }
        }
    }

    fn finish(&mut self) {
        self.state = RenderState::Finished;
        if let Some(started) = self.started {
            log::info!(
                "Rendered {} pixels in {:.2?}",
                self.pixels_done,
                started.elapsed()
            );
        }
    }
}

/// Render a scene start to finish without progress reporting.
pub fn render(scene: Scene, settings: RenderSettings) -> RenderResult<Framebuffer> {
    let mut session = RenderSession::new(scene, settings);
    session.run(&mut |_: &Framebuffer, _: Progress| {})?;
    Ok(session.into_framebuffer())
}
