//! Prism Core - scene description parsing and scene classification.
//!
//! This crate provides:
//!
//! - **SDL parsing**: scene text to a list of tagged parameter trees
//! - **Scene entities**: `Camera`, `Light`, `Sphere`, `Plane`, `Triangle`
//! - **Classification**: grouping entities into a `Scene`
//! - **Render settings**: image size and ambient level, loadable from JSON
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene_file;
//!
//! let classified = load_scene_file("scene.pov")?;
//! for warning in &classified.warnings {
//!     eprintln!("{}", warning);
//! }
//! println!("{} objects", classified.scene.objects.len());
//! ```

pub mod entity;
pub mod loader;
pub mod scene;
pub mod sdl;
pub mod settings;

// Re-export commonly used types
pub use entity::{Camera, EntityError, Light, Object, Plane, Sphere, Triangle};
pub use loader::{load_scene_file, load_scene_from_string, LoadError, LoadResult};
pub use scene::{classify, Classification, ClassificationWarning, Directive, Scene};
pub use sdl::{parse_scene, Element, ParamList, ParamValue, SyntaxError};
pub use settings::{RenderSettings, SettingsError};
