//! Loading scene files.
//!
//! Reads scene text, parses it and classifies the result in one call.

use std::path::Path;

use thiserror::Error;

use crate::scene::{classify, Classification};
use crate::sdl::{parse_scene, SyntaxError};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load and classify a scene file.
///
/// # Example
///
/// ```ignore
/// use prism_core::loader::load_scene_file;
///
/// let classified = load_scene_file("scenes/basic.pov")?;
/// println!("{} objects", classified.scene.objects.len());
/// ```
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> LoadResult<Classification> {
    let path = path.as_ref();
    log::info!("Loading scene: {}", path.display());

    let content = std::fs::read_to_string(path)?;
    load_scene_from_string(&content)
}

/// Parse and classify scene text.
pub fn load_scene_from_string(content: &str) -> LoadResult<Classification> {
    let elements = parse_scene(content)?;
    Ok(classify(elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_string() {
        let classified = load_scene_from_string(
            "camera { location <0,0,-5> angle 60 look_at <0,0,0> }\nsphere { <0,0,0>, 1 }",
        )
        .unwrap();
        assert_eq!(classified.scene.cameras.len(), 1);
        assert_eq!(classified.scene.objects.len(), 1);
    }

    #[test]
    fn test_syntax_error_passes_through() {
        let err = load_scene_from_string("sphere { <0,0,0> 1 }").unwrap_err();
        match err {
            LoadError::Syntax(e) => assert_eq!(e.line, 1),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_scene_file("/nonexistent/prism/scene.pov").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("prism_loader_{}.pov", std::process::id()));
        std::fs::write(&path, "light_source { <1, 2, 3>, rgb <1, 1, 1> }").unwrap();

        let classified = load_scene_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(classified.scene.lights.len(), 1);
    }

    #[test]
    fn test_bundled_scenes() {
        let basic = load_scene_from_string(include_str!("../../../scenes/basic.pov")).unwrap();
        assert_eq!(basic.scene.directives.len(), 1);
        assert_eq!(basic.scene.cameras.len(), 1);
        assert_eq!(basic.scene.objects.len(), 1);
        assert!(basic.warnings.is_empty());

        let floor = load_scene_from_string(include_str!("../../../scenes/floor.pov")).unwrap();
        assert_eq!(floor.scene.lights.len(), 2);
        assert!(floor.scene.lights[1].is_parallel());
        assert_eq!(floor.scene.objects.len(), 4);
        assert_eq!(floor.scene.objects[0].reflection(), Some(0.2));
        assert!(floor.warnings.is_empty());
    }
}
