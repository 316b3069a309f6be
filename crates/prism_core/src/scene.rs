//! Scene classification.
//!
//! Groups the parser's generic elements into typed cameras, lights and
//! drawable objects. Classification never fails: elements that cannot be
//! used are skipped and reported as [`ClassificationWarning`]s. Whether the
//! result is renderable (one camera, at least one object) is decided by the
//! renderer, not here.

use thiserror::Error;

use crate::entity::{Camera, EntityError, Light, Object};
use crate::sdl::Element;

/// A `#`-directive line kept verbatim. Not interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub text: String,
    pub line: usize,
}

/// A classified scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub directives: Vec<Directive>,
    pub cameras: Vec<Camera>,
    pub lights: Vec<Light>,
    pub objects: Vec<Object>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The camera, if there is exactly one.
    pub fn camera(&self) -> Option<&Camera> {
        match self.cameras.as_slice() {
            [camera] => Some(camera),
            _ => None,
        }
    }

    /// Total number of classified entities (directives excluded).
    pub fn entity_count(&self) -> usize {
        self.cameras.len() + self.lights.len() + self.objects.len()
    }
}

/// A skipped element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationWarning {
    #[error("line {line}: unknown element `{tag}` skipped")]
    UnknownTag { tag: String, line: usize },

    #[error("line {line}: invalid {tag} skipped: {source}")]
    InvalidEntity {
        tag: String,
        line: usize,
        #[source]
        source: EntityError,
    },
}

/// Output of [`classify`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub scene: Scene,
    pub warnings: Vec<ClassificationWarning>,
}

impl Classification {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Sort parsed elements into a [`Scene`], preserving source order within
/// each group.
pub fn classify(elements: Vec<Element>) -> Classification {
    let mut result = Classification::default();

    for element in elements {
        let Element {
            tag, params, line, ..
        } = element;

        if tag.starts_with('#') {
            result.scene.directives.push(Directive { text: tag, line });
            continue;
        }

        let outcome = match tag.as_str() {
            "camera" => Camera::from_params(params).map(|c| result.scene.cameras.push(c)),
            "light_source" => Light::from_params(params).map(|l| result.scene.lights.push(l)),
            _ => match Object::from_tag(&tag, params) {
                Some(object) => object.map(|o| result.scene.objects.push(o)),
                None => {
                    let warning = ClassificationWarning::UnknownTag { tag, line };
                    log::warn!("{}", warning);
                    result.warnings.push(warning);
                    continue;
                }
            },
        };

        if let Err(source) = outcome {
            let warning = ClassificationWarning::InvalidEntity { tag, line, source };
            log::warn!("{}", warning);
            result.warnings.push(warning);
        }
    }

    let scene = &result.scene;
    log::debug!(
        "Classified {} entities ({} cameras, {} lights, {} objects), {} directives",
        scene.entity_count(),
        scene.cameras.len(),
        scene.lights.len(),
        scene.objects.len(),
        scene.directives.len()
    );

    result
}
