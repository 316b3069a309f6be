//! Typed scene entities built from parser elements.
//!
//! Each entity keeps the parameter tree it was built from and exposes typed
//! accessors for the values the renderer needs. Entities are immutable once
//! constructed.

use prism_math::{Color, MathError, Normalize, Vector3};
use thiserror::Error;

use crate::sdl::ParamList;

/// Why a parameter tree could not become an entity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    #[error("missing {expected} `{key}`")]
    MissingParameter {
        key: &'static str,
        expected: &'static str,
    },

    #[error("degenerate `{key}`: {source}")]
    Degenerate {
        key: &'static str,
        #[source]
        source: MathError,
    },
}

pub type EntityResult<T> = Result<T, EntityError>;

/// Surface color used when an object carries no pigment.
pub const DEFAULT_PIGMENT: Color = Color::WHITE;

fn require_vector(params: &ParamList, key: &'static str) -> EntityResult<Vector3> {
    params.vector(&[key]).ok_or(EntityError::MissingParameter {
        key,
        expected: "vector",
    })
}

fn require_number(params: &ParamList, key: &'static str) -> EntityResult<f64> {
    params.number(&[key]).ok_or(EntityError::MissingParameter {
        key,
        expected: "number",
    })
}

fn require_color(params: &ParamList, key: &'static str) -> EntityResult<Color> {
    params.color(&[key]).ok_or(EntityError::MissingParameter {
        key,
        expected: "color",
    })
}

/// Pigment of an object: `texture { pigment { rgb } }` first, then a bare
/// `pigment { rgb }`, otherwise [`DEFAULT_PIGMENT`].
fn pigment_of(params: &ParamList) -> Color {
    params
        .color(&["texture", "pigment", "rgb"])
        .or_else(|| params.color(&["pigment", "rgb"]))
        .unwrap_or(DEFAULT_PIGMENT)
}

fn reflection_of(params: &ParamList) -> Option<f64> {
    params
        .number(&["texture", "finish", "reflection"])
        .or_else(|| params.number(&["finish", "reflection"]))
}

/// The scene camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    params: ParamList,
    location: Vector3,
    look_at: Vector3,
    angle: f64,
    up: Vector3,
    orthographic: bool,
}

impl Camera {
    pub fn from_params(params: ParamList) -> EntityResult<Self> {
        let location = require_vector(&params, "location")?;
        let look_at = require_vector(&params, "look_at")?;
        let angle = require_number(&params, "angle")?;
        let up = params.vector(&["up"]).unwrap_or(Vector3::Y);
        let orthographic = params.contains(&["orthographic"]);

        Ok(Self {
            params,
            location,
            look_at,
            angle,
            up,
            orthographic,
        })
    }

    pub fn location(&self) -> Vector3 {
        self.location
    }

    pub fn look_at(&self) -> Vector3 {
        self.look_at
    }

    /// Horizontal field of view in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Sky vector, +Y unless the scene gives one.
    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }
}

/// A point light.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    params: ParamList,
    location: Vector3,
    color: Color,
    parallel: bool,
}

impl Light {
    pub fn from_params(params: ParamList) -> EntityResult<Self> {
        let location = require_vector(&params, "location")?;
        let color = require_color(&params, "rgb")?;
        let parallel = params.contains(&["parallel"]);

        Ok(Self {
            params,
            location,
            color,
            parallel,
        })
    }

    pub fn location(&self) -> Vector3 {
        self.location
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the scene marked this light `parallel`.
    ///
    /// Recorded only; the tracer treats every light as a point light.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    params: ParamList,
    center: Vector3,
    radius: f64,
    pigment: Color,
}

impl Sphere {
    pub fn from_params(params: ParamList) -> EntityResult<Self> {
        let center = require_vector(&params, "location")?;
        let radius = require_number(&params, "radius")?;
        let pigment = pigment_of(&params);

        Ok(Self {
            params,
            center,
            radius,
            pigment,
        })
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pigment(&self) -> Color {
        self.pigment
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }
}

/// An infinite plane `{ P : dot(normal, P) + distance = 0 }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    params: ParamList,
    normal: Vector3,
    distance: f64,
    pigment: Color,
}

impl Plane {
    /// The normal is normalized here; a zero normal is rejected.
    pub fn from_params(params: ParamList) -> EntityResult<Self> {
        let normal = require_vector(&params, "normal")?
            .try_normalized()
            .map_err(|source| EntityError::Degenerate {
                key: "normal",
                source,
            })?;
        let distance = require_number(&params, "distance")?;
        let pigment = pigment_of(&params);

        Ok(Self {
            params,
            normal,
            distance,
            pigment,
        })
    }

    /// Unit normal.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance term; the plane passes through `-distance * normal`.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn pigment(&self) -> Color {
        self.pigment
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    params: ParamList,
    vertices: [Vector3; 3],
    pigment: Color,
}

impl Triangle {
    pub fn from_params(params: ParamList) -> EntityResult<Self> {
        let vertices = [
            require_vector(&params, "v0")?,
            require_vector(&params, "v1")?,
            require_vector(&params, "v2")?,
        ];
        let pigment = pigment_of(&params);

        Ok(Self {
            params,
            vertices,
            pigment,
        })
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        self.vertices
    }

    pub fn pigment(&self) -> Color {
        self.pigment
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }
}

/// A drawable scene object.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Object {
    /// Build an object for a drawable tag. Returns `None` for other tags.
    pub fn from_tag(tag: &str, params: ParamList) -> Option<EntityResult<Self>> {
        let object = match tag {
            "sphere" => Sphere::from_params(params).map(Object::Sphere),
            "plane" => Plane::from_params(params).map(Object::Plane),
            "triangle" => Triangle::from_params(params).map(Object::Triangle),
            _ => return None,
        };
        Some(object)
    }

    /// Scene tag of this object.
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Sphere(_) => "sphere",
            Object::Plane(_) => "plane",
            Object::Triangle(_) => "triangle",
        }
    }

    pub fn params(&self) -> &ParamList {
        match self {
            Object::Sphere(s) => s.params(),
            Object::Plane(p) => p.params(),
            Object::Triangle(t) => t.params(),
        }
    }

    pub fn pigment(&self) -> Color {
        match self {
            Object::Sphere(s) => s.pigment(),
            Object::Plane(p) => p.pigment(),
            Object::Triangle(t) => t.pigment(),
        }
    }

    /// `finish { reflection }` if present. Parsed and kept, not traced.
    pub fn reflection(&self) -> Option<f64> {
        reflection_of(self.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdl::ParamValue;

    fn vector(x: f64, y: f64, z: f64) -> ParamValue {
        ParamValue::Vector(Vector3::new(x, y, z))
    }

    fn pigment_block(color: Color) -> ParamValue {
        ParamValue::List(ParamList::new().with("rgb", ParamValue::Color(color)))
    }

    #[test]
    fn test_camera_defaults() {
        let params = ParamList::new()
            .with("location", vector(0.0, 1.0, -5.0))
            .with("angle", ParamValue::Number(60.0))
            .with("look_at", vector(0.0, 0.0, 0.0));

        let camera = Camera::from_params(params).unwrap();
        assert_eq!(camera.location(), Vector3::new(0.0, 1.0, -5.0));
        assert_eq!(camera.angle(), 60.0);
        assert_eq!(camera.up(), Vector3::Y);
        assert!(!camera.is_orthographic());
    }

    #[test]
    fn test_camera_missing_angle() {
        let params = ParamList::new()
            .with("location", vector(0.0, 0.0, 0.0))
            .with("look_at", vector(0.0, 0.0, 1.0));

        let err = Camera::from_params(params).unwrap_err();
        assert_eq!(
            err,
            EntityError::MissingParameter {
                key: "angle",
                expected: "number"
            }
        );
    }

    #[test]
    fn test_light() {
        let params = ParamList::new()
            .with("location", vector(10.0, 10.0, -20.0))
            .with("rgb", ParamValue::Color(Color::WHITE))
            .with("parallel", ParamValue::Marker);

        let light = Light::from_params(params).unwrap();
        assert_eq!(light.color(), Color::WHITE);
        assert!(light.is_parallel());
    }

    #[test]
    fn test_sphere_pigment_lookup_order() {
        let red = Color::new(1.0, 0.0, 0.0);
        let green = Color::new(0.0, 1.0, 0.0);
        let base = ParamList::new()
            .with("location", vector(0.0, 0.0, 0.0))
            .with("radius", ParamValue::Number(1.0));

        // No pigment at all
        let plain = Sphere::from_params(base.clone()).unwrap();
        assert_eq!(plain.pigment(), DEFAULT_PIGMENT);

        // Bare pigment
        let bare = Sphere::from_params(base.clone().with("pigment", pigment_block(green))).unwrap();
        assert_eq!(bare.pigment(), green);

        // Texture wins over bare pigment
        let texture = ParamList::new().with("pigment", pigment_block(red));
        let both = base
            .with("pigment", pigment_block(green))
            .with("texture", ParamValue::List(texture));
        assert_eq!(Sphere::from_params(both).unwrap().pigment(), red);
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let params = ParamList::new()
            .with("normal", vector(0.0, 3.0, 0.0))
            .with("distance", ParamValue::Number(-1.0));

        let plane = Plane::from_params(params).unwrap();
        assert_eq!(plane.normal(), Vector3::Y);
        assert_eq!(plane.distance(), -1.0);
    }

    #[test]
    fn test_plane_zero_normal_rejected() {
        let params = ParamList::new()
            .with("normal", vector(0.0, 0.0, 0.0))
            .with("distance", ParamValue::Number(0.0));

        assert_eq!(
            Plane::from_params(params).unwrap_err(),
            EntityError::Degenerate {
                key: "normal",
                source: MathError::DivideByZero
            }
        );
    }

    #[test]
    fn test_object_from_tag() {
        let params = ParamList::new()
            .with("v0", vector(0.0, 0.0, 0.0))
            .with("v1", vector(1.0, 0.0, 0.0))
            .with("v2", vector(0.0, 1.0, 0.0));

        let object = Object::from_tag("triangle", params.clone()).unwrap().unwrap();
        assert_eq!(object.kind(), "triangle");
        assert_eq!(object.pigment(), DEFAULT_PIGMENT);
        assert!(object.reflection().is_none());

        assert!(Object::from_tag("camera", params.clone()).is_none());
        assert!(Object::from_tag("sphere", params).unwrap().is_err());
    }

    #[test]
    fn test_reflection() {
        let finish = ParamList::new().with("reflection", ParamValue::Number(0.25));
        let texture = ParamList::new().with("finish", ParamValue::List(finish));
        let params = ParamList::new()
            .with("location", vector(0.0, 0.0, 0.0))
            .with("radius", ParamValue::Number(1.0))
            .with("texture", ParamValue::List(texture));

        let object = Object::from_tag("sphere", params).unwrap().unwrap();
        assert_eq!(object.reflection(), Some(0.25));
    }
}
