use crate::bodies::Material;
use crate::collision::Filter;
use crate::core::BodyHandle;
use crate::math::{Aabb, Transform};
use crate::shapes::{Shape, ShapeType};

/// Parameters used to create a fixture
#[derive(Debug, Clone)]
pub struct FixtureDef {
    /// The collision shape, cloned into the fixture
    pub shape: Shape,

    /// Surface properties
    pub material: Material,

    /// Sensors detect overlap but never produce contact points
    pub is_sensor: bool,

    /// Collision filtering data
    pub filter: Filter,
}

impl FixtureDef {
    /// Creates a definition with the default material and filter
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::default(),
            is_sensor: false,
            filter: Filter::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.material.friction = friction;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.material.restitution = restitution;
        self
    }

    pub fn with_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

/// A shape attached to a body, with material and filtering data
#[derive(Debug, Clone)]
pub struct Fixture {
    body: BodyHandle,
    shape: Shape,
    material: Material,
    pub(crate) is_sensor: bool,
    pub(crate) filter: Filter,
}

impl Fixture {
    /// Creates a fixture owned by `body`
    pub fn new(body: BodyHandle, def: FixtureDef) -> Self {
        Self {
            body,
            shape: def.shape,
            material: def.material,
            is_sensor: def.is_sensor,
            filter: def.filter,
        }
    }

    /// Gets the owning body
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Gets the collision shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Gets the type of the collision shape
    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// Gets the surface material
    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn friction(&self) -> f32 {
        self.material.friction
    }

    pub fn restitution(&self) -> f32 {
        self.material.restitution
    }

    pub fn is_sensor(&self) -> bool {
        self.is_sensor
    }

    /// Gets the collision filtering data
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Computes the world space bounding box of one child primitive
    pub fn compute_aabb(&self, transform: &Transform, child_index: usize) -> Aabb {
        self.shape.compute_aabb(transform, child_index)
    }
}
