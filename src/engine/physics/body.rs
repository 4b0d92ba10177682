use super::collision::CollisionLayer;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    ccd: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            gravity_scale: if body_type == RigidBodyType::Dynamic {
                1.0
            } else {
                0.0
            },
            can_sleep: body_type != RigidBodyType::Dynamic,
            ccd: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic)
    }

    /// Kinematic position-based body (moved by gameplay code only)
    pub fn new_kinematic_position_based() -> Self {
        Self::with_type(RigidBodyType::KinematicPositionBased)
    }

    /// Kinematic velocity-based body (keeps its velocity, ignores gravity)
    pub fn new_kinematic_velocity_based() -> Self {
        Self::with_type(RigidBodyType::KinematicVelocityBased)
    }

    /// Fixed (static) body
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed)
    }

    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Gravity multiplier (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Continuous collision detection for fast movers
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Lock rotation (characters never tip over)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes |= LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .ccd_enabled(self.ccd)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    layer: CollisionLayer,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Real,
    active_events: ActiveEvents,
    active_collision_types: ActiveCollisionTypes,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            layer: CollisionLayer::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
            active_collision_types: ActiveCollisionTypes::default(),
        }
    }

    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Collision layer this collider belongs to
    pub fn layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Sensor colliders report intersections but never push back
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Body-type pairs this collider reports contacts for. Kinematic and
    /// fixed pairs are skipped unless one side opts in here.
    pub fn active_collision_types(mut self, types: ActiveCollisionTypes) -> Self {
        self.active_collision_types = types;
        self
    }

    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.layer.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(self.active_events)
            .active_collision_types(self.active_collision_types)
            .build()
    }
}

/// Common body and collider configurations for level objects
pub mod presets {
    use super::*;

    /// Player gravity multiplier, platformers want a snappier fall than real gravity
    pub const PLAYER_GRAVITY_SCALE: Real = 3.0;

    /// Player character body (dynamic, rotation locked, continuous collision)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(PLAYER_GRAVITY_SCALE)
            .can_sleep(false)
            .ccd(true)
            .build()
    }

    /// Player collider (box shape, no friction so walls don't grab)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Player)
            .friction(0.0)
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Static body for level geometry and trigger regions
    pub fn static_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Walkable ground (box shape)
    pub fn ground_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Ground)
            .friction(0.3)
            .build()
    }

    /// Trigger region on one of the trigger layers (KillZone, Hazard, Goal)
    pub fn trigger_collider(width: Real, height: Real, layer: CollisionLayer) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(layer)
            .sensor(true)
            .build()
    }

    /// Enemy body, position driven by gameplay code
    pub fn enemy_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(x, y)
            .build()
    }

    /// Enemy collider (box shape on the enemy layer)
    pub fn enemy_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Enemy)
            .build()
    }

    /// Projectile body, flies at whatever velocity it was launched with
    pub fn projectile_body(x: Real, y: Real, vx: Real, vy: Real) -> RigidBody {
        let mut body = BodyBuilder::new_kinematic_velocity_based()
            .position(x, y)
            .ccd(true)
            .can_sleep(false)
            .build();
        body.set_linvel(vector![vx, vy], false);
        body
    }

    /// Projectile sensor. Both the level and the enemies sit on fixed or
    /// kinematic bodies, so those pairs are switched on explicitly.
    pub fn projectile_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .layer(CollisionLayer::Projectile)
            .sensor(true)
            .active_collision_types(ActiveCollisionTypes::all())
            .build()
    }
}
