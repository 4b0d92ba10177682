use glam::Vec2;
use rapier2d::parry::query::ShapeCastOptions;
use rapier2d::parry::shape::{Ball, Cuboid};
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::backend::PhysicsBackend;
use super::collision::{ColliderTag, CollisionEventQueue, EntityId};
use crate::core::math::{to_vec2, to_vector};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Smallest extent a shrunk probe shape may have
const MIN_PROBE_EXTENT: Real = 0.01;

/// Earth gravity, the player body scales it up
pub const DEFAULT_GRAVITY: Real = -9.81;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Query pipeline for shape casts and overlap tests
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Contacts reported during the last step
    collision_event_queue: CollisionEventQueue,

    /// Game entity behind each body
    body_to_entity: HashMap<RigidBodyHandle, EntityId>,

    /// Gameplay meaning of tagged colliders
    collider_tags: HashMap<ColliderHandle, ColliderTag>,
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, DEFAULT_GRAVITY])
    }

    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = crate::engine::clock::FIXED_TIMESTEP;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            body_to_entity: HashMap::new(),
            collider_tags: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Rebuild the query acceleration structure without stepping
    ///
    /// Needed when colliders were added or moved and a query must see them
    /// before the next step.
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.rigid_body_set, &self.collider_set);
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Add a collider and remember what it means to gameplay code
    pub fn add_tagged_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
        tag: ColliderTag,
    ) -> ColliderHandle {
        let handle = self.add_collider(collider, parent_handle);
        self.collider_tags.insert(handle, tag);
        handle
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.rigid_body_set.get(handle) {
            for collider in body.colliders() {
                self.collider_tags.remove(collider);
            }
        }
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.body_to_entity.remove(&handle);
    }

    /// Associate a game entity ID with a rigid body
    pub fn set_entity_mapping(&mut self, body_handle: RigidBodyHandle, entity_id: EntityId) {
        self.body_to_entity.insert(body_handle, entity_id);
    }

    /// Get the entity ID associated with a rigid body
    pub fn get_entity_id(&self, body_handle: RigidBodyHandle) -> Option<EntityId> {
        self.body_to_entity.get(&body_handle).copied()
    }

    pub fn collider_tag(&self, handle: ColliderHandle) -> Option<ColliderTag> {
        self.collider_tags.get(&handle).copied()
    }

    /// Tags of everything `collider` started touching during the last step
    pub fn triggers_for(&self, collider: ColliderHandle) -> Vec<ColliderTag> {
        self.collision_event_queue
            .events()
            .iter()
            .filter_map(|event| event.started_with(collider))
            .filter_map(|other| self.collider_tag(other))
            .collect()
    }

    fn query_filter(&self, mask: Group) -> QueryFilter<'static> {
        QueryFilter::default()
            .groups(InteractionGroups::new(Group::ALL, mask))
            .exclude_sensors()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn has_body(&self, body: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(body)
    }

    fn has_collider(&self, collider: ColliderHandle) -> bool {
        self.collider_set.contains(collider)
    }

    fn collider_parent(&self, collider: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(collider).and_then(|c| c.parent())
    }

    fn translation(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(body)
            .map(|b| to_vec2(b.translation()))
    }

    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(body).map(|b| to_vec2(b.linvel()))
    }

    fn set_linear_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.set_linvel(to_vector(velocity), true);
        }
    }

    fn set_angular_velocity(&mut self, body: RigidBodyHandle, angvel: f32) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.set_angvel(angvel, true);
        }
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.apply_impulse(to_vector(impulse), true);
        }
    }

    fn teleport(&mut self, body: RigidBodyHandle, position: Vec2) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.set_translation(to_vector(position), true);
        }
    }

    fn set_collider_enabled(&mut self, collider: ColliderHandle, enabled: bool) {
        if let Some(c) = self.collider_set.get_mut(collider) {
            c.set_enabled(enabled);
        }
    }

    fn cast_bounds_down(
        &self,
        collider: ColliderHandle,
        inset: Vec2,
        distance: f32,
        mask: Group,
    ) -> bool {
        let Some(c) = self.collider_set.get(collider) else {
            return false;
        };

        let aabb = c.compute_aabb();
        let extents = aabb.extents();
        let half_extents = vector![
            (extents.x - inset.x).max(MIN_PROBE_EXTENT) / 2.0,
            (extents.y - inset.y).max(MIN_PROBE_EXTENT) / 2.0
        ];
        let center = aabb.center();
        let probe = Cuboid::new(half_extents);
        let probe_pos = Isometry::translation(center.x, center.y);

        let mut filter = self.query_filter(mask).exclude_collider(collider);
        if let Some(parent) = c.parent() {
            filter = filter.exclude_rigid_body(parent);
        }

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &probe_pos,
                &vector![0.0, -1.0],
                &probe,
                ShapeCastOptions::with_max_time_of_impact(distance.max(0.0)),
                filter,
            )
            .is_some()
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: Group) -> Vec<EntityId> {
        let shape = Ball::new(radius.max(0.0));
        let shape_pos = Isometry::translation(center.x, center.y);
        let mut found = Vec::new();

        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            self.query_filter(mask),
            |handle| {
                let entity = self
                    .collider_set
                    .get(handle)
                    .and_then(|c| c.parent())
                    .and_then(|body| self.get_entity_id(body));
                if let Some(id) = entity {
                    if !found.contains(&id) {
                        found.push(id);
                    }
                }
                true // keep searching
            },
        );

        found
    }
}
