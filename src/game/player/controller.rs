// Player character controller
//
// Two entry points per frame: `frame_update` once per rendered frame with the
// sampled intent, `fixed_update` once per simulation step. Everything the
// controller does to the world goes through `PhysicsBackend`; everything it
// wants the rest of the game to know comes out of `drain_events` or the
// `GameFlow` callbacks.

use super::combat::{CombatResolver, DamageSink};
use super::config::ControllerConfig;
use super::events::CharacterEvent;
use super::ground::GroundProbe;
use super::health::Health;
use super::movement::{MovementPhase, MovementState, MovementTuning};
use super::respawn::{respawn_target, RespawnSequencer};
use crate::core::error::ControllerError;
use crate::engine::input::FrameIntent;
use crate::engine::physics::{ColliderHandle, ColliderTag, PhysicsBackend, RigidBodyHandle};
use crate::engine::timers::DeferredQueue;
use crate::core::math::facing_offset;
use crate::game::lifecycle::{GameFlow, LifecycleNotifier};
use crate::game::projectile::ShotRequest;
use glam::Vec2;

/// Continuations the controller schedules against simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerTask {
    EndInvulnerability,
    ReportGameOver,
}

pub struct PlayerController {
    config: ControllerConfig,
    body: RigidBodyHandle,
    collider: ColliderHandle,

    probe: GroundProbe,
    movement: MovementState,
    combat: CombatResolver,
    health: Health,
    sequencer: RespawnSequencer,
    lifecycle: LifecycleNotifier,

    checkpoint: Option<Vec2>,
    pending: DeferredQueue<ControllerTask>,
    events: Vec<CharacterEvent>,
    shots: Vec<ShotRequest>,
}

impl PlayerController {
    /// Build a controller for an existing body and its collider
    ///
    /// Fails if either handle is unknown to the physics world or the collider
    /// belongs to another body.
    pub fn new<P: PhysicsBackend>(
        config: ControllerConfig,
        body: RigidBodyHandle,
        collider: ColliderHandle,
        physics: &P,
    ) -> Result<Self, ControllerError> {
        if !physics.has_body(body) {
            return Err(ControllerError::MissingBody(body));
        }
        if !physics.has_collider(collider) {
            return Err(ControllerError::MissingCollider(collider));
        }
        if physics.collider_parent(collider) != Some(body) {
            return Err(ControllerError::DetachedCollider { body, collider });
        }

        let probe = GroundProbe::new(
            config.ground_probe_inset,
            config.ground_probe_distance,
            config.ground_mask(),
        );
        let combat = CombatResolver {
            range: config.attack_range,
            damage: config.attack_damage,
            offset: config.attack_offset,
            enemy_mask: config.enemy_mask(),
        };

        log::info!(
            "Player controller ready: {} hp, {} air jumps",
            config.max_health,
            config.max_air_jumps
        );

        Ok(Self {
            movement: MovementState::new(config.jump_buffer_time),
            health: Health::new(config.max_health),
            checkpoint: config.respawn_checkpoint,
            probe,
            combat,
            sequencer: RespawnSequencer::new(),
            lifecycle: LifecycleNotifier::new(),
            pending: DeferredQueue::new(),
            events: Vec::new(),
            shots: Vec::new(),
            config,
            body,
            collider,
        })
    }

    /// Per rendered frame: store intent, flip facing, latch jump, attack, shoot
    pub fn frame_update<P: PhysicsBackend>(
        &mut self,
        intent: &FrameIntent,
        physics: &P,
        enemies: &mut dyn DamageSink,
    ) {
        if !self.health.is_alive() {
            return;
        }

        self.movement.set_horizontal_axis(intent.horizontal_axis);
        if self.movement.update_facing() {
            self.events.push(CharacterEvent::FacingChanged {
                facing_right: self.movement.facing_right(),
            });
        }

        if intent.jump_edge {
            self.movement.press_jump();
        }

        if intent.attack_edge {
            self.attack(physics, enemies);
        }

        if intent.shoot_edge {
            self.shoot(physics);
        }
    }

    fn attack<P: PhysicsBackend>(&mut self, physics: &P, enemies: &mut dyn DamageSink) {
        let Some(origin) = physics.translation(self.body) else {
            log::warn!("Attack skipped, player body {:?} is gone", self.body);
            return;
        };

        let report = self
            .combat
            .resolve(physics, origin, self.movement.facing_right(), enemies);
        log::debug!("Attack at {} hit {} enemies", report.center, report.hits.len());
        self.events.push(CharacterEvent::Attacked { hits: report.hits });
    }

    fn shoot<P: PhysicsBackend>(&mut self, physics: &P) {
        let Some(position) = physics.translation(self.body) else {
            log::warn!("Shot skipped, player body {:?} is gone", self.body);
            return;
        };

        let facing_right = self.movement.facing_right();
        let direction = if facing_right { Vec2::X } else { Vec2::NEG_X };
        let origin = position + facing_offset(self.config.shot_offset, facing_right);

        self.shots.push(ShotRequest {
            origin,
            velocity: direction * self.config.shot_speed,
            lifetime: self.config.shot_lifetime,
            damage: self.config.shot_damage,
        });
        self.events.push(CharacterEvent::Fired {
            origin,
            facing_right,
        });
    }

    /// Per simulation step: timers, ground probe, movement, jump, fall check
    pub fn fixed_update<P: PhysicsBackend>(
        &mut self,
        dt: f32,
        physics: &mut P,
        flow: &mut dyn GameFlow,
    ) {
        for task in self.pending.advance(dt) {
            match task {
                ControllerTask::EndInvulnerability => {
                    // A death during the window cancels the rest of the respawn
                    if self.health.is_alive() {
                        self.finish_respawn(physics);
                    }
                }
                ControllerTask::ReportGameOver => {
                    self.lifecycle.report_game_over(flow);
                }
            }
        }

        if !self.health.is_alive() {
            return;
        }

        let grounded = self.probe.is_grounded(&*physics, self.collider);
        let outcome = self.movement.tick(grounded, dt, &self.tuning());

        let velocity = physics.linear_velocity(self.body).unwrap_or_default();
        let mut velocity = Vec2::new(outcome.horizontal_velocity, velocity.y);

        if outcome.landed {
            self.events.push(CharacterEvent::Landed);
        }

        if let Some(kind) = outcome.jump {
            log::debug!("Jump granted ({kind:?})");
            velocity.y = 0.0;
            physics.set_linear_velocity(self.body, velocity);
            physics.apply_impulse(self.body, Vec2::new(0.0, self.config.jump_impulse));
            self.events.push(CharacterEvent::Jumped { kind });
        } else {
            physics.set_linear_velocity(self.body, velocity);
        }

        if let Some(position) = physics.translation(self.body) {
            if position.y < self.config.fall_y_threshold && !self.sequencer.is_respawning() {
                log::info!("Fell below {} at {position}", self.config.fall_y_threshold);
                self.respawn(physics);
            }
        }
    }

    /// React to the player starting to touch a tagged collider
    pub fn on_trigger_enter<P: PhysicsBackend>(
        &mut self,
        tag: ColliderTag,
        physics: &mut P,
        flow: &mut dyn GameFlow,
    ) {
        if !self.health.is_alive() {
            return;
        }

        match tag {
            ColliderTag::KillZone => {
                self.respawn(physics);
            }
            ColliderTag::Goal => {
                if self.lifecycle.report_level_won(flow) {
                    self.events.push(CharacterEvent::ReachedGoal);
                }
            }
            ColliderTag::Hazard { damage } => {
                if self.sequencer.is_respawning() {
                    log::debug!("Hazard ignored while respawning");
                } else {
                    self.take_damage(damage);
                }
            }
            ColliderTag::Ground | ColliderTag::Enemy(_) => {}
        }
    }

    /// Apply damage. The hurt event fires even for zero damage or when
    /// already dead; death fires once and schedules the game-over report.
    pub fn take_damage(&mut self, amount: i32) {
        let outcome = self.health.take_damage(amount);
        log::debug!("Player health {} -> {}", outcome.previous, outcome.current);
        self.events.push(CharacterEvent::Hurt {
            amount: amount.max(0),
            health: outcome.current,
        });

        if outcome.died {
            log::info!("Player died");
            self.events.push(CharacterEvent::Died);
            self.pending
                .schedule(self.config.death_delay, ControllerTask::ReportGameOver);
        }
    }

    /// Returns the health actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }

    /// Teleport to the checkpoint and start the invulnerability window
    ///
    /// Returns false when dead or when a respawn is already in flight.
    pub fn respawn<P: PhysicsBackend>(&mut self, physics: &mut P) -> bool {
        if !self.health.is_alive() {
            return false;
        }
        if !self.sequencer.try_begin() {
            log::debug!("Respawn already in progress");
            return false;
        }

        let current = physics.translation(self.body).unwrap_or_default();
        let target = respawn_target(
            self.checkpoint,
            current,
            self.config.respawn_fallback_height,
        );

        physics.set_linear_velocity(self.body, Vec2::ZERO);
        physics.set_angular_velocity(self.body, 0.0);
        self.movement.reset_for_respawn();
        physics.teleport(self.body, target);

        log::info!("Respawning at {target}");
        self.events.push(CharacterEvent::RespawnStarted { position: target });

        let window = self.config.respawn_invulnerability_time;
        if window > 0.0 {
            physics.set_collider_enabled(self.collider, false);
            self.pending
                .schedule(window, ControllerTask::EndInvulnerability);
        } else {
            self.finish_respawn(physics);
        }
        true
    }

    fn finish_respawn<P: PhysicsBackend>(&mut self, physics: &mut P) {
        physics.set_collider_enabled(self.collider, true);
        if self.sequencer.complete() {
            log::info!("Respawn complete");
            self.events.push(CharacterEvent::Respawned);
        }
    }

    pub fn set_checkpoint(&mut self, checkpoint: Vec2) {
        log::info!("Checkpoint set to {checkpoint}");
        self.checkpoint = Some(checkpoint);
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<CharacterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take the shots requested since the last call, for the caller to spawn
    pub fn take_shots(&mut self) -> Vec<ShotRequest> {
        std::mem::take(&mut self.shots)
    }

    fn tuning(&self) -> MovementTuning {
        MovementTuning {
            move_speed: self.config.move_speed,
            max_air_jumps: self.config.max_air_jumps,
            coyote_time: self.config.coyote_time,
        }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn movement(&self) -> &MovementState {
        &self.movement
    }

    pub fn phase(&self) -> MovementPhase {
        self.movement.phase(self.config.max_air_jumps)
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_respawning(&self) -> bool {
        self.sequencer.is_respawning()
    }

    pub fn completed_respawns(&self) -> u32 {
        self.sequencer.completed()
    }

    pub fn checkpoint(&self) -> Option<Vec2> {
        self.checkpoint
    }
}
