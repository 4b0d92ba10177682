use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::input::{FrameIntent, InputConfig, InputSampler};
use engine::physics::{PhysicsBackend, PhysicsWorld};
use game::enemy::{EnemyEvent, EnemyRoster};
use game::level::{build_demo_level, Level};
use game::player::{
    events::dispatch, CharacterEvent, ControllerConfig, LogEventSink, MovementPhase,
    PlayerController,
};
use game::projectile::{ProjectileEvent, ProjectileRoster};
use game::session::GameSession;

const CONFIG_PATH: &str = "config/controller.ron";

/// Entity ids handed to enemies start here
const FIRST_ENEMY_ID: u64 = 1;

/// Health restored when the checkpoint activates
const CHECKPOINT_HEAL: i32 = 2;

/// Everything that is rebuilt on retry
struct Game {
    physics: PhysicsWorld,
    enemies: EnemyRoster,
    shots: ProjectileRoster,
    player: PlayerController,
    level: Level,
    log_sink: LogEventSink,
    /// Last phase handed to the animation side
    shown_phase: MovementPhase,
}

impl Game {
    fn new(config: ControllerConfig) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        let mut enemies = EnemyRoster::new(FIRST_ENEMY_ID);
        let level = build_demo_level(&mut physics, &mut enemies);
        let player =
            PlayerController::new(config, level.player_body, level.player_collider, &physics)?;
        let shown_phase = player.phase();

        Ok(Self {
            physics,
            enemies,
            shots: ProjectileRoster::new(),
            player,
            level,
            log_sink: LogEventSink,
            shown_phase,
        })
    }

    fn frame(&mut self, intent: &FrameIntent, steps: u32, session: &mut GameSession) {
        self.player
            .frame_update(intent, &self.physics, &mut self.enemies);
        for shot in self.player.take_shots() {
            self.shots.spawn(&mut self.physics, shot);
        }

        let dt = session.clock().fixed_timestep();
        for _ in 0..steps {
            self.player.fixed_update(dt, &mut self.physics, &mut *session);
            self.physics.step();

            for tag in self.physics.triggers_for(self.player.collider()) {
                self.player
                    .on_trigger_enter(tag, &mut self.physics, &mut *session);
            }

            self.shots
                .update(dt, &mut self.physics, &mut self.enemies);
            self.enemies.update(dt, &mut self.physics);
            self.activate_checkpoint();

            if session.state().is_finished() {
                break;
            }
        }

        let events = self.player.drain_events();
        dispatch(&events, &mut [&mut self.log_sink]);
        if events
            .iter()
            .any(|e| matches!(e, CharacterEvent::Hurt { .. }))
        {
            info!(
                "Health bar at {:.0}%",
                self.player.health().fraction() * 100.0
            );
        }

        let phase = self.player.phase();
        if phase != self.shown_phase {
            debug!("Animation: {}", phase.animation_name());
            self.shown_phase = phase;
        }

        for event in self.enemies.drain_events() {
            match event {
                EnemyEvent::Hurt { id, health } => info!("Enemy {id} hit, {health} health left"),
                EnemyEvent::Died { id } => info!("Enemy {id} defeated"),
            }
        }
        for event in self.shots.drain_events() {
            match event {
                ProjectileEvent::Hit { id, enemy: Some(enemy) } => {
                    debug!("Shot {id} hit enemy {enemy}")
                }
                ProjectileEvent::Hit { id, enemy: None } => debug!("Shot {id} hit the level"),
                ProjectileEvent::Expired { id } => debug!("Shot {id} expired"),
            }
        }

        if !events.is_empty() {
            self.log_status();
        }
    }

    /// One-line debug overlay, logged whenever the character's state changed
    fn log_status(&self) {
        let health = self.player.health();
        let movement = self.player.movement();
        debug!(
            "hp {}/{} alive={} respawning={} respawns={} | {:?} air_jumps={} coyote={:.2} buffer={:.2} | enemies {}/{} shots {}",
            health.current(),
            health.max(),
            self.player.is_alive(),
            self.player.is_respawning(),
            self.player.completed_respawns(),
            self.player.phase(),
            movement.air_jumps_used(),
            movement.coyote_timer(),
            movement.jump_buffer_timer(),
            self.enemies.alive_count(),
            self.enemies.count(),
            self.shots.count(),
        );
    }

    fn activate_checkpoint(&mut self) {
        let checkpoint = self.level.checkpoint;
        if self.player.checkpoint() == Some(checkpoint) {
            return;
        }
        let passed = self
            .physics
            .translation(self.player.body())
            .is_some_and(|p| p.x >= checkpoint.x);
        if passed {
            self.player.set_checkpoint(checkpoint);
            let restored = self.player.heal(CHECKPOINT_HEAL);
            if restored > 0 {
                info!(
                    "Checkpoint restored {restored} health ({:.0}%)",
                    self.player.health().fraction() * 100.0
                );
            }
        }
    }
}

fn load_config() -> ControllerConfig {
    let path = Path::new(CONFIG_PATH);
    match ControllerConfig::load(path) {
        Ok(config) => {
            info!("Loaded controller config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Using default controller config: {e}");
            ControllerConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Platformer...");

    let config = load_config();
    let mut game = Game::new(config.clone())?;
    let mut session = GameSession::new();
    let mut sampler = InputSampler::new(InputConfig::default());

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Platformer")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                sampler.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                sampler.process_mouse_button(state, button);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never arrive
                sampler.reset();
            }
            Event::AboutToWait => {
                let steps = session.clock_mut().begin_frame();
                let intent = sampler.sample();

                if intent.pause_edge {
                    if session.state().is_finished() {
                        match Game::new(config.clone()) {
                            Ok(fresh) => {
                                game = fresh;
                                session.retry();
                            }
                            Err(e) => {
                                log::error!("Failed to rebuild level: {e}");
                                elwt.exit();
                            }
                        }
                    } else {
                        session.toggle_pause();
                    }
                }

                if !session.clock().is_paused() {
                    game.frame(&intent, steps, &mut session);
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
