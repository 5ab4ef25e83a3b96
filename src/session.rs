//! Frame driver
//!
//! A `Session` sits between the platform and the simulation: it holds the
//! latest input snapshot, clamps the frame delta, runs one tick per frame and
//! clears edge-triggered keys once they have been seen.

use crate::renderer::{DrawSurface, draw_frame};
use crate::settings::{AutopilotSettings, Settings, SettingsError};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Running totals across every game played in the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub playing_frames: u64,
    pub games_started: u32,
    pub games_lost: u32,
    pub enemies_killed: u64,
    pub best_score: u64,
}

impl SessionStats {
    fn record(&mut self, event: &GameEvent, state: &GameState) {
        match *event {
            GameEvent::PhaseChanged {
                to: GamePhase::Playing,
                ..
            } => self.games_started += 1,
            GameEvent::PhaseChanged {
                to: GamePhase::GameOver,
                ..
            } => {
                self.games_lost += 1;
                self.best_score = self.best_score.max(state.player.score);
            }
            GameEvent::EnemyKilled { .. } => self.enemies_killed += 1,
            _ => {}
        }
    }
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: TickInput,
    max_frame_dt: f32,
    stats: SessionStats,
}

impl Session {
    /// Start a session on Title. Settings are validated first.
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!(
            "Session created: seed {}, playfield {}x{}",
            seed,
            settings.playfield.width,
            settings.playfield.height
        );
        Ok(Self {
            state: GameState::with_playfield(seed, settings.playfield),
            input: TickInput::default(),
            max_frame_dt: settings.max_frame_dt,
            stats: SessionStats::default(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Replace the held-key snapshot. A pending confirm press survives until
    /// the next `advance`.
    pub fn set_input(&mut self, input: TickInput) {
        let confirm = self.input.confirm || input.confirm;
        self.input = TickInput { confirm, ..input };
    }

    /// Latch a confirm press for the next frame
    pub fn press_confirm(&mut self) {
        self.input.confirm = true;
    }

    /// Simulate one frame of `dt` seconds, clamped into [0, max_frame_dt]
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.max(0.0).min(self.max_frame_dt);
        let events = tick(&mut self.state, &self.input, dt);

        // Clear one-shot inputs after processing
        self.input.confirm = false;

        self.stats.frames += 1;
        if self.state.phase == GamePhase::Playing {
            self.stats.playing_frames += 1;
        }
        for event in &events {
            self.stats.record(event, &self.state);
        }
        events
    }

    /// Draw the current frame
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        draw_frame(&self.state, surface);
    }
}

/// Demo-mode pilot: confirms through menus, sweeps the bottom of the screen
/// with the fire key held and slows down near enemy bullets.
#[derive(Debug, Clone)]
pub struct Autopilot {
    settings: AutopilotSettings,
    elapsed: f32,
    menu_frames: u32,
}

impl Autopilot {
    pub fn new(settings: AutopilotSettings) -> Self {
        Self {
            settings,
            elapsed: 0.0,
            menu_frames: 0,
        }
    }

    /// Input for the next frame
    pub fn input_for(&mut self, state: &GameState, dt: f32) -> TickInput {
        match state.phase {
            GamePhase::Title | GamePhase::GameOver => {
                self.menu_frames += 1;
                if self.menu_frames >= self.settings.confirm_delay_frames {
                    self.menu_frames = 0;
                    self.elapsed = 0.0;
                    return TickInput {
                        confirm: true,
                        ..Default::default()
                    };
                }
                TickInput::default()
            }
            GamePhase::Playing => {
                self.elapsed += dt;
                self.steer(state)
            }
        }
    }

    fn steer(&self, state: &GameState) -> TickInput {
        let field = state.playfield;
        let player = &state.player;
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };

        // Closest live enemy bullet, if any
        let threat = state
            .enemy_bullets
            .iter_active()
            .map(|(_, b)| b.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .partial_cmp(&b.distance_squared(player.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .filter(|pos| pos.distance(player.pos) < self.settings.focus_radius);

        let target_x = if let Some(bullet) = threat {
            input.focus = true;
            // Sidestep away from the bullet
            let away = if bullet.x > player.pos.x { -1.0 } else { 1.0 };
            player.pos.x + away * field.width
        } else {
            let phase = std::f32::consts::TAU * self.elapsed / self.settings.sweep_period;
            let half_span = field.width / 2.0 - 60.0;
            field.width / 2.0 + half_span * phase.sin()
        };

        let dx = target_x - player.pos.x;
        input.left = dx < -4.0;
        input.right = dx > 4.0;

        let home = field.player_spawn();
        input.down = player.pos.y < home.y - 4.0;
        input.up = player.pos.y > home.y + 4.0;

        input
    }
}
