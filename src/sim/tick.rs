//! Per-frame simulation tick
//!
//! Phase machine plus the fixed-order PLAYING step:
//! input -> avatar -> spawner -> pools -> collisions -> score/phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::enemy::Enemy;
use super::pool::Pool;
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState, Playfield};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire key held
    pub fire: bool,
    /// Focus key held
    pub focus: bool,
    /// Confirm key pressed this frame (edge-triggered)
    pub confirm: bool,
}

impl TickInput {
    /// Directional keys as a vector with components in {-1, 0, 1}.
    /// Right wins over left and down over up when both are held.
    pub fn direction(&self) -> Vec2 {
        let x = if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        };
        let y = if self.down {
            1.0
        } else if self.up {
            -1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Advance the game by one frame of `dt` seconds (negative dt is treated as 0)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let dt = dt.max(0.0);
    let mut events = Vec::new();
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Title => {
            if input.confirm {
                state.start_new_game();
                set_phase(state, GamePhase::Playing, &mut events);
            }
        }
        GamePhase::Playing => {
            events = simulation_step(state, input, dt);
        }
        GamePhase::GameOver => {
            if input.confirm {
                state.start_new_game();
                set_phase(state, GamePhase::Title, &mut events);
            }
        }
    }

    events
}

/// One PLAYING frame in fixed order. Does not check the current phase.
pub fn simulation_step(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let field = state.playfield;

    // 1. Avatar movement (uses last frame's focus flag) and shooting
    state.player.update(dt, input.direction(), &field);
    if input.fire {
        state.player.shoot(&mut state.player_bullets);
    }

    // 2. Focus applies from the next frame's movement
    state.player.set_focus(input.focus);

    // 3. Spawner
    state.spawn_timer += dt;
    if state.spawn_timer >= SPAWN_INTERVAL {
        state.spawn_timer = 0.0;
        let x = state.roll_spawn_x();
        if let Some(slot) = state.spawn_enemy(Vec2::new(x, SPAWN_Y)) {
            log::debug!("enemy spawned in slot {} at x={}", slot, x);
            events.push(GameEvent::EnemySpawned { slot });
        }
    }

    // 4. Player bullets
    for (_, bullet) in state.player_bullets.iter_active_mut() {
        bullet.update(dt, &field);
    }

    // 5. Enemies move, then fire
    advance_enemies(&mut state.enemies, &mut state.enemy_bullets, dt, &field);

    // 6. Enemy bullets
    for (_, bullet) in state.enemy_bullets.iter_active_mut() {
        bullet.update(dt, &field);
    }

    // 7. Collisions, then apply their consequences here
    let report = resolve_collisions(
        &mut state.player_bullets,
        &mut state.enemies,
        &state.enemy_bullets,
        &state.player,
    );

    for slot in report.enemies_killed {
        state.player.award(ENEMY_KILL_SCORE);
        log::debug!("enemy in slot {} destroyed, score {}", slot, state.player.score);
        events.push(GameEvent::EnemyKilled {
            slot,
            award: ENEMY_KILL_SCORE,
        });
    }

    if let Some(bullet) = report.player_hit_by {
        events.push(GameEvent::PlayerHit { bullet });
        set_phase(state, GamePhase::GameOver, &mut events);
    }

    events
}

/// Move every live enemy, then let it fire from where it ended up.
/// An enemy culled by this update still gets its due burst.
fn advance_enemies(
    enemies: &mut Pool<Enemy>,
    enemy_bullets: &mut Pool<Projectile>,
    dt: f32,
    field: &Playfield,
) {
    for (_, enemy) in enemies.iter_active_mut() {
        enemy.update(dt, field);
        enemy.fire(dt, enemy_bullets);
    }
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    state.phase = to;
    log::info!(
        "{:?} -> {:?} (score {}, tick {})",
        from,
        to,
        state.player.score,
        state.time_ticks
    );
    events.push(GameEvent::PhaseChanged { from, to });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &confirm(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_title_waits_for_confirm() {
        let mut state = GameState::new(1);
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Title);

        let events = tick(&mut state, &confirm(), DT);
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Title,
                to: GamePhase::Playing
            }]
        );
    }

    #[test]
    fn test_title_ignores_gameplay_input() {
        let mut state = GameState::new(1);
        let input = TickInput {
            fire: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.live_entities(), 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_direction_priority() {
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(1.0, 1.0));
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(-1.0, -1.0));
        assert_eq!(TickInput::default().direction(), Vec2::ZERO);
    }

    #[test]
    fn test_spawner_cadence() {
        let mut state = playing(5);
        let idle = TickInput::default();

        let mut spawned = Vec::new();
        for _ in 0..4 {
            for event in simulation_step(&mut state, &idle, 0.25) {
                if let GameEvent::EnemySpawned { slot } = event {
                    spawned.push(slot);
                }
            }
        }
        assert_eq!(spawned, vec![0]);
        assert_eq!(state.spawn_timer, 0.0);

        // Spawned at y = -50 then moved in the same frame
        let enemy = state.enemies.get(0).unwrap();
        assert!(enemy.active);
        assert_eq!(enemy.pos.y, SPAWN_Y + ENEMY_DESCENT_SPEED * 0.25);
        assert!((100.0..=700.0).contains(&enemy.pos.x));
    }

    #[test]
    fn test_spawner_drops_when_pool_full() {
        let mut state = playing(5);
        for _ in 0..ENEMY_CAPACITY {
            state.spawn_enemy(Vec2::new(400.0, 100.0));
        }
        let events = simulation_step(&mut state, &TickInput::default(), SPAWN_INTERVAL);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        );
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_focus_takes_effect_next_frame() {
        let mut state = playing(5);
        let input = TickInput {
            left: true,
            focus: true,
            ..Default::default()
        };
        simulation_step(&mut state, &input, 0.1);
        assert!((state.player.pos.x - 370.0).abs() < 1e-3);
        assert!(state.player.focused);
        simulation_step(&mut state, &input, 0.1);
        assert!((state.player.pos.x - 358.0).abs() < 1e-3);
    }

    #[test]
    fn test_fire_key_shoots() {
        let mut state = playing(5);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        simulation_step(&mut state, &input, DT);
        assert_eq!(state.player_bullets.active_count(), 2);
        // Bullets moved in the same frame
        let bullet = state.player_bullets.get(0).unwrap();
        assert!((bullet.pos.y - (485.0 - 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_kill_awards_score_once() {
        let mut state = playing(5);
        let slot = state.spawn_enemy(Vec2::new(400.0, 200.0)).unwrap();

        let mut kills = 0;
        for hit in 0..ENEMY_HEALTH {
            let (_, bullet) = state.player_bullets.allocate_mut().unwrap();
            bullet.activate(Vec2::new(400.0, 200.0), Vec2::ZERO);
            let events = simulation_step(&mut state, &TickInput::default(), 0.0);
            let enemy = state.enemies.get(slot).unwrap();
            if hit < ENEMY_HEALTH - 1 {
                assert!(enemy.active);
                assert_eq!(state.player.score, 0);
            }
            kills += events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
                .count();
        }
        assert_eq!(kills, 1);
        assert!(!state.enemies.get(slot).unwrap().active);
        assert_eq!(state.player.score, ENEMY_KILL_SCORE);
    }

    #[test]
    fn test_bullet_on_enemy_one_damage_per_frame() {
        let mut state = playing(5);
        let slot = state.spawn_enemy(Vec2::new(300.0, 200.0)).unwrap();
        let (b, bullet) = state.player_bullets.allocate_mut().unwrap();
        bullet.activate(Vec2::new(300.0, 200.0), Vec2::ZERO);

        simulation_step(&mut state, &TickInput::default(), 0.0);
        assert!(!state.player_bullets.get(b).unwrap().active);
        assert_eq!(state.enemies.get(slot).unwrap().health, ENEMY_HEALTH - 1);
    }

    #[test]
    fn test_enemy_leaving_screen_still_fires() {
        let mut state = playing(5);
        let field = state.playfield;
        let slot = state.spawn_enemy(Vec2::new(400.0, 649.0)).unwrap();
        {
            let enemy = state.enemies.get_mut(slot).unwrap();
            enemy.vel = Vec2::new(0.0, 600.0);
            enemy.fire_timer = 1.49;
        }

        advance_enemies(&mut state.enemies, &mut state.enemy_bullets, DT, &field);

        let enemy = state.enemies.get(slot).unwrap();
        assert!(enemy.pos.y > field.height + ENEMY_EXIT_MARGIN);
        assert!(!enemy.active);
        assert_eq!(state.enemy_bullets.active_count(), ENEMY_BURST_COUNT);
    }

    #[test]
    fn test_burst_starts_from_moved_position() {
        let mut state = playing(5);
        let field = state.playfield;
        let slot = state.spawn_enemy(Vec2::new(400.0, 100.0)).unwrap();
        state.enemies.get_mut(slot).unwrap().fire_timer = 1.49;

        advance_enemies(&mut state.enemies, &mut state.enemy_bullets, 0.02, &field);

        let moved = state.enemies.get(slot).unwrap().pos;
        assert!((moved.y - 101.0).abs() < 1e-4);
        for (_, bullet) in state.enemy_bullets.iter_active() {
            assert_eq!(bullet.pos, moved);
        }

        // Through the full step the bullets also travel one frame
        let mut state = playing(5);
        let slot = state.spawn_enemy(Vec2::new(400.0, 100.0)).unwrap();
        state.enemies.get_mut(slot).unwrap().fire_timer = 1.49;
        simulation_step(&mut state, &TickInput::default(), 0.02);
        let first = state.enemy_bullets.get(0).unwrap();
        assert!(first.active);
        assert!((first.pos - Vec2::new(403.0, 101.0)).length() < 1e-3);
    }

    #[test]
    fn test_player_hit_ends_game() {
        let mut state = playing(5);
        let pos = state.player.pos;
        let (slot, bullet) = state.enemy_bullets.allocate_mut().unwrap();
        bullet.activate(pos, Vec2::new(0.0, 150.0));

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::PlayerHit { bullet: slot }));
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::GameOver
        }));
        // Bullet is not consumed
        assert!(state.enemy_bullets.get(slot).unwrap().active);
    }

    #[test]
    fn test_game_over_freezes_until_confirm() {
        let mut state = playing(5);
        state.phase = GamePhase::GameOver;
        state.spawn_enemy(Vec2::new(400.0, 100.0));
        let before = state.enemies.get(0).unwrap().pos;

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.enemies.get(0).unwrap().pos, before);

        let events = tick(&mut state, &confirm(), DT);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.live_entities(), 0);
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::GameOver,
                to: GamePhase::Title
            }]
        );
    }

    #[test]
    fn test_restart_resets_score() {
        let mut state = playing(5);
        state.player.award(700);
        state.phase = GamePhase::GameOver;
        tick(&mut state, &confirm(), DT);
        tick(&mut state, &confirm(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut state = playing(5);
        state.spawn_enemy(Vec2::new(400.0, 100.0));
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, -1.0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
        assert_eq!(state.enemies.get(0).unwrap().pos, Vec2::new(400.0, 100.0));
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99999);
        let mut b = playing(99999);
        let input = TickInput {
            fire: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.score, b.player.score);
        assert_eq!(a.live_entities(), b.live_entities());
        let xs_a: Vec<f32> = a.enemies.iter_active().map(|(_, e)| e.pos.x).collect();
        let xs_b: Vec<f32> = b.enemies.iter_active().map(|(_, e)| e.pos.x).collect();
        assert_eq!(xs_a, xs_b);
    }

    proptest! {
        #[test]
        fn prop_enemy_bullet_on_player_always_ends_game(
            vx in -5000.0f32..5000.0,
            vy in -5000.0f32..5000.0,
        ) {
            let mut state = playing(3);
            let pos = state.player.pos;
            let (_, bullet) = state.enemy_bullets.allocate_mut().unwrap();
            bullet.activate(pos, Vec2::new(vx, vy));
            tick(&mut state, &TickInput::default(), 0.0);
            prop_assert_eq!(state.phase, GamePhase::GameOver);
        }
    }
}
