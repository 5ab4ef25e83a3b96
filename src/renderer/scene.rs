//! Per-phase scene composition

use glam::Vec2;

use super::surface::{DrawSurface, colors};
use crate::sim::{GamePhase, GameState};

pub const TITLE: &str = "DANMAKU";
pub const CONTROLS: &str = "Z: shoot   Shift: focus   Arrows: move";

/// Draw the current phase. Reads the state only.
pub fn draw_frame<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    match state.phase {
        GamePhase::Title => draw_title(state, surface),
        GamePhase::Playing => draw_game(state, surface),
        GamePhase::GameOver => draw_game_over(state, surface),
    }
}

fn draw_title<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let cx = state.playfield.width / 2.0;
    surface.text(TITLE, Vec2::new(cx - 100.0, 150.0), 40.0, colors::TEXT);
    surface.text(
        "Press ENTER to start",
        Vec2::new(cx - 120.0, 300.0),
        24.0,
        colors::TEXT_PROMPT,
    );
    surface.text(
        CONTROLS,
        Vec2::new(cx - 200.0, 400.0),
        20.0,
        colors::TEXT_ACCENT,
    );
}

fn draw_game<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let player = &state.player;
    let body = if player.focused {
        colors::PLAYER_FOCUSED
    } else {
        colors::PLAYER
    };
    surface.circle(player.pos, player.radius, body);
    surface.circle(player.pos, player.hit_radius, colors::HITBOX);

    for (_, bullet) in state.player_bullets.iter_active() {
        surface.circle(bullet.pos, bullet.radius, colors::PLAYER_BULLET);
    }
    for (_, enemy) in state.enemies.iter_active() {
        surface.circle(enemy.pos, enemy.radius, colors::ENEMY);
    }
    for (_, bullet) in state.enemy_bullets.iter_active() {
        surface.circle(bullet.pos, bullet.radius, colors::ENEMY_BULLET);
    }

    // HUD
    surface.text(
        &format!("Score: {}", player.score),
        Vec2::new(10.0, 10.0),
        20.0,
        colors::TEXT,
    );
    surface.text(
        &format!("Power: {:.2}", player.power),
        Vec2::new(10.0, 40.0),
        20.0,
        colors::TEXT_ACCENT,
    );
}

fn draw_game_over<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let center = state.playfield.center();
    surface.text(
        "GAME OVER",
        center + Vec2::new(-80.0, -50.0),
        40.0,
        colors::TEXT_ALERT,
    );
    surface.text(
        &format!("Final score: {}", state.player.score),
        center + Vec2::new(-100.0, 0.0),
        30.0,
        colors::TEXT,
    );
    surface.text(
        "Press ENTER to restart",
        center + Vec2::new(-120.0, 80.0),
        24.0,
        colors::TEXT_PROMPT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};

    #[test]
    fn test_title_screen() {
        let state = GameState::new(1);
        let mut list = DrawList::new();
        draw_frame(&state, &mut list);
        assert_eq!(list.circle_count(), 0);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec![TITLE, "Press ENTER to start", CONTROLS]);
    }

    #[test]
    fn test_one_circle_per_live_entity() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.spawn_enemy(Vec2::new(300.0, 100.0));
        state.spawn_enemy(Vec2::new(500.0, 100.0));
        state.player.shoot(&mut state.player_bullets);

        let mut list = DrawList::new();
        draw_frame(&state, &mut list);
        // body + hitbox + 2 bullets + 2 enemies
        assert_eq!(list.circle_count(), 6);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["Score: 0", "Power: 1.00"]);
    }

    #[test]
    fn test_focused_player_color() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.player.set_focus(true);
        let mut list = DrawList::new();
        draw_frame(&state, &mut list);
        match &list.commands[0] {
            DrawCommand::Circle { color, radius, .. } => {
                assert_eq!(*color, colors::PLAYER_FOCUSED);
                assert_eq!(*radius, 8.0);
            }
            other => panic!("expected player circle, got {:?}", other),
        }
    }

    #[test]
    fn test_game_over_shows_final_score() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.player.award(1200);
        let mut list = DrawList::new();
        draw_frame(&state, &mut list);
        assert!(list.texts().any(|t| t == "Final score: 1200"));
        assert_eq!(list.circle_count(), 0);
    }
}
