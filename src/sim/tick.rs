//! Per-frame simulation step
//!
//! Owns the session state (phase, scene) and advances it once per frame:
//! gravity, spin, then collision resolution.

use super::collision::{Contact, move_ball};
use super::state::Scene;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to start
    TitleScreen,
    /// Physics running
    Running,
    /// Physics frozen, scene still drawn
    Paused,
}

/// Input commands for a single frame
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Start a new session from the title screen
    pub start: bool,
    /// Toggle between running and paused
    pub toggle_pause: bool,
    /// Leave the session for the title screen
    pub back_to_title: bool,
    /// Whether the window has focus; physics only runs when focused
    pub focused: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            start: false,
            toggle_pause: false,
            back_to_title: false,
            focused: true,
        }
    }
}

/// Session state threaded through every frame
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub settings: Settings,
    pub scene: Scene,
    /// Sessions started so far, mixed into the scene seed
    pub sessions: u64,
    /// Simulated frames in the current session
    pub time_ticks: u64,
    /// Frames in the current session that had a collision
    pub bounce_frames: u64,
    /// Result of the most recent simulated frame
    pub last_contact: Contact,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let scene = Scene::generate(settings.seed, settings.ball_start);
        Self {
            phase: GamePhase::TitleScreen,
            settings,
            scene,
            sessions: 0,
            time_ticks: 0,
            bounce_frames: 0,
            last_contact: Contact::Free,
        }
    }

    /// Build a fresh scene and start running
    pub fn start_session(&mut self) {
        let seed = self.settings.seed.wrapping_add(self.sessions);
        self.scene = Scene::generate(seed, self.settings.ball_start);
        self.sessions += 1;
        self.time_ticks = 0;
        self.bounce_frames = 0;
        self.last_contact = Contact::Free;
        self.phase = GamePhase::Running;
        log::info!("Session {} started (seed {})", self.sessions, seed);
    }
}

/// Frame time actually simulated: never negative, never above `max`
pub fn clamp_frame_time(raw: f32, max: f32) -> f32 {
    raw.clamp(0.0, max)
}

/// Advance the session by one frame of `dt` seconds
///
/// Returns true when the ball hit something this frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    if input.back_to_title && state.phase != GamePhase::TitleScreen {
        state.phase = GamePhase::TitleScreen;
        log::info!("Back to title screen");
        return false;
    }

    match state.phase {
        GamePhase::TitleScreen => {
            if input.start {
                state.start_session();
            }
            return false;
        }
        GamePhase::Running if input.toggle_pause => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
        }
        GamePhase::Paused if input.toggle_pause => {
            state.phase = GamePhase::Running;
            log::info!("Resumed");
        }
        _ => {}
    }

    if state.phase != GamePhase::Running || !input.focused || dt <= 0.0 {
        return false;
    }

    let ball = &mut state.scene.ball;
    ball.motion.y -= state.settings.gravity * dt;
    ball.apply_spin();

    let contact = move_ball(ball, &state.scene.obstacles, dt);
    state.time_ticks += 1;
    state.last_contact = contact;
    if contact.occurred() {
        state.bounce_frames += 1;
    }
    contact.occurred()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{EPSILON, MAX_FRAME_TIME};
    use crate::renderer::color;
    use crate::sim::state::{Ball, Obstacle};
    use glam::Vec3;

    fn running_state() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.start_session();
        state
    }

    fn floor_only(state: &mut GameState, ball: Ball) {
        state.scene.obstacles = vec![Obstacle::wall(
            Vec3::new(0.0, -10.5, 0.0),
            Vec3::new(10.0, 0.5, 10.0),
            color::PINK,
        )];
        state.scene.ball = ball;
    }

    #[test]
    fn test_title_to_running() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(state.phase, GamePhase::TitleScreen);

        let before = state.scene.ball.pos;
        assert!(!tick(&mut state, &TickInput::default(), 0.016));
        assert_eq!(state.scene.ball.pos, before);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.sessions, 1);
    }

    #[test]
    fn test_pause_toggle_and_title() {
        let mut state = running_state();
        let toggle = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, 0.016);
        assert_eq!(state.phase, GamePhase::Paused);

        let frozen = state.scene.ball.pos;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.scene.ball.pos, frozen);

        tick(&mut state, &toggle, 0.016);
        assert_eq!(state.phase, GamePhase::Running);

        let back = TickInput {
            back_to_title: true,
            ..Default::default()
        };
        tick(&mut state, &back, 0.016);
        assert_eq!(state.phase, GamePhase::TitleScreen);
    }

    #[test]
    fn test_unfocused_or_zero_dt_is_frozen() {
        let mut state = running_state();
        let before = state.scene.ball.clone();
        let unfocused = TickInput {
            focused: false,
            ..Default::default()
        };
        assert!(!tick(&mut state, &unfocused, 0.016));
        assert!(!tick(&mut state, &TickInput::default(), 0.0));
        assert_eq!(state.scene.ball, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_gravity_in_free_flight() {
        let mut state = running_state();
        floor_only(&mut state, Ball::new(Vec3::ZERO, 0.75, Vec3::ZERO, color::BLUE));

        assert!(!tick(&mut state, &TickInput::default(), 0.1));
        let ball = &state.scene.ball;
        assert!((ball.motion.y + 1.0).abs() < 1e-6);
        assert!((ball.pos.y + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_resting_ball_reports_bounce() {
        let mut state = running_state();
        floor_only(
            &mut state,
            Ball::new(Vec3::new(0.0, -9.5, 0.0), 0.75, Vec3::new(0.0, -5.0, 0.0), color::BLUE),
        );

        assert!(tick(&mut state, &TickInput::default(), 0.1));
        let ball = &state.scene.ball;
        assert!(ball.pos.y >= -10.5 + 0.5 + 0.75 - EPSILON);
        assert!(ball.motion.y > 0.0);
        assert_eq!(state.last_contact, Contact::Resting);
        assert_eq!(state.bounce_frames, 1);
    }

    #[test]
    fn test_ball_stays_in_arena() {
        let mut state = running_state();
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), MAX_FRAME_TIME);
        }
        let pos = state.scene.ball.pos;
        assert!(pos.is_finite());
        assert!(pos.abs().max_element() < crate::sim::state::WALL_DISTANCE);
        assert!(state.bounce_frames > 0);
        // Mostly in flight, not pinned to a surface
        assert!(state.bounce_frames * 4 < state.time_ticks);
    }

    #[test]
    fn test_resting_ball_lifts_off() {
        let mut state = running_state();
        floor_only(
            &mut state,
            Ball::new(Vec3::new(0.0, -9.5, 0.0), 0.75, Vec3::new(0.0, -5.0, 0.0), color::BLUE),
        );

        assert!(tick(&mut state, &TickInput::default(), 0.1));
        for _ in 0..10 {
            assert!(!tick(&mut state, &TickInput::default(), 0.016));
        }
        assert_eq!(state.bounce_frames, 1);
        assert!(state.scene.ball.pos.y > -9.25);
    }

    #[test]
    fn test_clamp_frame_time() {
        assert_eq!(clamp_frame_time(0.5, MAX_FRAME_TIME), MAX_FRAME_TIME);
        assert_eq!(clamp_frame_time(0.01, MAX_FRAME_TIME), 0.01);
        assert_eq!(clamp_frame_time(-1.0, MAX_FRAME_TIME), 0.0);
    }
}
