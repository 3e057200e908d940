//! Per-frame simulation tick
//!
//! One call advances the game by one rendered frame and drives the phase
//! machine: start, play, collision, game over, restart and quit.

use glam::Vec2;

use super::camera::compute_delta;
use super::state::{GamePhase, SimulationState};

/// Input events, in the order they arrived this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyEscape,
    /// Mouse click at a screen pixel position
    Click(Vec2),
    /// Window gained (true) or lost (false) focus
    FocusChanged(bool),
}

impl InputEvent {
    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit | InputEvent::KeyEscape)
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    /// Pointer position in screen pixels; `None` leaves the player still
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Pointer resting at the screen center
    pub fn centered(screen: Vec2) -> Self {
        Self {
            events: Vec::new(),
            pointer: Some((screen / 2.0).floor()),
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    if state.phase == GamePhase::Quit {
        return;
    }

    // Quit wins over everything else queued this frame
    if input.events.iter().any(InputEvent::is_quit) {
        set_phase(state, GamePhase::Quit);
        return;
    }

    for event in &input.events {
        if let InputEvent::FocusChanged(active) = *event {
            state.active = active;
        }
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Start => start(state),
        GamePhase::Playing => play(state, input),
        GamePhase::Collided => {
            state.phase_ticks = state.phase_ticks.saturating_sub(1);
            if state.phase_ticks == 0 {
                state.phase_ticks = state.settings.game_over_ticks();
                set_phase(state, GamePhase::GameOver);
            }
        }
        GamePhase::GameOver => game_over(state, input),
        GamePhase::Restarting => restarting(state, input),
        GamePhase::Quit => {}
    }
}

fn set_phase(state: &mut SimulationState, phase: GamePhase) {
    if state.phase != phase {
        log::info!("Phase {:?} -> {:?}", state.phase, phase);
        state.phase = phase;
    }
}

fn start(state: &mut SimulationState) {
    state.ring.fill();
    state.runs += 1;
    log::info!(
        "Run {} started (seed {}, {} segments)",
        state.runs,
        state.seed,
        state.ring.len()
    );
    set_phase(state, GamePhase::Playing);
}

/// Steer from the pointer and move the camera forward one step
fn drift(state: &mut SimulationState, pointer: Option<Vec2>) {
    state.color.step(&mut state.rng);
    if let Some(pointer) = pointer {
        let player = &mut state.player;
        let (_, lateral) = compute_delta(pointer, state.screen, player.lateral, &player.bounds);
        player.lateral = lateral;
    }
    state.player.traveled += state.player.speed;
    state.ring.advance(state.player.forward_z());
}

fn play(state: &mut SimulationState, input: &TickInput) {
    if !state.active {
        return;
    }

    state.player.speed += state.settings.acceleration;
    drift(state, input.pointer);

    let player = state.player;
    let anchor = state.ring.spawn_anchor();
    state
        .obstacles
        .try_spawn(player.speed, anchor, &mut state.rng);
    let hit = state.obstacles.step(player.lateral, player.forward_z());
    state.obstacles.retire();

    if hit {
        let score = player.traveled as u64;
        state.score = Some(score);
        log::info!("Collision! Score: {score}");
        state.phase_ticks = state.settings.collision_hold_ticks();
        set_phase(state, GamePhase::Collided);
    }
}

/// Whether a click lands in the "quit" half of the screen (above the
/// principal diagonal). `None` for clicks outside the screen.
pub fn click_quits(click: Vec2, screen: Vec2) -> Option<bool> {
    let inside = click.cmpge(Vec2::ZERO).all() && click.cmplt(screen).all();
    inside.then(|| click.x * screen.y > click.y * screen.x)
}

fn game_over(state: &mut SimulationState, input: &TickInput) {
    for event in &input.events {
        if let InputEvent::Click(pos) = *event {
            match click_quits(pos, state.screen) {
                Some(true) => {
                    set_phase(state, GamePhase::Quit);
                    return;
                }
                Some(false) => {
                    begin_restart(state);
                    return;
                }
                None => log::debug!("Ignoring click outside the screen at {pos:?}"),
            }
        }
    }

    drift(state, input.pointer);

    state.phase_ticks = state.phase_ticks.saturating_sub(1);
    if state.phase_ticks == 0 {
        log::info!("No choice made on the game-over screen");
        set_phase(state, GamePhase::Quit);
    }
}

fn begin_restart(state: &mut SimulationState) {
    state.reset_session();
    for _ in 0..state.settings.restart_preload {
        state.ring.push_next();
    }
    set_phase(state, GamePhase::Restarting);
}

fn restarting(state: &mut SimulationState, input: &TickInput) {
    if state.awaiting_start {
        let clicked = input.events.iter().any(|e| match *e {
            InputEvent::Click(pos) => click_quits(pos, state.screen).is_some(),
            _ => false,
        });
        if clicked {
            state.awaiting_start = false;
            state.runs += 1;
            log::info!("Run {} started", state.runs);
            set_phase(state, GamePhase::Playing);
            return;
        }
        state.color.step(&mut state.rng);
    } else {
        state.ring.push_next();
    }

    // Scroll without scoring: the origin moves with the camera
    state.player.origin_z -= state.player.speed;
    state.ring.advance(state.player.forward_z());

    if !state.awaiting_start && state.ring.is_full() {
        state.awaiting_start = true;
        log::debug!("Tunnel rebuilt, waiting for click");
    }
}
