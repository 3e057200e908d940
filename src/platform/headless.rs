//! Windowless platform for demos and soak runs
//!
//! Steers with a wandering pointer, answers the game-over screen on its own
//! and counts what would have been drawn.

use std::time::{Duration, Instant};

use glam::Vec2;

use super::{EventSource, FramePacer, PointerSource, Renderer, ScreenGeometry, TextTextures};
use crate::renderer::{FrameGeometry, QuadTag, TextTexture, TextureHandle};
use crate::sim::InputEvent;

/// Stand-in host with no window
#[derive(Debug)]
pub struct HeadlessPlatform {
    screen: Vec2,
    /// Runs to play before choosing "quit"
    runs: u32,
    /// Sleep to the target frame rate
    realtime: bool,
    frame: u64,
    game_overs: u32,
    on_game_over_screen: bool,
    pending: Vec<InputEvent>,
    next_frame: Option<Instant>,
    textures: u64,
    /// Quads submitted so far
    pub quads_drawn: u64,
}

impl HeadlessPlatform {
    pub fn new(screen: Vec2, runs: u32) -> Self {
        Self {
            screen,
            runs: runs.max(1),
            realtime: false,
            frame: 0,
            game_overs: 0,
            on_game_over_screen: false,
            pending: Vec::new(),
            next_frame: None,
            textures: 0,
            quads_drawn: 0,
        }
    }

    /// Pace frames against the wall clock instead of running flat out
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn game_overs(&self) -> u32 {
        self.game_overs
    }
}

impl FramePacer for HeadlessPlatform {
    fn wait_for_next_frame(&mut self, target_fps: u32) {
        self.frame += 1;
        if !self.realtime {
            return;
        }
        let period = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let now = Instant::now();
        let due = self.next_frame.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        self.next_frame = Some(due.max(now) + period);
    }
}

impl EventSource for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl PointerSource for HeadlessPlatform {
    fn pointer_position(&self) -> Vec2 {
        let t = self.frame as f32;
        let wander = Vec2::new((t * 0.05).sin(), (t * 0.031).cos()) * 0.3;
        self.screen * (Vec2::splat(0.5) + wander)
    }
}

impl ScreenGeometry for HeadlessPlatform {
    fn screen_size(&self) -> Vec2 {
        self.screen
    }
}

impl Renderer for HeadlessPlatform {
    fn draw(&mut self, frame: &FrameGeometry) {
        self.quads_drawn += frame.quad_count() as u64;

        let game_over = frame.has_tag(|t| matches!(t, QuadTag::Text(_)));
        if game_over && !self.on_game_over_screen {
            self.game_overs += 1;
            // Lower-left half restarts, upper-right half quits
            let click = if self.game_overs < self.runs {
                Vec2::new(0.1, 0.9)
            } else {
                Vec2::new(0.9, 0.1)
            };
            self.pending.push(InputEvent::Click(self.screen * click));
        }
        self.on_game_over_screen = game_over;

        if frame.has_tag(|t| t == QuadTag::PlayButton) {
            self.pending.push(InputEvent::Click(self.screen * 0.5));
        }
    }
}

impl TextTextures for HeadlessPlatform {
    fn texture_for(&mut self, text: &str) -> TextTexture {
        self.textures += 1;
        log::debug!("Text texture #{} for {text:?}", self.textures);
        TextTexture {
            handle: TextureHandle(self.textures),
            aspect: 1.0 / text.chars().count().max(1) as f32,
        }
    }
}
