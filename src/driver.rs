/// Frame driver: owns the game state and runs one frame per `step`.
///
/// Per frame: drain input once → welcome screen or play update → render →
/// present.  The new state is committed before presenting, so a display
/// failure never leaves a half-updated wave behind.

use std::time::Instant;

use crate::compute::{fire, move_ship, start_wave, tick};
use crate::config::Config;
use crate::display::{render_play, render_welcome, Canvas};
use crate::entities::{GameState, GameStatus};
use crate::error::GameError;
use crate::input::{Button, EventReceiver, InputEvent, Keypad};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Flow {
    Continue,
    /// The user interrupted; the welcome screen has been shown one last time.
    Exit,
}

/// What one drain of the input queue amounted to.
#[derive(Default)]
struct FrameInput {
    fires: usize,
    interrupted: bool,
}

pub struct FrameDriver<C: Canvas> {
    canvas: C,
    config: Config,
    state: GameState,
    keypad: Keypad,
    events: EventReceiver,
}

impl<C: Canvas> FrameDriver<C> {
    pub fn new(canvas: C, config: Config, state: GameState, events: EventReceiver) -> Self {
        FrameDriver {
            canvas,
            keypad: Keypad::new(config.hold_window),
            config,
            state,
            events,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn step(&mut self) -> Result<Flow, GameError> {
        self.step_at(Instant::now())
    }

    /// Run one frame as if the clock read `now`.
    pub fn step_at(&mut self, now: Instant) -> Result<Flow, GameError> {
        let input = self.collect_input(now)?;

        if input.interrupted {
            log::info!("interrupted, leaving after wave {}", self.state.wave);
            self.draw_welcome();
            self.present()?;
            return Ok(Flow::Exit);
        }

        if self.state.status == GameStatus::Welcome {
            if !self.keypad.is_held(Button::Start, now) {
                self.draw_welcome();
                self.present()?;
                return Ok(Flow::Continue);
            }
            // FIRE presses queued on the title screen are dropped.
            self.state = start_wave(&self.state, &self.config);
            self.draw_play();
            self.present()?;
            return Ok(Flow::Continue);
        }

        self.state = self.update(&input, now);
        if self.state.status == GameStatus::Welcome {
            self.draw_welcome();
        } else {
            self.draw_play();
        }
        self.present()?;
        Ok(Flow::Continue)
    }

    fn collect_input(&mut self, now: Instant) -> Result<FrameInput, GameError> {
        let mut input = FrameInput::default();
        for event in self.events.drain()? {
            match event {
                InputEvent::Pressed(button) => self.keypad.press(button, now),
                InputEvent::Released(button) => self.keypad.release(button),
                InputEvent::Fire => input.fires += 1,
                InputEvent::Interrupt => input.interrupted = true,
            }
        }
        Ok(input)
    }

    fn update(&self, input: &FrameInput, now: Instant) -> GameState {
        let step = self.config.ship_step;
        let mut dx = 0.0;
        if self.keypad.is_held(Button::Left, now) {
            dx -= step;
        }
        if self.keypad.is_held(Button::Right, now) {
            dx += step;
        }

        let mut state = if dx != 0.0 {
            move_ship(&self.state, dx)
        } else {
            self.state.clone()
        };
        for _ in 0..input.fires {
            state = fire(&state, &self.config);
        }
        tick(&state, &self.config)
    }

    fn draw_play(&mut self) {
        render_play(self.canvas.surface(), &self.state).unwrap_or_else(|never| match never {});
    }

    fn draw_welcome(&mut self) {
        render_welcome(self.canvas.surface(), &self.state).unwrap_or_else(|never| match never {});
    }

    fn present(&mut self) -> Result<(), GameError> {
        let attempts = self.config.present_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.canvas.present() {
                Ok(()) => return Ok(()),
                Err(source) if attempt >= attempts => {
                    log::error!("giving up on frame after {} attempt(s): {}", attempt, source);
                    return Err(GameError::Presentation { attempts: attempt, source });
                }
                Err(source) => {
                    log::warn!("present attempt {} failed: {}", attempt, source);
                    attempt += 1;
                }
            }
        }
    }
}
