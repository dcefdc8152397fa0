use std::{
    thread,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::{
    view::{Display, Input, Status},
    Result,
};

/// Drives generation ticks at a capped rate and handles pause/quit input.
///
/// Ticks run on the calling thread, one at a time: a tick always returns
/// before input is polled or the next frame starts.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    paused: bool,
    generation: u64,
    fps: f32,
    last_tick: Option<Instant>,
}

/// weight of the newest sample in the smoothed frame rate.
const FPS_SMOOTHING: f32 = 0.1;

impl Scheduler {
    pub fn new(interval: Duration, start_paused: bool) -> Self {
        Self {
            interval,
            paused: start_paused,
            generation: 0,
            fps: 0.0,
            last_tick: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn status(&self) -> Status {
        Status {
            generation: self.generation,
            paused: self.paused,
            fps: if self.paused { 0.0 } else { self.fps },
        }
    }

    /// Runs frames until the display asks to quit. `tick` advances the
    /// automaton by one generation and returns the new generation count.
    pub fn run<D, F>(&mut self, display: &mut D, mut tick: F) -> Result<()>
    where
        D: Display,
        F: FnMut(&mut D) -> Result<u64>,
    {
        loop {
            let frame_start = Instant::now();
            while let Some(input) = display.poll_input() {
                match input {
                    Input::Quit => {
                        info!("quit requested at generation {}", self.generation);
                        return Ok(());
                    }
                    Input::TogglePause => {
                        self.paused = !self.paused;
                        self.last_tick = None;
                        debug!("paused: {}", self.paused);
                    }
                }
            }

            if !self.paused {
                self.generation = tick(display)?;
                self.record_tick(frame_start);
            }
            if let Err(err) = display.present(&self.status()) {
                warn!("display rejected frame at generation {}: {err}", self.generation);
                return Err(err);
            }

            let elapsed = frame_start.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
    }

    fn record_tick(&mut self, now: Instant) {
        if let Some(last) = self.last_tick.replace(now) {
            let secs = now.duration_since(last).as_secs_f32();
            if secs > 0.0 {
                let sample = 1.0 / secs;
                self.fps = if self.fps == 0.0 {
                    sample
                } else {
                    self.fps + (sample - self.fps) * FPS_SMOOTHING
                };
            }
        }
    }
}
