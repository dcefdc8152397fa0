use std::collections::{HashMap, VecDeque};

use super::{Display, Input, QuadLayout, Status};
use crate::{Pos, Result, Rgb};

/// Display that draws nothing. It records what it is told and replays a
/// scripted list of inputs, then asks to quit after a number of frames.
#[derive(Debug, Clone, Default)]
pub struct Headless {
    window: (u32, u32),
    layout: Option<QuadLayout>,
    colors: HashMap<Pos, Rgb>,
    updates: Vec<(Pos, Rgb)>,
    frames: Vec<Status>,
    inputs: VecDeque<Input>,
    quit_after: Option<usize>,
}

impl Headless {
    pub fn new(window: (u32, u32)) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    /// requests a quit once `frames` frames were presented.
    pub fn quit_after(mut self, frames: usize) -> Self {
        self.quit_after = Some(frames);
        self
    }

    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = Input>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn layout(&self) -> Option<&QuadLayout> {
        self.layout.as_ref()
    }

    pub fn color(&self, pos: Pos) -> Option<Rgb> {
        self.colors.get(&pos).copied()
    }

    /// every color update received, in order.
    pub fn updates(&self) -> &[(Pos, Rgb)] {
        &self.updates
    }

    pub fn frames(&self) -> &[Status] {
        &self.frames
    }

    pub fn clear_updates(&mut self) {
        self.updates.clear();
    }
}

impl Display for Headless {
    fn window_size(&self) -> (u32, u32) {
        self.window
    }

    fn bind(&mut self, layout: QuadLayout) -> Result<()> {
        self.layout = Some(layout);
        Ok(())
    }

    fn set_color(&mut self, pos: Pos, color: Rgb) {
        self.colors.insert(pos, color);
        self.updates.push((pos, color));
    }

    fn present(&mut self, status: &Status) -> Result<()> {
        self.frames.push(*status);
        Ok(())
    }

    fn poll_input(&mut self) -> Option<Input> {
        match self.quit_after {
            Some(limit) if self.frames.len() >= limit => Some(Input::Quit),
            _ => self.inputs.pop_front(),
        }
    }
}
