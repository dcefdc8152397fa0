use std::{
    io::{stdin, stdout, Stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
};

use log::debug;
use termion::{
    clear, color, cursor,
    event::{Event, Key, MouseEvent},
    input::{MouseTerminal, TermRead},
    raw::{IntoRawMode, RawTerminal},
    screen::AlternateScreen,
};

use super::{Canvas, Display, Input, QuadLayout, Status};
use crate::{Pos, Result, Rgb};

type Screen = AlternateScreen<MouseTerminal<RawTerminal<Stdout>>>;

/// Full-screen terminal display. Each cell is painted as background-colored
/// blanks; the bottom line is kept for the status.
pub struct TerminalView {
    screen: Screen,
    canvas: Canvas,
    layout: Option<QuadLayout>,
    window: (u32, u32),
    receiver: mpsc::Receiver<Input>,
    _input: JoinHandle<()>,
}

impl TerminalView {
    pub fn spawn() -> Result<Self> {
        let (columns, rows) = termion::terminal_size()?;
        let window = (u32::from(columns), u32::from(rows.saturating_sub(1)));
        let mut screen = AlternateScreen::from(MouseTerminal::from(stdout().into_raw_mode()?));
        write!(screen, "{}{}", cursor::Hide, clear::All)?;

        let (sender, receiver) = mpsc::channel();
        let input = thread::spawn(|| input_loop(sender));

        Ok(Self {
            screen,
            canvas: Canvas::new(window.0 as usize, window.1 as usize),
            layout: None,
            window,
            receiver,
            _input: input,
        })
    }
}

fn input_loop(sender: mpsc::Sender<Input>) {
    for event in stdin().events() {
        let input = match event {
            Ok(Event::Key(Key::Char('q'))) | Ok(Event::Key(Key::Ctrl('c'))) => Input::Quit,
            Ok(Event::Key(Key::Char(' '))) => Input::TogglePause,
            Ok(Event::Mouse(MouseEvent::Press(..))) => Input::TogglePause,
            Ok(_) => continue,
            Err(_) => break,
        };
        if sender.send(input).is_err() {
            break;
        }
    }
}

impl Display for TerminalView {
    fn window_size(&self) -> (u32, u32) {
        self.window
    }

    fn bind(&mut self, layout: QuadLayout) -> Result<()> {
        debug!(
            "terminal layout: {:?} grid on {:?} window",
            layout.grid_size(),
            layout.window_size()
        );
        self.layout = Some(layout);
        Ok(())
    }

    fn set_color(&mut self, pos: Pos, color: Rgb) {
        if let Some(layout) = &self.layout {
            let (xs, ys) = layout.covered(pos);
            self.canvas.fill(xs, ys, color);
        }
    }

    fn present(&mut self, status: &Status) -> Result<()> {
        self.canvas.render(&mut self.screen)?;
        let state = if status.paused { "paused" } else { "running" };
        write!(
            self.screen,
            "{}{}{}generation {} | {} | {:.0} fps | click or space: pause, q: quit",
            cursor::Goto(1, self.window.1 as u16 + 1),
            color::Bg(color::Reset),
            clear::CurrentLine,
            status.generation,
            state,
            status.fps,
        )?;
        self.screen.flush()?;
        Ok(())
    }

    fn poll_input(&mut self) -> Option<Input> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        let _ = write!(self.screen, "{}{}", color::Bg(color::Reset), cursor::Show);
        let _ = self.screen.flush();
    }
}
