use std::{io::Write, ops::Range};

use termion::{color, cursor};

use crate::Rgb;

/// Framebuffer of colored terminal cells. Only rows touched since the last
/// render are written out again.
pub struct Canvas {
    pixels: Vec<Rgb>,
    dirty: Vec<bool>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; width * height],
            dirty: vec![true; height],
            width,
            height,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// paints the rectangle `xs` x `ys`, clipped to the canvas.
    pub fn fill(&mut self, xs: Range<u32>, ys: Range<u32>, color: Rgb) {
        let xs = (xs.start as usize).min(self.width)..(xs.end as usize).min(self.width);
        let ys = (ys.start as usize).min(self.height)..(ys.end as usize).min(self.height);
        for y in ys {
            let row = &mut self.pixels[y * self.width..(y + 1) * self.width];
            for pixel in &mut row[xs.clone()] {
                if *pixel != color {
                    *pixel = color;
                    self.dirty[y] = true;
                }
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }

    /// Writes the dirty rows to `out`, one escape sequence per run of equal
    /// colors.
    pub fn render(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        for y in 0..self.height {
            if !std::mem::take(&mut self.dirty[y]) {
                continue;
            }
            write!(out, "{}", cursor::Goto(1, y as u16 + 1))?;
            let row = &self.pixels[y * self.width..(y + 1) * self.width];
            let mut current = None;
            for &pixel in row {
                if current != Some(pixel) {
                    let Rgb(r, g, b) = pixel;
                    write!(out, "{}", color::Bg(color::Rgb(r, g, b)))?;
                    current = Some(pixel);
                }
                write!(out, " ")?;
            }
        }
        write!(out, "{}", color::Bg(color::Reset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_clips_and_marks_rows() {
        let mut canvas = Canvas::new(4, 3);
        canvas.render(&mut Vec::new()).unwrap();
        assert!(!canvas.is_dirty());
        canvas.fill(2..9, 1..2, Rgb::WHITE);
        assert_eq!(canvas.get(3, 1), Some(Rgb::WHITE));
        assert_eq!(canvas.get(1, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.get(4, 1), None);
        assert!(canvas.is_dirty());
    }

    #[test]
    fn render_writes_only_dirty_rows() {
        let mut canvas = Canvas::new(2, 2);
        canvas.render(&mut Vec::new()).unwrap();
        canvas.fill(0..2, 1..2, Rgb::WHITE);
        let mut out = Vec::new();
        canvas.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("{}", cursor::Goto(1, 2))));
        assert!(!text.contains(&format!("{}", cursor::Goto(1, 1))));
        assert_eq!(text.matches(' ').count(), 2);
    }

    #[test]
    fn repainting_the_same_color_is_clean() {
        let mut canvas = Canvas::new(2, 2);
        canvas.render(&mut Vec::new()).unwrap();
        canvas.fill(0..2, 0..2, Rgb::BLACK);
        assert!(!canvas.is_dirty());
    }
}
