use std::io::Write;

use crate::utils::GalsimError;

/// Destination for per-step particle positions.
///
/// `open` is called once before the first frame and `close` once after the
/// last; both default to doing nothing.
pub trait FrameSink {
    fn open(&mut self) -> Result<(), GalsimError> {
        Ok(())
    }

    /// Draws one frame from the current positions. `xs` and `ys` have equal length.
    fn draw(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), GalsimError>;

    fn close(&mut self) -> Result<(), GalsimError> {
        Ok(())
    }
}

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

/// Terminal renderer: the unit square as a character grid, one `*` per occupied cell.
///
/// # Examples
///
/// ```
/// use galsim::graphics::{AsciiCanvas, FrameSink};
///
/// let mut canvas = AsciiCanvas::new(Vec::new(), 4, 2);
/// canvas.draw(&[0.1, 0.9], &[0.9, 0.1]).expect("draw failed");
/// assert_eq!(canvas.frame(), "*...\n...*\n");
/// ```
pub struct AsciiCanvas<W: Write> {
    out: W,
    width: usize,
    height: usize,
    cells: Vec<bool>,
    frames: usize,
}

impl<W: Write> AsciiCanvas<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            out,
            width,
            height,
            cells: vec![false; width * height],
            frames: 0,
        }
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// The most recently rasterized frame, top row first, without escape codes.
    pub fn frame(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            text.extend(row.iter().map(|&on| if on { '*' } else { '.' }));
            text.push('\n');
        }
        text
    }

    fn rasterize(&mut self, xs: &[f64], ys: &[f64]) {
        self.cells.iter_mut().for_each(|c| *c = false);
        for (&x, &y) in xs.iter().zip(ys) {
            // Particles outside the unit square are simply not drawn.
            if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                continue;
            }
            let col = ((x * self.width as f64) as usize).min(self.width - 1);
            let row = (((1.0 - y) * self.height as f64) as usize).min(self.height - 1);
            self.cells[row * self.width + col] = true;
        }
    }
}

impl<W: Write> FrameSink for AsciiCanvas<W> {
    fn draw(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), GalsimError> {
        self.rasterize(xs, ys);
        let frame = self.frame();
        write!(self.out, "{}{}", CLEAR_AND_HOME, frame)
            .and_then(|_| self.out.flush())
            .map_err(|e| GalsimError::Render(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), GalsimError> {
        self.out.flush().map_err(|e| GalsimError::Render(e.to_string()))
    }
}
