/// Terminal stand-in for the LCD.
///
/// Every character cell shows two vertically stacked pixels using half-block
/// glyphs, so the 84×48 panel takes 84 columns by 24 rows inside a border.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use super::{Canvas, FrameBuffer};

const C_BORDER: Color = Color::DarkGrey;
const C_PIXEL: Color = Color::Green;

/// Terminal cells needed to show a `width`×`height` panel, border included.
pub fn cells_needed(width: u32, height: u32) -> (u16, u16) {
    (width as u16 + 2, ((height + 1) / 2) as u16 + 2)
}

pub struct TerminalDisplay<W: Write> {
    out: W,
    surface: FrameBuffer,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, width: u32, height: u32) -> Self {
        TerminalDisplay {
            out,
            surface: FrameBuffer::new(width, height),
        }
    }

    /// Clear the whole terminal once, before the first frame.
    pub fn reset(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let (cols, rows) = cells_needed(self.surface.width(), self.surface.height());
        let bar = "─".repeat(cols as usize - 2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Print(format!("┌{}┐", bar)))?;
        self.out.queue(cursor::MoveTo(0, rows - 1))?;
        self.out.queue(Print(format!("└{}┘", bar)))?;
        for row in 1..rows - 1 {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(cols - 1, row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }
}

/// One terminal row covering pixel rows `y` and `y + 1`.
fn cell_row(fb: &FrameBuffer, y: i32) -> String {
    (0..fb.width() as i32)
        .map(|x| match (fb.pixel(x, y), fb.pixel(x, y + 1)) {
            (true, true) => '█',
            (true, false) => '▀',
            (false, true) => '▄',
            (false, false) => ' ',
        })
        .collect()
}

impl<W: Write> Canvas for TerminalDisplay<W> {
    fn surface(&mut self) -> &mut FrameBuffer {
        &mut self.surface
    }

    fn present(&mut self) -> io::Result<()> {
        self.draw_border()?;

        self.out.queue(style::SetForegroundColor(C_PIXEL))?;
        for (row, y) in (0..self.surface.height() as i32).step_by(2).enumerate() {
            let line = cell_row(&self.surface, y);
            self.out.queue(cursor::MoveTo(1, row as u16 + 1))?;
            self.out.queue(Print(line))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
