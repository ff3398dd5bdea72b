use std::io;

use super::{Canvas, FrameBuffer};

/// In-memory display: keeps a copy of every presented frame.
///
/// `fail_next(n)` makes the next `n` presents fail, to exercise the driver's
/// presentation-failure path.
pub struct HeadlessDisplay {
    surface: FrameBuffer,
    frames: Vec<FrameBuffer>,
    failures: u32,
}

impl HeadlessDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        HeadlessDisplay {
            surface: FrameBuffer::new(width, height),
            frames: Vec::new(),
            failures: 0,
        }
    }

    pub fn fail_next(&mut self, presents: u32) {
        self.failures = presents;
    }

    pub fn frames(&self) -> &[FrameBuffer] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.frames.last()
    }
}

impl Canvas for HeadlessDisplay {
    fn surface(&mut self) -> &mut FrameBuffer {
        &mut self.surface
    }

    fn present(&mut self) -> io::Result<()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "display unplugged"));
        }
        self.frames.push(self.surface.clone());
        Ok(())
    }
}
