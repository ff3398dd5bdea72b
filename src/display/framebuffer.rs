use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// 1-bit-per-pixel image, packed row-major, eight pixels per byte (MSB first).
///
/// Implements `DrawTarget`, so every `embedded-graphics` primitive and font
/// draws into it.  Pixels outside the buffer are clipped.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    stride: usize,
    bits: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize + 7) / 8;
        FrameBuffer {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw packed rows, ready to be streamed to a display controller.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// `true` for a lit pixel.  Out-of-range coordinates read as unlit.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some((byte, mask)) => self.bits[byte] & mask != 0,
            None => false,
        }
    }

    /// Number of lit pixels.
    pub fn lit(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((byte, mask)) = self.index(x, y) {
            if on {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * self.stride + x / 8, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xff } else { 0x00 };
        self.bits.iter_mut().for_each(|b| *b = fill);
        Ok(())
    }
}
