//! Renderer: serializes a framebuffer to an output device.
//!
//! Every present is a full redraw of the whole buffer, followed by a flush; the
//! cursor is left at the origin. The output device is any `io::Write`, so the
//! engine can present into a pipe or a byte buffer under test.

use std::io::{self, Write};

use crossterm::{cursor, style::Print, QueueableCommand};

use tty_invaders_types::BELL;

use crate::fb::FrameBuffer;

pub struct Renderer<W: Write> {
    out: W,
    buf: Vec<u8>,
    line: String,
    frames: u64,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            line: String::new(),
            frames: 0,
        }
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub(crate) fn get_ref(&self) -> &W {
        &self.out
    }

    /// Write the whole framebuffer and flush.
    pub fn present(&mut self, fb: &FrameBuffer) -> io::Result<()> {
        self.buf.clear();
        encode_full_into(fb, &mut self.buf, &mut self.line)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    /// Ring the terminal bell `times` times.
    pub fn bell(&mut self, times: usize) -> io::Result<()> {
        for _ in 0..times {
            write!(self.out, "{}", BELL)?;
        }
        self.out.flush()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without touching the device.
/// Each row is positioned explicitly, so the result does not depend on the
/// terminal's line-wrap mode. The cursor ends at the origin.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>, line: &mut String) -> io::Result<()> {
    for y in 0..fb.height() {
        line.clear();
        if let Some(row) = fb.row(y) {
            line.extend(row.iter());
        }
        out.queue(cursor::MoveTo(0, y))?;
        out.queue(Print(line.as_str()))?;
    }
    out.queue(cursor::MoveTo(0, 0))?;
    Ok(())
}
