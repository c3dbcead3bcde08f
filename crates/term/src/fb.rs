//! Framebuffer of character cells.
//!
//! Coordinates are `(x, y)` = `(column, row)`, row-major storage. Writes outside
//! the buffer are rejected rather than clipped silently, so callers can treat
//! them as faults.

use tty_invaders_types::BLANK;

/// 2D framebuffer of character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![BLANK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Set one cell. Returns `false` when `(x, y)` is outside the buffer.
    pub fn set(&mut self, x: u16, y: u16, ch: char) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.cells[i] = ch;
                true
            }
            None => false,
        }
    }

    pub fn is_blank(&self, x: u16, y: u16) -> Option<bool> {
        self.get(x, y).map(|ch| ch == BLANK)
    }

    /// One full row of cells.
    pub fn row(&self, y: u16) -> Option<&[char]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        Some(&self.cells[start..start + self.width as usize])
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Copy `s` into row `y` starting at column `x`.
    ///
    /// Returns `false` without writing anything if the text does not fit.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str) -> bool {
        let len = s.chars().count();
        if y >= self.height || x as usize + len > self.width as usize {
            return false;
        }
        for (dx, ch) in s.chars().enumerate() {
            self.set(x + dx as u16, y, ch);
        }
        true
    }

    /// Blank a `w`-wide run of row `y` starting at column `x`.
    pub fn blank_run(&mut self, x: u16, y: u16, w: u16) -> bool {
        if y >= self.height || x as usize + w as usize > self.width as usize {
            return false;
        }
        for dx in 0..w {
            self.set(x + dx, y, BLANK);
        }
        true
    }

    /// The buffer as text, one line per row. Handy for tests and logs.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            if let Some(row) = self.row(y) {
                out.extend(row.iter());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_blank() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.cells().len(), 12);
        assert!(fb.cells().iter().all(|&c| c == BLANK));
        assert_eq!(fb.is_blank(3, 2), Some(true));
        assert_eq!(fb.is_blank(4, 0), None);
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 3);
        assert!(fb.set(3, 2, 'x'));
        assert_eq!(fb.get(3, 2), Some('x'));
        assert!(!fb.set(4, 0, 'x'));
        assert!(!fb.set(0, 3, 'x'));
    }

    #[test]
    fn put_str_is_all_or_nothing() {
        let mut fb = FrameBuffer::new(5, 1);
        assert!(fb.put_str(1, 0, "╔═╗"));
        assert_eq!(fb.row(0).unwrap(), &[' ', '╔', '═', '╗', ' ']);
        assert!(!fb.put_str(3, 0, "abc"));
        assert_eq!(fb.get(3, 0), Some('╗'));
        assert!(fb.blank_run(1, 0, 3));
        assert_eq!(fb.to_text(), "     \n");
    }
}
