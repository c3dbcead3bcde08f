//! Sprite bitmaps.
//!
//! Every actor is drawn from an immutable, rectangular bitmap of glyphs. The
//! destruction sequences are three increasingly sparse overlays of the same size.

use crate::types::DESTR_SEQUENCE;

/// Immutable rectangular glyph bitmap, one `&str` per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap(&'static [&'static str]);

impl Bitmap {
    pub const fn new(rows: &'static [&'static str]) -> Self {
        Self(rows)
    }

    pub fn height(&self) -> u16 {
        self.0.len() as u16
    }

    pub fn width(&self) -> u16 {
        self.0.first().map(|r| r.chars().count() as u16).unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

pub const SHIP: Bitmap = Bitmap::new(&[
    "    ╔═╬═╗    ",
    "    ╠═╩═╣    ",
    "  ╔═╩═══╩═╗  ",
    "╚═╩═══════╩═╝",
]);

pub const SHIP_WRECK: [Bitmap; DESTR_SEQUENCE] = [
    Bitmap::new(&[
        "    *═|═*    ",
        "    *═|═*    ",
        "  *═\\═*═/═*  ",
        "*═*══*══*═*═*",
    ]),
    Bitmap::new(&[
        "     * *     ",
        "     * *     ",
        "   *\\** / *  ",
        " *   *  * * *",
    ]),
    Bitmap::new(&[
        "             ",
        "   *\\** / *  ",
        "      *      ",
        "      *      ",
    ]),
];

pub const INVADER: Bitmap = Bitmap::new(&["╔═╦═╗", "╠═╫═╣", "╝   ╚"]);

pub const INVADER_WRECK: [Bitmap; DESTR_SEQUENCE] = [
    Bitmap::new(&["*═*═*", "╠*╫*╣", "* * *"]),
    Bitmap::new(&["*.*.*", ".*╫*.", "* * *"]),
    Bitmap::new(&["     ", " *.* ", "  *  "]),
];

pub const BOSS: Bitmap = Bitmap::new(&[
    "╭ ━━━━ ╮",
    "┃ ╯╯╰╰ ┃",
    "┃<o'┃o<┃",
    "┃┃  _┃ ┃",
    "┃ \\__/ ┃",
    "╚═╖══╖═╗",
    "  ╬══╬  ",
    "  ╝  ╚  ",
]);

pub const BOSS_WRECK: [Bitmap; DESTR_SEQUENCE] = [
    Bitmap::new(&[
        "*━*━━*━*",
        "┃ ╯╯╰╰ ┃",
        "* + ┃+ *",
        " ┃  *┃  ",
        "* \\__/ *",
        "*═╖══╖═*",
        "  *══*  ",
        "  *  *  ",
    ]),
    Bitmap::new(&[
        "* *  * *",
        "┃ ╯╯╰╰ ┃",
        "* +  + *",
        " ┃   ┃  ",
        "* \\__/ *",
        "* ╖══╖ *",
        "  ****  ",
        "        ",
    ]),
    Bitmap::new(&[
        "        ",
        "┃ ╯╯╰╰ ┃",
        "  *  *  ",
        " * * *  ",
        "  * *   ",
        "        ",
        "        ",
        "        ",
    ]),
];
