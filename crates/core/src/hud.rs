//! Status line and message box text.

use crate::types::EndCause;

/// Key help shown at the left of the status line.
pub const HELP_TEXT: &str = "Move: a,s Jump: z,x Fire: space Quit: q  New: r";

/// Shield and score labels shown at the right of the status line.
pub const STATUS_TEXT: &str = "SHIELD: 3 SCORE: 0";

pub const BOX_WIDTH: u16 = 13;

/// The six rows of the end-of-round message box.
pub fn message_box(cause: EndCause) -> [&'static str; 6] {
    let body = match cause {
        EndCause::GameOver => ["║ GAME OVER ║", "║ AGAIN <r> ║"],
        EndCause::Restart => ["║  RESTART  ║", "║           ║"],
    };
    [
        "╔═══════════╗",
        "║           ║",
        body[0],
        body[1],
        "║           ║",
        "╚═══════════╝",
    ]
}
