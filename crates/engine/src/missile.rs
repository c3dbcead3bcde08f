//! Player missile.

use std::sync::Arc;

use tty_invaders_types::{BLANK, PL_MISS_SEQ, TEMPO_A_MS};

use crate::error::Result;
use crate::playfield::Playfield;
use crate::signal::Hit;

/// Fly a missile up from the ship's launch column.
///
/// The missile climbs while the cell above it is blank. When it stops short of
/// the top row it erases itself and reports the cell it ran into on the hit
/// signal.
pub async fn launch(pf: Arc<Playfield>) -> Result<()> {
    let g = *pf.geometry();
    let col;
    {
        let mut frame = pf.frame();
        col = g.missile_col(frame.sprite_col());
        frame.bell(1)?;
    }
    let mut row = g.missile_launch_row();
    tracing::trace!(col, "missile launched");

    loop {
        if pf.is_ending() {
            return Ok(());
        }
        {
            let mut frame = pf.frame();
            if row == 0 || !frame.is_blank(row - 1, col)? {
                break;
            }
            row -= 1;
            frame.put(row, col, PL_MISS_SEQ[0])?;
            frame.put(row + 1, col, PL_MISS_SEQ[1])?;
            if row < g.missile_trail_row() {
                let (a, b) = if row % 2 == 0 {
                    (PL_MISS_SEQ[2], PL_MISS_SEQ[3])
                } else {
                    (PL_MISS_SEQ[3], PL_MISS_SEQ[2])
                };
                frame.put(row + 2, col, a)?;
                frame.put(row + 3, col, b)?;
                frame.put(row + 4, col, BLANK)?;
            } else {
                frame.put(row + 2, col, BLANK)?;
            }
            frame.present()?;
        }
        pf.pause(TEMPO_A_MS).await;
    }

    {
        let mut frame = pf.frame();
        for r in row..row + 5 {
            if r < g.missile_safe_row() {
                frame.put(r, col, BLANK)?;
            }
        }
        frame.present()?;
    }
    if row != 0 {
        tracing::debug!(row = row - 1, col, "missile hit");
        pf.hit().fire(Hit { row: row - 1, col });
    }
    Ok(())
}
