//! Enemy missile.

use std::sync::Arc;

use tty_invaders_types::{BLANK, EN_MISS_ADJ, EN_MISS_SEQ, INFO_OFFST, TEMPO_A_MS, TEMPO_B_MS};

use crate::error::Result;
use crate::playfield::Playfield;
use crate::signal::{Critical, Ticket};

/// Drop a missile from a shooter whose top-left corner is at (`row`, `col`).
///
/// The missile falls while the cell below it is blank. Stopping inside the
/// shield band in front of the ship costs one shield level; the change that
/// depletes the shield raises the critical signal. `ticket` arrives once the
/// first frame is drawn, or on any earlier exit.
pub async fn descend(pf: Arc<Playfield>, col: u16, row: u16, ticket: Ticket) -> Result<()> {
    let g = *pf.geometry();
    let col = col + EN_MISS_ADJ;
    let mut row = row + INFO_OFFST;
    let stop_row = g.enemy_missile_stop_row();
    let mut ticket = Some(ticket);

    loop {
        if pf.is_ending() {
            return Ok(());
        }
        {
            let mut frame = pf.frame();
            if row >= stop_row || !frame.is_blank(row + 1, col)? {
                break;
            }
            row += 1;
            frame.put(row, col, EN_MISS_SEQ[0])?;
            frame.put(row - 1, col, BLANK)?;
            frame.present()?;
        }
        if let Some(ticket) = ticket.take() {
            ticket.arrive();
        }
        pf.pause(TEMPO_B_MS).await;
    }
    drop(ticket);

    {
        let mut frame = pf.frame();
        if row >= g.shield_band_top() && row < stop_row {
            let depleted = frame.change_shield(-1)?;
            tracing::debug!(shield = frame.round().shield(), "shield hit");
            if depleted {
                pf.fire_critical(Critical::ShieldDepleted);
            }
        }
        frame.bell(1)?;
    }

    for glyph in &EN_MISS_SEQ[1..] {
        {
            let mut frame = pf.frame();
            frame.put(row, col, *glyph)?;
            frame.present()?;
        }
        pf.pause(TEMPO_A_MS).await;
    }
    Ok(())
}
