//! Wave of invaders.
//!
//! Units come down one at a time. Each unit descends one row per step, fires
//! at two random rows and ends either destroyed by a player missile or at the
//! breach row.

use std::sync::Arc;

use tty_invaders_core::bitmaps::{INVADER, INVADER_WRECK};
use tty_invaders_core::{resolve_unit, DescentEnd, Rect};
use tty_invaders_types::{INVADER_COLS, INVADER_ROWS, STD_ENEM_POINT, TEMPO_A_MS, TEMPO_C_MS};

use crate::actors::Actors;
use crate::enemy_missile;
use crate::error::Result;
use crate::playfield::Playfield;
use crate::signal::{Critical, Rendezvous};

/// Send down up to `units` invaders, one after the other.
///
/// Returns early once the round is stopped.
pub async fn run_wave(pf: Arc<Playfield>, actors: Actors, units: usize) -> Result<()> {
    let mut col = pf.geometry().center_col();
    for n in 0..units {
        let Some((next, destroyed)) = descend_unit(&pf, &actors, col).await? else {
            return Ok(());
        };
        let end = resolve_unit(pf.geometry(), next, destroyed);
        tracing::debug!(unit = n, row = next, ?end, "unit done");
        finish_unit(&pf, col, next, end).await?;
        if pf.is_stopped() {
            return Ok(());
        }
        col = pf.spawn_col();
    }
    Ok(())
}

/// Drive one unit down. Returns its next row and whether it was destroyed, or
/// `None` when the round ended first.
async fn descend_unit(pf: &Arc<Playfield>, actors: &Actors, col: u16) -> Result<Option<(u16, bool)>> {
    let g = *pf.geometry();
    let fire_rows = pf.unit_fire_rows();
    let rendezvous = Rendezvous::new();
    let mut next: u16 = 1;

    loop {
        if pf.is_ending() {
            return Ok(None);
        }
        // The unit occupies rows next-1..=next+1; allow one row of travel above.
        let target = Rect::new(col, next.saturating_sub(2), INVADER_COLS, INVADER_ROWS + 1);
        if pf.take_hit_in(target) {
            return Ok(Some((next, true)));
        }

        rendezvous.wait().await;
        {
            let mut frame = pf.frame();
            frame.blank(next - 1, col, INVADER_COLS)?;
            frame.draw(next, col, &INVADER)?;
            frame.present()?;
        }
        next += 1;

        if fire_rows.contains(&next) {
            let ticket = rendezvous.register();
            actors.spawn("enemy_missile", enemy_missile::descend(Arc::clone(pf), col, next, ticket));
        }
        if next == g.breach_row() {
            return Ok(Some((next, false)));
        }
        pf.pause(TEMPO_C_MS).await;
    }
}

async fn finish_unit(pf: &Playfield, col: u16, next: u16, end: DescentEnd) -> Result<()> {
    let top = next - 1;
    match end {
        DescentEnd::Destroyed | DescentEnd::NearMiss => {
            {
                let mut frame = pf.frame();
                if end == DescentEnd::Destroyed && frame.register_kill()? {
                    tracing::info!(shield = frame.round().shield(), "shield bonus");
                }
                frame.bell(2)?;
            }
            pf.animate(top, col, &INVADER_WRECK, TEMPO_A_MS).await?;
            {
                let mut frame = pf.frame();
                frame.blank_rows(top, col, INVADER_COLS, INVADER_ROWS)?;
                if end == DescentEnd::Destroyed {
                    frame.add_score(STD_ENEM_POINT)?;
                }
                frame.present()?;
            }
            if end == DescentEnd::NearMiss {
                pf.fire_critical(Critical::NearMiss);
            }
        }
        DescentEnd::Breach => {
            {
                let mut frame = pf.frame();
                frame.blank_rows(top, col, INVADER_COLS, INVADER_ROWS)?;
                frame.present()?;
            }
            pf.fire_critical(Critical::Breach);
        }
    }
    Ok(())
}
