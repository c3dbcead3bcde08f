//! The player's ship.

use tty_invaders_core::bitmaps::{SHIP, SHIP_WRECK};
use tty_invaders_types::{Direction, BLANK, SPRITE_COLS, STD_JUMP_LEN, TEMPO_C_MS};

use crate::error::Result;
use crate::playfield::Playfield;

/// Move the ship one column. Returns `false` when it is already at the edge.
///
/// The whole ship is redrawn at its new column and the vacated edge column is
/// blanked, in one presented frame.
pub fn move_sprite(pf: &Playfield, dir: Direction) -> Result<bool> {
    let g = *pf.geometry();
    let mut frame = pf.frame();
    let col = frame.sprite_col();
    let next = match col.checked_add_signed(dir.step()) {
        Some(next) if (g.sprite_min_col()..=g.sprite_max_col()).contains(&next) => next,
        _ => return Ok(false),
    };
    let vacated = match dir {
        Direction::Left => next + SPRITE_COLS,
        Direction::Right => col,
    };
    frame.set_sprite_col(next);
    frame.draw(g.sprite_top(), next, &SHIP)?;
    for i in 0..SHIP.height() {
        frame.put(g.sprite_top() + i, vacated, BLANK)?;
    }
    frame.present()?;
    Ok(true)
}

/// Move the ship up to [`STD_JUMP_LEN`] columns. Returns how far it went.
pub fn jump_sprite(pf: &Playfield, dir: Direction) -> Result<u16> {
    let mut moved = 0;
    for _ in 0..STD_JUMP_LEN {
        if !move_sprite(pf, dir)? {
            break;
        }
        moved += 1;
    }
    Ok(moved)
}

/// Play the ship's destruction frames.
pub async fn wreck_sprite(pf: &Playfield) -> Result<()> {
    let g = *pf.geometry();
    let col = pf.sprite_col();
    {
        let mut frame = pf.frame();
        frame.bell(1)?;
    }
    pf.animate(g.sprite_top(), col, &SHIP_WRECK, TEMPO_C_MS).await
}
