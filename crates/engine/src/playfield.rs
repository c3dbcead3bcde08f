//! The shared playfield of one round.
//!
//! All visible state lives behind a single lock: the frame buffer, the round
//! state shown on the status line, the ship column and the output device.
//! Actors take the lock through [`Playfield::frame`], mutate cells and either
//! [`Frame::present`] the result or drop the guard. A guard never lives across
//! an await, so a frame is always drawn and presented atomically.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, MutexGuard};

use tty_invaders_core::bitmaps::SHIP;
use tty_invaders_core::hud::{self, HELP_TEXT, STATUS_TEXT};
use tty_invaders_core::{Bitmap, Geometry, Rect, RoundState, SpawnRng};
use tty_invaders_term::{FrameBuffer, Renderer};
use tty_invaders_types::{EndCause, PL_MISS_SEQ};

use crate::config::GameConfig;
use crate::error::{EngineError, Result};
use crate::signal::{Critical, Hit, Signal};

struct Screen {
    fb: FrameBuffer,
    round: RoundState,
    sprite_col: u16,
    renderer: Renderer<Box<dyn Write + Send>>,
}

pub struct Playfield {
    geometry: Geometry,
    config: GameConfig,
    screen: Mutex<Screen>,
    rng: Mutex<SpawnRng>,
    /// Set once the round is ending; every actor exits at its next check.
    start: AtomicBool,
    /// Set on the first critical event; no further waves are deployed.
    stop: AtomicBool,
    hit: Signal<Hit>,
    critical: Signal<Critical>,
}

impl Playfield {
    pub fn new(geometry: Geometry, config: GameConfig, output: Box<dyn Write + Send>) -> Self {
        let screen = Screen {
            fb: FrameBuffer::new(geometry.cols(), geometry.rows()),
            round: RoundState::new(),
            sprite_col: geometry.sprite_start_col(),
            renderer: Renderer::new(output),
        };
        Self {
            rng: Mutex::new(SpawnRng::new(config.seed)),
            geometry,
            config,
            screen: Mutex::new(screen),
            start: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            hit: Signal::new("hit"),
            critical: Signal::new("critical"),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Lock the screen for one frame.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            screen: self.screen.lock(),
            geometry: &self.geometry,
        }
    }

    pub async fn pause(&self, ms: u32) {
        tokio::time::sleep(self.config.delay(ms)).await;
    }

    // Round flags.

    pub fn is_ending(&self) -> bool {
        self.start.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Mark the round as ending. Implies [`Playfield::stop`].
    pub fn begin_ending(&self) {
        self.stop();
        self.start.store(true, Ordering::SeqCst);
    }

    // Signals.

    pub fn hit(&self) -> &Signal<Hit> {
        &self.hit
    }

    pub fn critical(&self) -> &Signal<Critical> {
        &self.critical
    }

    pub fn fire_critical(&self, cause: Critical) {
        if self.critical.fire(cause) {
            tracing::info!(cause = cause.as_str(), "critical event");
        }
    }

    /// Consume the pending hit. Returns `true` only when it lies inside `target`.
    pub fn take_hit_in(&self, target: Rect) -> bool {
        match self.hit.take() {
            Some(hit) if target.contains(hit.row, hit.col) => true,
            Some(hit) => {
                tracing::trace!(row = hit.row, col = hit.col, "stray hit discarded");
                false
            }
            None => false,
        }
    }

    // Randomness.

    pub fn spawn_col(&self) -> u16 {
        self.rng.lock().spawn_col(&self.geometry)
    }

    pub fn unit_fire_rows(&self) -> [u16; 2] {
        self.rng.lock().unit_fire_rows(&self.geometry)
    }

    pub fn boss_fire_rows(&self) -> [u16; 2] {
        self.rng.lock().boss_fire_rows(&self.geometry)
    }

    // Screens.

    /// Draw the opening screen: status line and the ship at its start column.
    pub fn init_screen(&self) -> Result<()> {
        let g = self.geometry;
        let mut frame = self.frame();
        frame.clear();
        frame.draw_status(HELP_TEXT, STATUS_TEXT)?;
        let col = frame.sprite_col();
        frame.draw(g.sprite_top(), col, &SHIP)?;
        frame.present()
    }

    /// Replace the playfield with the end-of-round message box.
    pub fn draw_ending(&self, cause: EndCause) -> Result<()> {
        let g = self.geometry;
        let mut frame = self.frame();
        frame.clear();
        frame.draw_status(HELP_TEXT, STATUS_TEXT)?;
        for (i, row) in hud::message_box(cause).iter().enumerate() {
            frame.put_str(g.box_row() + i as u16, g.box_col(), row)?;
        }
        frame.present()
    }

    /// Play destruction frames at a bitmap's position.
    pub async fn animate(&self, row: u16, col: u16, frames: &[Bitmap], ms: u32) -> Result<()> {
        for bitmap in frames {
            {
                let mut frame = self.frame();
                frame.draw(row, col, bitmap)?;
                frame.present()?;
            }
            self.pause(ms).await;
        }
        Ok(())
    }

    // Inspection.

    pub fn snapshot(&self) -> FrameBuffer {
        self.screen.lock().fb.clone()
    }

    pub fn round_state(&self) -> RoundState {
        self.screen.lock().round.clone()
    }

    pub fn sprite_col(&self) -> u16 {
        self.screen.lock().sprite_col
    }

    pub fn frames_presented(&self) -> u64 {
        self.screen.lock().renderer.frames()
    }
}

/// Exclusive access to the screen for one frame.
pub struct Frame<'a> {
    screen: MutexGuard<'a, Screen>,
    geometry: &'a Geometry,
}

impl Frame<'_> {
    fn out_of_bounds(&self, row: u16, col: u16) -> EngineError {
        EngineError::OutOfBounds {
            row,
            col,
            rows: self.geometry.rows(),
            cols: self.geometry.cols(),
        }
    }

    pub fn get(&self, row: u16, col: u16) -> Result<char> {
        self.screen
            .fb
            .get(col, row)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    pub fn is_blank(&self, row: u16, col: u16) -> Result<bool> {
        self.screen
            .fb
            .is_blank(col, row)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Whether any cell of `width` starting at (`row`, `col`) shows a player
    /// missile head. The body glyph is also part of the ship and is not matched.
    pub fn has_missile(&self, row: u16, col: u16, width: u16) -> bool {
        (col..col.saturating_add(width))
            .any(|c| self.screen.fb.get(c, row) == Some(PL_MISS_SEQ[0]))
    }

    pub fn put(&mut self, row: u16, col: u16, ch: char) -> Result<()> {
        if self.screen.fb.set(col, row, ch) {
            Ok(())
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    pub fn put_str(&mut self, row: u16, col: u16, s: &str) -> Result<()> {
        if self.screen.fb.put_str(col, row, s) {
            Ok(())
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    pub fn blank(&mut self, row: u16, col: u16, width: u16) -> Result<()> {
        if self.screen.fb.blank_run(col, row, width) {
            Ok(())
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// Blank `rows` whole bitmap rows starting at `row`.
    pub fn blank_rows(&mut self, row: u16, col: u16, width: u16, rows: u16) -> Result<()> {
        for r in row..row + rows {
            self.blank(r, col, width)?;
        }
        Ok(())
    }

    /// Copy a bitmap, blanks included, with its top-left corner at (`row`, `col`).
    pub fn draw(&mut self, row: u16, col: u16, bitmap: &Bitmap) -> Result<()> {
        for (i, line) in bitmap.rows().enumerate() {
            self.put_str(row + i as u16, col, line)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.screen.fb.clear();
    }

    // Ship.

    pub fn sprite_col(&self) -> u16 {
        self.screen.sprite_col
    }

    pub fn set_sprite_col(&mut self, col: u16) {
        self.screen.sprite_col = col;
    }

    // Status line.

    pub fn round(&self) -> &RoundState {
        &self.screen.round
    }

    fn draw_status(&mut self, help: &str, labels: &str) -> Result<()> {
        let g = *self.geometry;
        self.put_str(g.status_row(), 1, help)?;
        self.put_str(g.status_row(), g.status_col(), labels)?;
        self.draw_shield()?;
        self.draw_score()
    }

    fn draw_shield(&mut self) -> Result<()> {
        let g = *self.geometry;
        let text = format!("{:<2}", self.screen.round.shield_text());
        self.put_str(g.status_row(), g.shield_col(), &text)
    }

    fn draw_score(&mut self) -> Result<()> {
        let g = *self.geometry;
        // Digits that no longer fit are not drawn; the score keeps counting.
        match self.screen.round.score_text() {
            Some(text) => self.put_str(g.status_row(), g.score_col(), &text),
            None => Ok(()),
        }
    }

    pub fn add_score(&mut self, points: u32) -> Result<u32> {
        let score = self.screen.round.add_score(points);
        self.draw_score()?;
        Ok(score)
    }

    /// Shift the shield and redraw it. Returns `true` when this change depleted it.
    pub fn change_shield(&mut self, delta: i32) -> Result<bool> {
        let was_depleted = self.screen.round.is_depleted();
        self.screen.round.change_shield(delta);
        self.draw_shield()?;
        Ok(!was_depleted && self.screen.round.is_depleted())
    }

    pub fn restore_shield(&mut self) -> Result<()> {
        self.screen.round.restore_shield();
        self.draw_shield()
    }

    /// Count a destroyed unit; redraws the shield when a bonus was granted.
    pub fn register_kill(&mut self) -> Result<bool> {
        let bonus = self.screen.round.register_kill();
        if bonus {
            self.draw_shield()?;
        }
        Ok(bonus)
    }

    // Output.

    pub fn bell(&mut self, times: usize) -> Result<()> {
        Ok(self.screen.renderer.bell(times)?)
    }

    /// Write the whole buffer to the output device and release the lock.
    pub fn present(mut self) -> Result<()> {
        let screen = &mut *self.screen;
        screen.renderer.present(&screen.fb)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;
    use tty_invaders_types::{BLANK, STD_SHIELD_EXP};

    pub(crate) fn playfield(rows: u16, cols: u16) -> Arc<Playfield> {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let geometry = Geometry::new(rows, cols).unwrap();
        let pf = Arc::new(Playfield::new(geometry, config, Box::new(io::sink())));
        pf.init_screen().unwrap();
        pf
    }

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).unwrap().iter().collect()
    }

    #[test]
    fn opening_screen_shows_status_and_ship() {
        let pf = playfield(40, 100);
        let g = *pf.geometry();
        let fb = pf.snapshot();

        let status = row_text(&fb, g.status_row());
        assert!(status.starts_with(&format!(" {HELP_TEXT}")));
        assert!(status.ends_with(&format!("SHIELD: 3 SCORE: 0{}", " ".repeat(8))));

        let col = pf.sprite_col();
        assert_eq!(col, 50);
        assert_eq!(fb.get(col + 6, g.sprite_top()), Some('╬'));
        assert_eq!(pf.frames_presented(), 1);
    }

    #[test]
    fn status_line_follows_round_state() {
        let pf = playfield(40, 100);
        let g = *pf.geometry();
        {
            let mut frame = pf.frame();
            frame.add_score(120).unwrap();
            assert!(!frame.change_shield(-2).unwrap());
        }
        let status = row_text(&pf.snapshot(), g.status_row());
        assert!(status.ends_with(&format!("SHIELD: 1 SCORE: 120{}", " ".repeat(6))), "{status:?}");
    }

    #[test]
    fn shield_reports_depletion_once() {
        let pf = playfield(40, 100);
        let mut frame = pf.frame();
        assert!(!frame.change_shield(-3).unwrap());
        assert!(frame.change_shield(-1).unwrap());
        assert!(!frame.change_shield(-1).unwrap());
        assert_eq!(frame.round().shield(), STD_SHIELD_EXP);
    }

    #[test]
    fn writes_outside_the_buffer_are_errors() {
        let pf = playfield(30, 70);
        let mut frame = pf.frame();
        assert!(matches!(
            frame.put(30, 0, 'x'),
            Err(EngineError::OutOfBounds { row: 30, col: 0, .. })
        ));
        assert!(frame.put_str(0, 68, "abc").is_err());
        assert_eq!(frame.get(0, 68).unwrap(), BLANK);
    }

    #[test]
    fn stray_hits_are_discarded() {
        let pf = playfield(40, 100);
        let target = Rect::new(10, 4, 5, 4);
        pf.hit().fire(Hit { row: 20, col: 11 });
        assert!(!pf.take_hit_in(target));
        pf.hit().fire(Hit { row: 6, col: 12 });
        assert!(pf.take_hit_in(target));
        assert!(!pf.take_hit_in(target));
    }

    #[test]
    fn ship_body_is_not_a_missile() {
        let pf = playfield(40, 100);
        let g = *pf.geometry();
        let col = pf.sprite_col();
        let mut frame = pf.frame();
        assert_eq!(frame.get(g.sprite_top() + 1, col + 6).unwrap(), PL_MISS_SEQ[1]);
        for row in g.sprite_top()..g.sprite_top() + SHIP.height() {
            assert!(!frame.has_missile(row, col, SHIP.width()), "row {row}");
        }
        frame.put(5, 10, PL_MISS_SEQ[0]).unwrap();
        assert!(frame.has_missile(5, 8, 4));
        assert!(!frame.has_missile(5, 11, 4));
    }

    #[test]
    fn ending_implies_stop() {
        let pf = playfield(40, 100);
        assert!(!pf.is_stopped());
        pf.begin_ending();
        assert!(pf.is_stopped());
        assert!(pf.is_ending());
    }

    #[test]
    fn ending_screen_shows_box() {
        let pf = playfield(40, 100);
        pf.draw_ending(EndCause::GameOver).unwrap();
        let text = pf.snapshot().to_text();
        assert!(text.contains("║ GAME OVER ║"));
        assert!(text.contains("SHIELD: 3"));
    }
}
