//! The boss.
//!
//! Unlike a wave unit the boss takes several grazes before it goes down. A
//! step counts as grazed when a player missile shows right under the boss or a
//! hit landed inside it; every grazed step adds one point of damage.

use std::sync::Arc;

use tty_invaders_core::bitmaps::{BOSS, BOSS_WRECK};
use tty_invaders_core::{resolve_boss, BossTrack, DescentEnd, Rect};
use tty_invaders_types::{BOSS_COLS, BOSS_ROWS, STD_BOSS_POINTS, TEMPO_A_MS, TEMPO_C_MS};

use crate::actors::Actors;
use crate::enemy_missile;
use crate::error::Result;
use crate::playfield::Playfield;
use crate::signal::{Critical, Rendezvous};

pub async fn run_boss(pf: Arc<Playfield>, actors: Actors) -> Result<()> {
    let g = *pf.geometry();
    let col = pf.spawn_col();
    let fire_rows = pf.boss_fire_rows();
    let rendezvous = Rendezvous::new();
    let mut track = BossTrack::new(&g, pf.config().boss_damage);
    let mut next: u16 = 1;
    tracing::info!(col, "boss deployed");

    let halted = loop {
        if pf.is_stopped() {
            return Ok(());
        }
        // Drawn at rows next-1..next+BOSS_ROWS-1; the row beneath is watched
        // until it reaches the ship.
        let hit = pf.take_hit_in(Rect::new(col, next.saturating_sub(2), BOSS_COLS, BOSS_ROWS + 1));
        let watch = next - 1 + BOSS_ROWS;
        let grazed = hit || (watch < g.sprite_top() && pf.frame().has_missile(watch, col, BOSS_COLS));
        if track.step(next, grazed) {
            break true;
        }
        if grazed {
            tracing::debug!(damage = track.damage(), row = next, "boss grazed");
        }

        rendezvous.wait().await;
        {
            let mut frame = pf.frame();
            frame.blank(next - 1, col, BOSS_COLS)?;
            frame.draw(next, col, &BOSS)?;
            frame.present()?;
        }
        next += 1;

        if fire_rows.contains(&next) {
            for dx in 1..=3 {
                let ticket = rendezvous.register();
                let missile = enemy_missile::descend(Arc::clone(&pf), col + dx, next + 4, ticket);
                actors.spawn("enemy_missile", missile);
            }
        }
        if track.at_floor(next) {
            break false;
        }
        pf.pause(TEMPO_C_MS).await;
    };

    let end = resolve_boss(&g, next, halted);
    tracing::info!(row = next, damage = track.damage(), ?end, "boss done");
    let top = next - 1;
    match end {
        DescentEnd::Destroyed | DescentEnd::NearMiss => {
            {
                let mut frame = pf.frame();
                frame.bell(2)?;
            }
            pf.animate(top, col, &BOSS_WRECK, TEMPO_A_MS).await?;
            {
                let mut frame = pf.frame();
                frame.blank_rows(top, col, BOSS_COLS, BOSS_ROWS)?;
                if end == DescentEnd::Destroyed {
                    frame.add_score(STD_BOSS_POINTS)?;
                    frame.restore_shield()?;
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
                frame.blank_rows(top, col, BOSS_COLS, BOSS_ROWS)?;
                frame.present()?;
            }
            pf.fire_critical(Critical::Breach);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::playfield::tests::playfield;
    use std::io;
    use tty_invaders_core::{Geometry, SpawnRng};
    use tty_invaders_types::{BLANK, PL_MISS_SEQ, SPRITE_ROWS, STD_SHIELD_LEV};

    fn tough_boss(threshold: u32) -> Arc<Playfield> {
        let config = GameConfig {
            seed: Some(11),
            boss_damage: threshold,
            ..GameConfig::default()
        };
        let geometry = Geometry::new(40, 100).unwrap();
        let pf = Arc::new(Playfield::new(geometry, config, Box::new(io::sink())));
        pf.init_screen().unwrap();
        pf
    }

    #[tokio::test(start_paused = true)]
    async fn grazed_boss_goes_down_high() {
        let pf = tough_boss(3);
        {
            let mut frame = pf.frame();
            frame.change_shield(-2).unwrap();
            for row in 12..=20 {
                for col in 0..100 {
                    frame.put(row, col, PL_MISS_SEQ[0]).unwrap();
                }
            }
        }
        let (actors, _faults) = Actors::new();

        run_boss(pf.clone(), actors.clone()).await.unwrap();
        actors.shutdown().await;

        let round = pf.round_state();
        assert_eq!(round.score(), STD_BOSS_POINTS);
        assert_eq!(round.shield(), STD_SHIELD_LEV);
        assert!(!pf.critical().is_pending());
    }

    /// Column the boss of a fresh seed-7 playfield spawns at.
    fn boss_col(pf: &Playfield) -> u16 {
        SpawnRng::new(Some(7)).spawn_col(pf.geometry())
    }

    /// Empty the ship rows so boss missiles fall through to the floor.
    fn clear_ship(pf: &Playfield) {
        let g = *pf.geometry();
        pf.frame().blank_rows(g.sprite_top(), 0, g.cols(), SPRITE_ROWS).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn untouched_boss_breaches() {
        let pf = playfield(40, 100);
        clear_ship(&pf);
        let (actors, _faults) = Actors::new();

        run_boss(pf.clone(), actors.clone()).await.unwrap();
        actors.shutdown().await;

        assert_eq!(pf.critical().take(), Some(Critical::Breach));
        assert_eq!(pf.round_state().score(), 0);
        let fb = pf.snapshot();
        let g = *pf.geometry();
        let top = g.boss_floor_row() - 1;
        for r in top..top + BOSS_ROWS {
            assert!(!fb.row(r).unwrap().iter().any(|&c| c == '┃'), "row {r}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ship_glyphs_under_the_boss_are_not_grazes() {
        let pf = playfield(40, 100);
        let g = *pf.geometry();
        let col = boss_col(&pf);
        clear_ship(&pf);
        {
            // Ship body glyphs right under the boss, clear of its missile lanes.
            let mut frame = pf.frame();
            for row in g.sprite_top()..g.sprite_top() + SPRITE_ROWS {
                for dx in [0, 1, 6, 7] {
                    frame.put(row, col + dx, PL_MISS_SEQ[1]).unwrap();
                }
            }
        }
        let (actors, _faults) = Actors::new();

        run_boss(pf.clone(), actors.clone()).await.unwrap();
        actors.shutdown().await;

        assert_eq!(pf.critical().take(), Some(Critical::Breach));
        assert_eq!(pf.round_state().score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn low_graze_is_a_near_miss() {
        let pf = playfield(40, 100);
        let g = *pf.geometry();
        clear_ship(&pf);
        {
            // First watched when the boss is already below the safety row.
            let mut frame = pf.frame();
            for col in 0..g.cols() {
                frame.put(g.sprite_top() - 1, col, PL_MISS_SEQ[0]).unwrap();
            }
        }
        let (actors, _faults) = Actors::new();

        run_boss(pf.clone(), actors.clone()).await.unwrap();
        actors.shutdown().await;

        assert_eq!(pf.critical().take(), Some(Critical::NearMiss));
        let round = pf.round_state();
        assert_eq!(round.score(), 0);
        assert_eq!(round.shield(), STD_SHIELD_LEV);
        // The wreck was played and cleared where the boss halted.
        let col = boss_col(&pf);
        let top = g.boss_low_row() - 1;
        let fb = pf.snapshot();
        for r in top..top + BOSS_ROWS {
            for c in col..col + BOSS_COLS {
                assert_eq!(fb.get(c, r), Some(BLANK), "({r}, {c})");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hit_inside_the_boss_counts_as_graze() {
        let pf = tough_boss(1);
        let (actors, _faults) = Actors::new();
        let task = tokio::spawn(run_boss(pf.clone(), actors.clone()));

        // After the third step the boss is drawn from row 3.
        tokio::time::sleep(std::time::Duration::from_millis(450)).await;
        let fb = pf.snapshot();
        let (col, _) = (0..100u16)
            .map(|c| (c, fb.get(c, 3)))
            .find(|(_, ch)| *ch == Some('╭'))
            .unwrap();
        pf.hit().fire(crate::signal::Hit { row: 8, col: col + 3 });

        task.await.unwrap().unwrap();
        actors.shutdown().await;
        assert_eq!(pf.round_state().score(), STD_BOSS_POINTS);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_round_recalls_the_boss() {
        let pf = playfield(40, 100);
        pf.stop();
        let (actors, _faults) = Actors::new();
        run_boss(pf.clone(), actors.clone()).await.unwrap();
        assert_eq!(pf.frames_presented(), 1);
        assert!(!pf.critical().is_pending());
    }
}
