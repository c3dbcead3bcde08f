//! Enemy deployment: waves and bosses in turn until the round stops.

use std::sync::Arc;

use crate::actors::Actors;
use crate::boss::run_boss;
use crate::error::Result;
use crate::playfield::Playfield;
use crate::wave::run_wave;

pub async fn deploy(pf: Arc<Playfield>, actors: Actors) -> Result<()> {
    let units = pf.config().enemy_group;
    let mut waves = 0u32;
    while !pf.is_stopped() {
        waves += 1;
        tracing::info!(wave = waves, units, "wave deployed");
        run_wave(Arc::clone(&pf), actors.clone(), units).await?;
        if pf.is_stopped() {
            break;
        }
        run_boss(Arc::clone(&pf), actors.clone()).await?;
    }
    tracing::debug!(waves, "deployment over");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playfield::tests::playfield;

    #[tokio::test(start_paused = true)]
    async fn stopped_round_deploys_nothing() {
        let pf = playfield(40, 100);
        pf.stop();
        let (actors, _faults) = Actors::new();
        deploy(pf.clone(), actors).await.unwrap();
        assert_eq!(pf.frames_presented(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn breach_ends_deployment_once_stopped() {
        let pf = playfield(40, 100);
        let (actors, _faults) = Actors::new();
        let task = tokio::spawn(deploy(pf.clone(), actors.clone()));

        // Act as the round controller: stop on the first critical event.
        pf.critical().wait().await;
        pf.stop();
        task.await.unwrap().unwrap();
        actors.shutdown().await;
    }
}
