//! Blocking input reader.
//!
//! Reading the terminal blocks, so it happens on a dedicated OS thread that
//! forwards mapped actions into a tokio channel. The thread ends when the
//! receiving side is dropped or the device fails.

use std::io;
use std::iter;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::map::map_key;
use crate::types::Action;

/// Spawn the terminal key reader.
pub fn spawn_reader(tx: mpsc::Sender<Action>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            if let Err(e) = forward_events(iter::repeat_with(event::read), &tx) {
                tracing::warn!(error = %e, "terminal input failed");
            }
        })
}

/// Forward key presses from `events` until they run out, fail, or the
/// receiver is dropped. Releases, repeats and non-key events are skipped.
///
/// Returns the number of actions forwarded.
pub fn forward_events<I>(events: I, tx: &mpsc::Sender<Action>) -> io::Result<usize>
where
    I: IntoIterator<Item = io::Result<Event>>,
{
    let mut forwarded = 0;
    for event in events {
        let Event::Key(key) = event? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = map_key(key) else {
            continue;
        };
        tracing::trace!(action = action.as_str(), "key");
        if tx.blocking_send(action).is_err() {
            break;
        }
        forwarded += 1;
    }
    Ok(forwarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(c: char) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::from(KeyCode::Char(c))))
    }

    fn drain(rx: &mut mpsc::Receiver<Action>) -> Vec<Action> {
        let mut got = Vec::new();
        while let Ok(a) = rx.try_recv() {
            got.push(a);
        }
        got
    }

    #[test]
    fn forwards_key_presses_in_order() {
        let (tx, mut rx) = mpsc::channel(16);
        let release = KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release);
        let events = vec![
            press('a'),
            press('?'),
            Ok(Event::Resize(80, 24)),
            press('s'),
            Ok(Event::Key(release)),
            press(' '),
            Ok(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
        ];
        assert_eq!(forward_events(events, &tx).unwrap(), 4);
        assert_eq!(
            drain(&mut rx),
            vec![
                Action::Move(Direction::Left),
                Action::Move(Direction::Right),
                Action::Fire,
                Action::Quit
            ]
        );
    }

    #[test]
    fn device_error_stops_forwarding() {
        let (tx, mut rx) = mpsc::channel(16);
        let events = vec![press('a'), Err(io::Error::new(io::ErrorKind::Other, "tty gone")), press('s')];
        let err = forward_events(events, &tx).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(drain(&mut rx), vec![Action::Move(Direction::Left)]);
    }

    #[test]
    fn stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let n = forward_events(iter::repeat_with(|| press('a')).take(4), &tx).unwrap();
        assert_eq!(n, 0);
    }
}
