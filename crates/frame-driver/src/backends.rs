//! Input backend implementations.
//!
//! A backend hands the loop host events that are due by a given time.

use std::collections::VecDeque;
use std::path::Path;

use floatfx_common::error::{FloatError, FloatResult};
use floatfx_scene_model::event::{parse_events, InputEvent, TimestampNs};
use tokio::sync::mpsc;

use crate::InputBackend;

/// Replays a recorded event list in timestamp order.
pub struct ReplayBackend {
    events: VecDeque<InputEvent>,
}

impl ReplayBackend {
    /// Create a replay backend. Events are sorted by timestamp; ties keep
    /// their input order.
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by_key(|e| e.timestamp_ns);
        Self {
            events: events.into(),
        }
    }

    /// Create an empty backend that never produces events.
    pub fn empty() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Load events from a JSONL file.
    pub fn from_file(path: &Path) -> FloatResult<Self> {
        if !path.exists() {
            return Err(FloatError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let events = parse_events(&content)
            .map_err(|e| FloatError::input(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), count = events.len(), "Loaded replay events");
        Ok(Self::new(events))
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputBackend for ReplayBackend {
    fn poll(&mut self, now_ns: TimestampNs) -> FloatResult<Option<InputEvent>> {
        match self.events.front() {
            Some(next) if next.timestamp_ns <= now_ns => Ok(self.events.pop_front()),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "replay"
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

/// Live backend fed by a host through an [`InputSender`].
pub struct ChannelBackend {
    receiver: mpsc::UnboundedReceiver<InputEvent>,
    closed: bool,
}

/// Sending half of a [`ChannelBackend`]. Cheap to clone.
#[derive(Clone)]
pub struct InputSender {
    sender: mpsc::UnboundedSender<InputEvent>,
}

impl ChannelBackend {
    /// Create a connected sender/backend pair.
    pub fn channel() -> (InputSender, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            InputSender { sender },
            Self {
                receiver,
                closed: false,
            },
        )
    }
}

impl InputSender {
    /// Queue an event for the next frame.
    pub fn send(&self, event: InputEvent) -> FloatResult<()> {
        self.sender
            .send(event)
            .map_err(|_| FloatError::input("float loop is no longer receiving events"))
    }
}

impl InputBackend for ChannelBackend {
    fn poll(&mut self, _now_ns: TimestampNs) -> FloatResult<Option<InputEvent>> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if !self.closed {
                    tracing::debug!("Input channel closed");
                    self.closed = true;
                }
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "channel"
    }

    fn is_exhausted(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_respects_due_time() {
        let mut backend = ReplayBackend::new(vec![
            InputEvent::pointer(200, 1.0, 1.0),
            InputEvent::ready(0),
        ]);
        assert_eq!(backend.poll(0).unwrap(), Some(InputEvent::ready(0)));
        assert_eq!(backend.poll(100).unwrap(), None);
        assert_eq!(backend.poll(200).unwrap(), Some(InputEvent::pointer(200, 1.0, 1.0)));
        assert!(backend.is_exhausted());
    }

    #[test]
    fn test_replay_keeps_order_of_equal_timestamps() {
        let mut backend = ReplayBackend::new(vec![
            InputEvent::pointer(10, 1.0, 1.0),
            InputEvent::pointer(10, 2.0, 2.0),
        ]);
        assert_eq!(backend.poll(10).unwrap(), Some(InputEvent::pointer(10, 1.0, 1.0)));
        assert_eq!(backend.poll(10).unwrap(), Some(InputEvent::pointer(10, 2.0, 2.0)));
    }

    #[test]
    fn test_replay_from_file() {
        let dir = std::env::temp_dir().join("floatfx_test_replay");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("events.jsonl");
        std::fs::write(
            &path,
            "# recorded\n{\"t\":0,\"type\":\"document_ready\"}\n{\"t\":5,\"type\":\"pointer_move\",\"x\":1,\"y\":2}\n",
        )
        .unwrap();

        let backend = ReplayBackend::from_file(&path).unwrap();
        assert_eq!(backend.remaining(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_replay() {
        let mut backend = ReplayBackend::empty();
        assert!(backend.is_exhausted());
        assert_eq!(backend.poll(u64::MAX).unwrap(), None);
    }

    #[test]
    fn test_replay_missing_file() {
        let path = std::env::temp_dir().join("floatfx_no_such_events.jsonl");
        assert!(matches!(
            ReplayBackend::from_file(&path),
            Err(FloatError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_channel_backend() {
        let (sender, mut backend) = ChannelBackend::channel();
        sender.send(InputEvent::ready(0)).unwrap();
        assert_eq!(backend.poll(0).unwrap(), Some(InputEvent::ready(0)));
        assert_eq!(backend.poll(0).unwrap(), None);
        assert!(!backend.is_exhausted());

        drop(sender);
        assert_eq!(backend.poll(0).unwrap(), None);
        assert!(backend.is_exhausted());
    }
}
