use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::dto::sse::ServerEvent;

/// Channel a payload is published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Every match update, for listing pages.
    Global,
    /// Updates of a single match.
    Match(Uuid),
}

/// Capability used by the match services to publish snapshots.
///
/// Publishing never fails from the caller's point of view.
pub trait Broadcaster: Send + Sync {
    /// Publish `event` to every subscriber of `topic`.
    fn publish(&self, topic: Topic, event: ServerEvent);
}

/// Simple broadcast hub wrapper used by the SSE services.
pub struct SseHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl SseHub {
    /// Construct a new hub backed by a Tokio broadcast channel with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: ServerEvent) {
        let _ = self.sender.send(event);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// [`Broadcaster`] fanning events out to SSE and WebSocket subscribers.
///
/// Match hubs are created on first subscription and dropped once a publish
/// finds them without receivers.
pub struct SseBroadcaster {
    capacity: usize,
    global: SseHub,
    matches: DashMap<Uuid, SseHub>,
}

impl SseBroadcaster {
    /// Build the hub tree with the given per-channel capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            global: SseHub::new(capacity),
            matches: DashMap::new(),
        }
    }

    /// Subscribe to a topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<ServerEvent> {
        match topic {
            Topic::Global => self.global.subscribe(),
            Topic::Match(id) => self
                .matches
                .entry(id)
                .or_insert_with(|| SseHub::new(self.capacity))
                .subscribe(),
        }
    }

    /// Number of match topics that currently have a hub.
    pub fn match_topic_count(&self) -> usize {
        self.matches.len()
    }
}

impl Broadcaster for SseBroadcaster {
    fn publish(&self, topic: Topic, event: ServerEvent) {
        match topic {
            Topic::Global => self.global.broadcast(event),
            Topic::Match(id) => {
                let orphaned = match self.matches.get(&id) {
                    Some(hub) if hub.subscriber_count() > 0 => {
                        hub.broadcast(event);
                        false
                    }
                    Some(_) => true,
                    None => false,
                };
                if orphaned {
                    self.matches
                        .remove_if(&id, |_, hub| hub.subscriber_count() == 0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(data: &str) -> ServerEvent {
        ServerEvent {
            event: Some("score_update".into()),
            data: data.into(),
        }
    }

    #[tokio::test]
    async fn match_subscribers_only_see_their_match() {
        let broadcaster = SseBroadcaster::new(4);
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let mut first_rx = broadcaster.subscribe(Topic::Match(first));
        let mut second_rx = broadcaster.subscribe(Topic::Match(second));

        broadcaster.publish(Topic::Match(first), event("first"));

        assert_eq!(first_rx.recv().await.unwrap().data, "first");
        assert!(second_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn publishing_without_receivers_drops_the_hub() {
        let broadcaster = SseBroadcaster::new(4);
        let id = Uuid::new_v4();
        drop(broadcaster.subscribe(Topic::Match(id)));
        assert_eq!(broadcaster.match_topic_count(), 1);

        broadcaster.publish(Topic::Match(id), event("nobody listens"));
        assert_eq!(broadcaster.match_topic_count(), 0);
    }

    #[tokio::test]
    async fn global_topic_reaches_every_listener() {
        let broadcaster = SseBroadcaster::new(4);
        let mut a = broadcaster.subscribe(Topic::Global);
        let mut b = broadcaster.subscribe(Topic::Global);

        broadcaster.publish(Topic::Global, event("all"));

        assert_eq!(a.recv().await.unwrap().data, "all");
        assert_eq!(b.recv().await.unwrap().data, "all");
    }
}
