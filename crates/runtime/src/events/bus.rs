//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use tactics_core::{BattleEvent, EventCategory};

use super::types::{ControlEvent, TargetingEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase transitions, deployment, and results
    Battle,
    /// Turn boundaries, movement, and effect bookkeeping
    Turn,
    /// Damage, heals, deaths, and spell casts
    Combat,
    /// Range and target queries
    Targeting,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Battle, Topic::Turn, Topic::Combat, Topic::Targeting];
}

impl From<EventCategory> for Topic {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Battle => Topic::Battle,
            EventCategory::Turn => Topic::Turn,
            EventCategory::Combat => Topic::Combat,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Battle(BattleEvent),
    Targeting(TargetingEvent),
    Control(ControlEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(event) => event.category().into(),
            Event::Targeting(_) => Topic::Targeting,
            Event::Control(_) => Topic::Battle,
        }
    }

    pub fn as_battle(&self) -> Option<&BattleEvent> {
        match self {
            Event::Battle(event) => Some(event),
            Event::Targeting(_) | Event::Control(_) => None,
        }
    }
}

/// Topic-based event bus
///
/// One broadcast channel per topic, created up front. Consumers subscribe to
/// the topics they care about; events published with no subscribers are
/// dropped.
#[derive(Clone)]
pub struct EventBus {
    battle: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    targeting: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            battle: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
            targeting: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Targeting => &self.targeting,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(?topic, "no subscribers for topic");
        }
    }

    /// Publish a batch of engine events in order.
    pub fn publish_battle(&self, events: impl IntoIterator<Item = BattleEvent>) {
        for event in events {
            self.publish(Event::Battle(event));
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Subscribe to all topics
    pub fn subscribe_all(&self) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.subscribe_multiple(&Topic::ALL)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{BattleState, UnitId};

    use super::*;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut turn = bus.subscribe(Topic::Turn);

        bus.publish_battle([
            BattleEvent::Healed {
                unit: UnitId(1),
                amount: 3,
            },
            BattleEvent::TurnEnded { unit: UnitId(1) },
        ]);

        let event = combat.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Combat);
        assert!(combat.try_recv().is_err());

        let event = turn.recv().await.unwrap();
        assert_eq!(
            event.as_battle(),
            Some(&BattleEvent::TurnEnded { unit: UnitId(1) })
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Battle(BattleEvent::StateChanged {
            from: BattleState::Setup,
            to: BattleState::Deployment,
        }));
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::Targeting(TargetingEvent::TargetsComputed {
            unit: UnitId(2),
            targets: vec![UnitId(5)],
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
