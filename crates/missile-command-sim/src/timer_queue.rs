//! Proximity-ordered scheduler for delayed events.
//!
//! Each node stores its delay relative to the node before it, so a node's
//! absolute deadline is the sum of the delays from the head through that
//! node. [`TimerQueue::tick`] therefore only ever touches the head.

use std::collections::VecDeque;

use missile_command_core::events::EventPacket;

use crate::event_bus::EventSender;

/// A packet waiting in the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    /// Milliseconds after the previous node's deadline.
    pub delay_ms: i64,
    pub packet: EventPacket,
}

impl TimedEvent {
    /// A packet due `delay_ms` after the moment it is inserted.
    pub fn new(delay_ms: i64, packet: EventPacket) -> Self {
        Self { delay_ms, packet }
    }
}

pub struct TimerQueue {
    queue: VecDeque<TimedEvent>,
    bus: EventSender,
}

impl TimerQueue {
    pub fn new(bus: EventSender) -> Self {
        Self {
            queue: VecDeque::new(),
            bus,
        }
    }

    /// Schedule `event`, whose `delay_ms` is an absolute offset from now.
    ///
    /// A node whose deadline equals an existing one goes in front of it.
    /// Negative delays are clamped to zero.
    pub fn insert(&mut self, event: TimedEvent) {
        let TimedEvent {
            delay_ms: mut remaining,
            packet,
        } = event;
        if remaining < 0 {
            log::error!("timed event scheduled {remaining}ms in the past; clamped to 0");
            remaining = 0;
        }

        let mut index = 0;
        while index < self.queue.len() && remaining > self.queue[index].delay_ms {
            remaining -= self.queue[index].delay_ms;
            index += 1;
        }

        if let Some(next) = self.queue.get_mut(index) {
            next.delay_ms -= remaining;
        }
        self.queue.insert(
            index,
            TimedEvent {
                delay_ms: remaining,
                packet,
            },
        );
    }

    /// Advance the clock by `elapsed_ms` and publish every expired event.
    ///
    /// Returns the number of events published.
    pub fn tick(&mut self, elapsed_ms: i64) -> usize {
        let Some(head) = self.queue.front_mut() else {
            return 0;
        };
        head.delay_ms -= elapsed_ms;

        let mut fired = 0;
        while self.queue.front().is_some_and(|head| head.delay_ms <= 0) {
            if let Some(expired) = self.queue.pop_front() {
                self.bus.send(expired.packet);
                fired += 1;
            }
        }
        fired
    }

    pub fn peek(&self) -> Option<&TimedEvent> {
        self.queue.front()
    }

    /// Remove the head without publishing it.
    pub fn pop(&mut self) -> Option<TimedEvent> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Absolute deadline of every node, head first.
    pub fn deadlines(&self) -> Vec<i64> {
        self.queue
            .iter()
            .scan(0, |sum, node| {
                *sum += node.delay_ms;
                Some(*sum)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::event_bus::{EventBus, EventListener};
    use missile_command_core::events::EventType;
    use missile_command_core::types::{ObjectId, Position};

    /// Packet tagged with `tag` so the order of delivery can be checked.
    fn tagged(tag: ObjectId) -> EventPacket {
        EventPacket::OutOfAmmo { turret: tag }
    }

    fn tag_of(packet: &EventPacket) -> ObjectId {
        match packet {
            EventPacket::OutOfAmmo { turret } => *turret,
            other => panic!("unexpected packet {other:?}"),
        }
    }

    fn queue_with(delays: &[i64]) -> (TimerQueue, EventBus<()>) {
        let bus = EventBus::new();
        let mut queue = TimerQueue::new(bus.sender());
        for (tag, &delay) in delays.iter().enumerate() {
            queue.insert(TimedEvent::new(delay, tagged(tag as ObjectId)));
        }
        (queue, bus)
    }

    #[test]
    fn test_pop_order_is_non_decreasing_deadline() {
        let delays = [1200, 5, 300, 300, 0, 999, 42, 1200, 7];
        let (mut queue, _bus) = queue_with(&delays);

        let mut popped = Vec::new();
        while let Some(event) = queue.pop() {
            popped.push(delays[tag_of(&event.packet) as usize]);
        }
        let mut sorted = delays.to_vec();
        sorted.sort();
        assert_eq!(popped, sorted);
    }

    #[test]
    fn test_prefix_sums_reproduce_absolute_deadlines() {
        let delays = [250, 100, 100, 0, 40, 4000, 250, 1];
        let (queue, _bus) = queue_with(&delays);

        let mut expected = delays.to_vec();
        expected.sort();
        assert_eq!(queue.deadlines(), expected);

        for (node, deadline) in queue.queue.iter().zip(queue.deadlines()) {
            assert_eq!(delays[tag_of(&node.packet) as usize], deadline);
        }
    }

    #[test]
    fn test_ties_insert_before_equal_neighbor() {
        let (queue, _bus) = queue_with(&[100, 100]);
        let tags: Vec<ObjectId> = queue.queue.iter().map(|n| tag_of(&n.packet)).collect();
        assert_eq!(tags, vec![1, 0], "later insert goes in front of the tie");
        let stored: Vec<i64> = queue.queue.iter().map(|n| n.delay_ms).collect();
        assert_eq!(stored, vec![100, 0]);
    }

    /// Records the tag of every packet it is handed.
    struct Delivered(Arc<Mutex<Vec<ObjectId>>>);

    impl EventListener<()> for Delivered {
        fn name(&self) -> &str {
            "delivered"
        }

        fn notify(&mut self, packet: &EventPacket, _ctx: &mut ()) {
            self.0.lock().unwrap().push(tag_of(packet));
        }
    }

    #[test]
    fn test_tick_delivers_expired_events() {
        let (mut queue, mut bus) = queue_with(&[100, 100, 250]);
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let id = bus.register(Box::new(Delivered(Arc::clone(&delivered))));
        bus.subscribe(id, EventType::OutOfAmmo);

        assert_eq!(queue.tick(100), 2);
        assert_eq!(queue.tick(0), 0);
        assert_eq!(bus.pending(), 2, "both 100ms events published");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek().map(|e| e.delay_ms), Some(150));
        assert_eq!(queue.peek().map(|e| tag_of(&e.packet)), Some(2));

        assert!(bus.process_all(&mut ()).is_empty());
        assert_eq!(
            *delivered.lock().unwrap(),
            vec![1, 0],
            "tied deadlines are delivered last-inserted first"
        );
    }

    #[test]
    fn test_tick_only_touches_head() {
        let (mut queue, bus) = queue_with(&[50, 60]);
        assert_eq!(queue.tick(100), 1, "overshoot is not carried to the next node");
        assert_eq!(queue.peek().map(|e| e.delay_ms), Some(10));
        assert_eq!(queue.tick(10), 1);
        assert!(queue.is_empty());
        assert_eq!(bus.pending(), 2);
    }

    #[test]
    fn test_zero_delay_goes_to_front_and_fires_next_tick() {
        let (mut queue, _bus) = queue_with(&[50, 0]);
        assert_eq!(queue.deadlines(), vec![0, 50]);
        assert_eq!(queue.tick(0), 1);
        assert_eq!(queue.peek().map(|e| e.delay_ms), Some(50));
    }

    #[test]
    fn test_negative_delay_is_clamped() {
        let (queue, _bus) = queue_with(&[30, -20]);
        assert_eq!(queue.deadlines(), vec![0, 30]);
    }

    #[test]
    fn test_pop_and_clear_on_empty() {
        let (mut queue, _bus) = queue_with(&[]);
        assert!(queue.pop().is_none());
        assert!(queue.peek().is_none());
        assert_eq!(queue.tick(17), 0);

        queue.insert(TimedEvent::new(
            5,
            EventPacket::SpawnBomber {
                start_position: Position::default(),
            },
        ));
        queue.clear();
        assert_eq!(queue.len(), 0);
    }
}
