//! Publish/subscribe event bus.
//!
//! Simulation components hand packets to [`EventBus::receive`] or to a
//! [`EventBus::sender`] handle. Other threads use an
//! [`EventBus::input_sender`] handle, whose packets are accepted at the
//! start of the next drain. [`EventBus::process_all`] drains the queue in
//! FIFO order on the simulation thread and fans each packet out to the
//! listeners subscribed to its type, in subscription order.
//!
//! Listeners are handed a mutable context `C` (the simulation world) so
//! they can act on it without holding references into it.

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender};

use missile_command_core::events::{EventPacket, EventType};
use missile_command_core::fault::{Fault, FaultKind};

/// A consumer of bus traffic.
pub trait EventListener<C>: Send {
    /// Name used in log lines.
    fn name(&self) -> &str;

    fn notify(&mut self, packet: &EventPacket, ctx: &mut C);
}

/// Handle returned by [`EventBus::register`]. Slots freed by
/// [`EventBus::deregister`] are handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Cloneable, thread-safe enqueue handle.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<EventPacket>,
}

impl EventSender {
    /// Enqueue a packet for the next drain. Never blocks.
    pub fn send(&self, packet: EventPacket) {
        if self.tx.send(packet).is_err() {
            log::warn!("event bus dropped; packet discarded");
        }
    }
}

pub struct EventBus<C> {
    listeners: Vec<Option<Box<dyn EventListener<C>>>>,
    subscriptions: HashMap<EventType, Vec<ListenerId>>,
    // Simulation-thread traffic, drained until empty.
    tx: Sender<EventPacket>,
    rx: Receiver<EventPacket>,
    // Cross-thread input, accepted once per drain.
    input_tx: Sender<EventPacket>,
    input_rx: Receiver<EventPacket>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let (input_tx, input_rx) = crossbeam_channel::unbounded();
        Self {
            listeners: Vec::new(),
            subscriptions: HashMap::new(),
            tx,
            rx,
            input_tx,
            input_rx,
        }
    }

    /// Take ownership of a listener. It receives nothing until subscribed.
    pub fn register(&mut self, listener: Box<dyn EventListener<C>>) -> ListenerId {
        if let Some(free) = self.listeners.iter().position(Option::is_none) {
            self.listeners[free] = Some(listener);
            return ListenerId(free);
        }
        self.listeners.push(Some(listener));
        ListenerId(self.listeners.len() - 1)
    }

    /// Drop every subscription of `id` and hand the listener back. Its slot
    /// is reused by the next [`register`](Self::register).
    pub fn deregister(&mut self, id: ListenerId) -> Option<Box<dyn EventListener<C>>> {
        self.unsubscribe_all(id);
        self.listeners.get_mut(id.0).and_then(Option::take)
    }

    /// Subscribe `id` to `kind`. Subscribing twice is a no-op.
    pub fn subscribe(&mut self, id: ListenerId, kind: EventType) {
        let subscribers = self.subscriptions.entry(kind).or_default();
        if !subscribers.contains(&id) {
            subscribers.push(id);
        }
    }

    pub fn subscribe_multiple(&mut self, id: ListenerId, kinds: &[EventType]) {
        for &kind in kinds {
            self.subscribe(id, kind);
        }
    }

    /// Remove one subscription. The type keeps its (possibly empty) entry.
    pub fn unsubscribe(&mut self, id: ListenerId, kind: EventType) {
        if let Some(subscribers) = self.subscriptions.get_mut(&kind) {
            subscribers.retain(|s| *s != id);
        }
    }

    pub fn unsubscribe_all(&mut self, id: ListenerId) {
        for subscribers in self.subscriptions.values_mut() {
            subscribers.retain(|s| *s != id);
        }
    }

    /// Enqueue a packet from the simulation thread.
    pub fn receive(&self, packet: EventPacket) {
        // The bus owns a receiver, so the channel cannot be disconnected.
        let _ = self.tx.send(packet);
    }

    /// Enqueue handle for components driven by the simulation thread.
    /// Packets sent during a drain are dispatched in that same drain.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Enqueue handle for input producers on other threads.
    pub fn input_sender(&self) -> EventSender {
        EventSender {
            tx: self.input_tx.clone(),
        }
    }

    /// Packets waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.rx.len() + self.input_rx.len()
    }

    pub fn subscriber_count(&self, kind: EventType) -> usize {
        self.subscriptions.get(&kind).map_or(0, Vec::len)
    }

    /// Drain the queue, dispatching every packet exactly once.
    ///
    /// Input that has arrived from other threads is queued behind the
    /// simulation traffic; input arriving after this point waits for the
    /// next call. Packets enqueued by listeners during the drain are
    /// dispatched in the same call. Returns the faults for packets that
    /// were dropped; each has already been logged.
    pub fn process_all(&mut self, ctx: &mut C) -> Vec<Fault> {
        let arrived = self.input_rx.len();
        for packet in self.input_rx.try_iter().take(arrived) {
            let _ = self.tx.send(packet);
        }

        let mut dropped = Vec::new();
        while let Ok(packet) = self.rx.try_recv() {
            if let Some(fault) = self.dispatch(&packet, ctx) {
                fault.log();
                dropped.push(fault);
            }
        }
        dropped
    }

    fn dispatch(&mut self, packet: &EventPacket, ctx: &mut C) -> Option<Fault> {
        let kind = packet.kind();
        let Some(subscribers) = self.subscriptions.get(&kind) else {
            return Some(Fault::new(
                FaultKind::UnmappedEventType,
                format!("listener table key not found for {kind:?}"),
            ));
        };
        if subscribers.is_empty() {
            return Some(Fault::new(
                FaultKind::NoSubscribers,
                format!("no observers for {kind:?}"),
            ));
        }
        for id in subscribers {
            let Some(listener) = self.listeners.get_mut(id.0).and_then(Option::as_mut) else {
                continue;
            };
            log::trace!("{} <- {kind:?}", listener.name());
            listener.notify(packet, ctx);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use missile_command_core::events::MouseInput;
    use missile_command_core::types::Position;

    type Trace = Vec<(&'static str, EventType)>;

    struct Recorder(&'static str);

    impl EventListener<Trace> for Recorder {
        fn name(&self) -> &str {
            self.0
        }

        fn notify(&mut self, packet: &EventPacket, ctx: &mut Trace) {
            ctx.push((self.0, packet.kind()));
        }
    }

    /// Re-publishes every click as a collision notification.
    struct Echo(EventSender);

    impl EventListener<Trace> for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn notify(&mut self, packet: &EventPacket, ctx: &mut Trace) {
            ctx.push(("echo", packet.kind()));
            if packet.kind() == EventType::MouseInput {
                self.0.send(EventPacket::Collision {
                    first: 0,
                    second: 1,
                });
            }
        }
    }

    fn click() -> EventPacket {
        EventPacket::MouseInput(MouseInput {
            position: Position::new(1.0, 1.0),
            is_left_click: true,
        })
    }

    fn boom() -> EventPacket {
        EventPacket::Explosion {
            position: Position::default(),
            intensity: 1,
        }
    }

    #[test]
    fn test_fan_out_in_subscription_order() {
        let mut bus = EventBus::new();
        let l2 = bus.register(Box::new(Recorder("l2")));
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe(l1, EventType::Explosion);
        bus.subscribe(l2, EventType::Explosion);

        let mut trace = Trace::new();
        bus.receive(boom());
        let faults = bus.process_all(&mut trace);

        assert!(faults.is_empty());
        assert_eq!(
            trace,
            vec![("l1", EventType::Explosion), ("l2", EventType::Explosion)]
        );
        assert_eq!(bus.pending(), 0, "queue must be empty after drain");
    }

    #[test]
    fn test_duplicate_subscribe_is_noop() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe(l1, EventType::Explosion);
        bus.subscribe_multiple(l1, &[EventType::Explosion, EventType::AirBurst]);
        assert_eq!(bus.subscriber_count(EventType::Explosion), 1);

        let mut trace = Trace::new();
        bus.receive(boom());
        bus.process_all(&mut trace);
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_unmapped_type_is_dropped_with_one_fault() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe(l1, EventType::Explosion);

        let mut trace = Trace::new();
        bus.receive(click());
        let faults = bus.process_all(&mut trace);

        assert!(trace.is_empty(), "no listener may see an unmapped packet");
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::UnmappedEventType);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_empty_subscriber_set_warns() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe(l1, EventType::Explosion);
        bus.unsubscribe(l1, EventType::Explosion);

        let mut trace = Trace::new();
        bus.receive(boom());
        let faults = bus.process_all(&mut trace);

        assert!(trace.is_empty());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::NoSubscribers);
    }

    #[test]
    fn test_unsubscribe_all() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        let l2 = bus.register(Box::new(Recorder("l2")));
        bus.subscribe_multiple(l1, &[EventType::Explosion, EventType::AirBurst]);
        bus.subscribe(l2, EventType::AirBurst);
        bus.unsubscribe_all(l1);

        let mut trace = Trace::new();
        bus.receive(boom());
        bus.receive(EventPacket::AirBurst {
            position: Position::default(),
            intensity: 1,
        });
        let faults = bus.process_all(&mut trace);

        assert_eq!(trace, vec![("l2", EventType::AirBurst)]);
        assert_eq!(faults.len(), 1, "explosion now has an empty set");
    }

    #[test]
    fn test_fifo_order_including_packets_published_during_drain() {
        let mut bus = EventBus::new();
        let echo = bus.register(Box::new(Echo(bus.sender())));
        bus.subscribe_multiple(
            echo,
            &[EventType::MouseInput, EventType::Explosion, EventType::Collision],
        );

        let mut trace = Trace::new();
        bus.receive(click());
        bus.receive(boom());
        bus.process_all(&mut trace);

        let kinds: Vec<EventType> = trace.iter().map(|(_, k)| *k).collect();
        assert_eq!(
            kinds,
            vec![EventType::MouseInput, EventType::Explosion, EventType::Collision]
        );
    }

    #[test]
    fn test_receive_from_another_thread() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe(l1, EventType::MouseInput);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sender = bus.input_sender();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        sender.send(click());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut trace = Trace::new();
        let faults = bus.process_all(&mut trace);
        assert!(faults.is_empty());
        assert_eq!(trace.len(), 100);
    }

    #[test]
    fn test_input_sent_during_drain_waits_for_next_drain() {
        let mut bus = EventBus::new();
        // Answers the click on the input channel, as a busy producer would.
        let echo = bus.register(Box::new(Echo(bus.input_sender())));
        bus.subscribe_multiple(echo, &[EventType::MouseInput, EventType::Collision]);
        let input = bus.input_sender();
        input.send(click());

        let mut trace = Trace::new();
        bus.process_all(&mut trace);
        assert_eq!(trace.len(), 1, "only input present at entry is dispatched");
        assert_eq!(bus.pending(), 1);

        bus.process_all(&mut trace);
        assert_eq!(
            trace,
            vec![("echo", EventType::MouseInput), ("echo", EventType::Collision)]
        );
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_input_is_queued_behind_simulation_traffic() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe_multiple(l1, &[EventType::MouseInput, EventType::Explosion]);
        bus.input_sender().send(click());
        bus.receive(boom());

        let mut trace = Trace::new();
        bus.process_all(&mut trace);
        assert_eq!(
            trace,
            vec![("l1", EventType::Explosion), ("l1", EventType::MouseInput)]
        );
    }

    #[test]
    fn test_deregister_frees_the_slot() {
        let mut bus = EventBus::new();
        let l1 = bus.register(Box::new(Recorder("l1")));
        bus.subscribe(l1, EventType::Explosion);

        let removed = bus.deregister(l1);
        assert_eq!(removed.map(|l| l.name().to_string()), Some("l1".to_string()));
        assert!(bus.deregister(l1).is_none(), "second deregister finds nothing");
        assert_eq!(bus.subscriber_count(EventType::Explosion), 0);

        let l2 = bus.register(Box::new(Recorder("l2")));
        assert_eq!(l2, l1, "freed slot is reused");
        bus.subscribe(l2, EventType::Explosion);

        let mut trace = Trace::new();
        bus.receive(boom());
        bus.process_all(&mut trace);
        assert_eq!(trace, vec![("l2", EventType::Explosion)]);
    }
}
