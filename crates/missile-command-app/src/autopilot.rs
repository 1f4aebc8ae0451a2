//! Autopilot input producer.
//!
//! Reads the latest snapshot from another thread and clicks on the
//! lowest incoming warhead, the same way a player's mouse would.

use std::collections::HashSet;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use missile_command_core::enums::ObjectType;
use missile_command_core::events::{EventPacket, MouseInput};
use missile_command_core::state::GameStateSnapshot;
use missile_command_core::types::{ObjectId, Position};
use missile_command_sim::event_bus::EventSender;

use crate::state::SharedSnapshot;

/// Lowest live missile that has not been fired at yet.
pub fn choose_target(
    snapshot: &GameStateSnapshot,
    targeted: &HashSet<ObjectId>,
) -> Option<(ObjectId, Position)> {
    snapshot
        .objects
        .iter()
        .filter(|o| o.kind == ObjectType::Missile && o.health > 0)
        .filter(|o| !targeted.contains(&o.id))
        .min_by(|a, b| a.position.y.total_cmp(&b.position.y))
        .map(|o| (o.id, o.position))
}

fn left_click(position: Position) -> EventPacket {
    EventPacket::MouseInput(MouseInput {
        position,
        is_left_click: true,
    })
}

/// Spawn the autopilot thread. It clicks at most once per `interval` and
/// exits when `stop` fires or disconnects.
pub fn spawn_autopilot(
    events: EventSender,
    latest_snapshot: SharedSnapshot,
    stop: Receiver<()>,
    interval: Duration,
) -> std::io::Result<JoinHandle<usize>> {
    std::thread::Builder::new()
        .name("missile-command-autopilot".into())
        .spawn(move || {
            let mut targeted = HashSet::new();
            let mut clicks = 0;
            loop {
                match stop.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let snapshot = match latest_snapshot.lock() {
                    Ok(lock) => lock.clone(),
                    Err(_) => break,
                };
                let Some(snapshot) = snapshot else { continue };
                // Ids of purged objects never come back.
                targeted.retain(|id| snapshot.objects.iter().any(|o| o.id == *id));
                if let Some((id, position)) = choose_target(&snapshot, &targeted) {
                    log::debug!("autopilot firing at {id}");
                    events.send(left_click(position));
                    targeted.insert(id);
                    clicks += 1;
                }
            }
            clicks
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use missile_command_core::state::ObjectView;
    use std::sync::{Arc, Mutex};

    fn view(id: ObjectId, kind: ObjectType, y: f64) -> ObjectView {
        ObjectView {
            id,
            kind,
            position: Position::new(100.0, y),
            health: 10,
            hull_radius: 1.0,
        }
    }

    fn snapshot(objects: Vec<ObjectView>) -> GameStateSnapshot {
        GameStateSnapshot {
            objects,
            ..GameStateSnapshot::default()
        }
    }

    #[test]
    fn test_picks_lowest_missile() {
        let snap = snapshot(vec![
            view(1, ObjectType::Missile, 500.0),
            view(2, ObjectType::City, 20.0),
            view(3, ObjectType::Missile, 200.0),
        ]);
        let (id, position) = choose_target(&snap, &HashSet::new()).unwrap();
        assert_eq!(id, 3);
        assert_eq!(position.y, 200.0);
    }

    #[test]
    fn test_skips_targeted_and_dead() {
        let mut dead = view(4, ObjectType::Missile, 50.0);
        dead.health = 0;
        let snap = snapshot(vec![view(1, ObjectType::Missile, 100.0), dead]);
        let targeted: HashSet<_> = [1].into_iter().collect();
        assert!(choose_target(&snap, &targeted).is_none());
    }

    #[test]
    fn test_autopilot_clicks_and_stops() {
        let bus: missile_command_sim::event_bus::EventBus<()> =
            missile_command_sim::event_bus::EventBus::new();
        let shared: SharedSnapshot = Arc::new(Mutex::new(Some(snapshot(vec![view(
            7,
            ObjectType::Missile,
            300.0,
        )]))));
        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let handle =
            spawn_autopilot(bus.input_sender(), shared, stop_rx, Duration::from_millis(1)).unwrap();

        while bus.pending() == 0 {
            std::thread::yield_now();
        }
        stop_tx.send(()).unwrap();
        let clicks = handle.join().unwrap();
        assert_eq!(clicks, 1, "the same missile is only targeted once");
        assert_eq!(bus.pending(), 1);
    }
}
