//! Per-tick model pass: pairwise interactions, updates, cleanup.

use missile_command_core::config::GameParameters;
use missile_command_core::enums::ObjectType;

use crate::container::GameObjectContainer;
use crate::objects::{Frame, GameObject, Signal};

/// Advance every object by one tick.
///
/// Objects spawned from the signals this produces are created by the
/// event processor on the next bus drain, so they first take part in the
/// following tick.
pub fn refresh(
    objects: &mut GameObjectContainer,
    params: &GameParameters,
    tick_ms: u64,
    signals: &mut Vec<Signal>,
) {
    let frame = Frame { params, tick_ms };

    // 1. Pairwise interactions
    for_each_pair_in_range(objects.as_mut_slice(), params.min_separation, |a, b| {
        a.interact(b, signals);
        b.interact(a, signals);
    });

    // 2. Updates
    for object in objects.as_mut_slice() {
        object.update(&frame, signals);
    }

    // 3. Cleanup
    for dead in objects.purge_dead() {
        if dead.kind() == ObjectType::City {
            signals.push(Signal::CityDestroyed {
                city: dead.id(),
                at: dead.center(),
            });
        }
    }
}

/// Visit every unordered pair `(i, j)`, `i < j`, of different types whose
/// centres are closer than `min_separation` on both axes.
pub fn for_each_pair_in_range(
    objects: &mut [GameObject],
    min_separation: f64,
    mut visit: impl FnMut(&mut GameObject, &mut GameObject),
) {
    for i in 0..objects.len() {
        let (head, tail) = objects.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if a.kind() == b.kind() || !in_range(a, b, min_separation) {
                continue;
            }
            visit(a, b);
        }
    }
}

/// Axis-aligned prune; a delta equal to the threshold is out of range.
pub fn in_range(a: &GameObject, b: &GameObject, min_separation: f64) -> bool {
    let delta = (a.center().as_dvec2() - b.center().as_dvec2()).abs();
    delta.x < min_separation && delta.y < min_separation
}
