//! Bombers cross the screen left to right and drop a bomb in each
//! screen-width interval they enter.

use missile_command_core::enums::ObjectType;

use super::{Body, Frame, Signal};
use crate::sprite::SpriteUpdate;

pub struct Bomber {
    pub body: Body,
    /// One armed flag per drop interval.
    bombs: Vec<bool>,
    drop_interval: f64,
    finished: bool,
}

impl Bomber {
    pub fn new(body: Body, bomb_count: usize, drop_interval: f64) -> Self {
        Self {
            body,
            bombs: vec![true; bomb_count],
            drop_interval,
            finished: false,
        }
    }

    pub fn is_friend(other: ObjectType) -> bool {
        other != ObjectType::Bomber && other != ObjectType::Missile && other != ObjectType::Cursor
    }

    pub fn drop_interval(&self) -> f64 {
        self.drop_interval
    }

    pub fn armed_bombs(&self) -> usize {
        self.bombs.iter().filter(|armed| **armed).count()
    }

    pub fn update(&mut self, frame: &Frame<'_>, signals: &mut Vec<Signal>) {
        if self.finished {
            return;
        }
        if !self.body.is_alive() {
            self.finished = true;
            signals.push(Signal::BomberDestroyed {
                at: self.body.particle,
            });
            self.body.kill_sprite();
            return;
        }

        self.body.particle.advance();
        let center = self.body.center();
        self.body.push_sprite(SpriteUpdate::alive(center));

        if center.x > frame.params.max_x + self.body.hull_radius {
            // Flew off the right edge: leave play without a blast.
            log::debug!("bomber {} left the screen", self.body.id());
            self.finished = true;
            self.body.destroy();
            self.body.kill_sprite();
            return;
        }

        self.try_drop(signals);
    }

    /// Drop the bomb for the current interval if it is still armed.
    fn try_drop(&mut self, signals: &mut Vec<Signal>) {
        if self.drop_interval <= 0.0 {
            return;
        }
        let slot = (self.body.center().x / self.drop_interval).floor();
        if slot < 0.0 {
            return;
        }
        if let Some(armed) = self.bombs.get_mut(slot as usize) {
            if *armed {
                *armed = false;
                signals.push(Signal::BombDropped {
                    from: self.body.particle,
                });
            }
        }
    }
}
