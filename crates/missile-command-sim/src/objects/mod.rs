//! Game objects.
//!
//! Every variant embeds a [`Body`] holding identity, kinematics, health and
//! the sprite handle. Behavior is dispatched through [`GameObject`]. Objects
//! never call out to other components: anything that should happen as a
//! consequence of an interaction or update is pushed as a [`Signal`] and
//! forwarded to the event bus by the caller.

pub mod bomber;
pub mod city;
pub mod explosion;
pub mod missile;
pub mod turret;
pub mod turret_shot;

use missile_command_core::config::GameParameters;
use missile_command_core::enums::ObjectType;
use missile_command_core::state::ObjectView;
use missile_command_core::types::{ObjectId, Particle, Position};

use crate::sprite::{GameSprite, SpriteUpdate};

pub use bomber::Bomber;
pub use city::City;
pub use explosion::Explosion;
pub use missile::{Mirv, Missile};
pub use turret::{ShotError, Turret};
pub use turret_shot::TurretShot;

/// Something an object wants the rest of the game to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A missile or MIRV blew up at `at`.
    MissileDetonated { at: Particle },
    BomberDestroyed { at: Particle },
    /// A turret shot reached its target altitude (or was stopped).
    ShotArrived { at: Particle },
    BombDropped { from: Particle },
    MirvDeployed { from: Particle },
    TurretFired {
        turret: ObjectId,
        source: Position,
        target: Position,
    },
    /// A projectile struck `second` and detonated on contact.
    Collision { first: ObjectId, second: ObjectId },
    CityDestroyed { city: ObjectId, at: Position },
}

/// Per-tick inputs for [`GameObject::update`].
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub params: &'a GameParameters,
    pub tick_ms: u64,
}

/// Outcome of [`Body::apply_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    /// True only on the call that took health from positive to ≤ 0.
    pub died: bool,
}

/// State shared by all objects.
pub struct Body {
    id: ObjectId,
    kind: ObjectType,
    pub particle: Particle,
    health: i32,
    pub hull_radius: f64,
    /// Exempt from the dead-object purge.
    pub persist_after_dead: bool,
    pub is_transparent: bool,
    sprite: Box<dyn GameSprite>,
    sprite_killed: bool,
}

impl Body {
    pub fn new(
        kind: ObjectType,
        particle: Particle,
        health: i32,
        hull_radius: f64,
        sprite: Box<dyn GameSprite>,
    ) -> Self {
        Self {
            id: 0,
            kind,
            particle,
            health,
            hull_radius,
            persist_after_dead: false,
            is_transparent: false,
            sprite,
            sprite_killed: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    pub fn center(&self) -> Position {
        self.particle.position
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn apply_damage(&mut self, amount: i32) -> DamageResult {
        let was_alive = self.is_alive();
        self.health -= amount;
        DamageResult {
            died: was_alive && !self.is_alive(),
        }
    }

    /// Drop health to zero. Health already at or below zero is left alone.
    pub fn destroy(&mut self) -> DamageResult {
        let amount = self.health.max(0);
        self.apply_damage(amount)
    }

    /// Surface distance between two hulls; ≤ 0 means they touch.
    pub fn hull_distance(&self, other: &Body) -> f64 {
        self.center().distance_to(&other.center()) - self.hull_radius - other.hull_radius
    }

    /// Send the final sprite update. Later calls do nothing.
    pub fn kill_sprite(&mut self) -> bool {
        if self.sprite_killed {
            return false;
        }
        self.sprite_killed = true;
        self.sprite.update(&SpriteUpdate::killed(self.center()));
        true
    }

    pub fn is_sprite_killed(&self) -> bool {
        self.sprite_killed
    }

    pub fn push_sprite(&mut self, update: SpriteUpdate) {
        if !self.sprite_killed {
            self.sprite.update(&update);
        }
    }

    pub fn sprite_height(&self) -> f64 {
        self.sprite.height()
    }
}

/// Closed set of object variants.
pub enum GameObject {
    Missile(Missile),
    Mirv(Mirv),
    Bomber(Bomber),
    Turret(Turret),
    City(City),
    Explosion(Explosion),
    AirBurst(Explosion),
    TurretShot(TurretShot),
}

impl GameObject {
    pub fn body(&self) -> &Body {
        match self {
            GameObject::Missile(m) => &m.body,
            GameObject::Mirv(m) => &m.missile.body,
            GameObject::Bomber(b) => &b.body,
            GameObject::Turret(t) => &t.body,
            GameObject::City(c) => &c.body,
            GameObject::Explosion(e) | GameObject::AirBurst(e) => &e.body,
            GameObject::TurretShot(s) => &s.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            GameObject::Missile(m) => &mut m.body,
            GameObject::Mirv(m) => &mut m.missile.body,
            GameObject::Bomber(b) => &mut b.body,
            GameObject::Turret(t) => &mut t.body,
            GameObject::City(c) => &mut c.body,
            GameObject::Explosion(e) | GameObject::AirBurst(e) => &mut e.body,
            GameObject::TurretShot(s) => &mut s.body,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.body().id()
    }

    pub fn kind(&self) -> ObjectType {
        self.body().kind()
    }

    pub fn center(&self) -> Position {
        self.body().center()
    }

    pub fn health(&self) -> i32 {
        self.body().health()
    }

    pub fn is_alive(&self) -> bool {
        self.body().is_alive()
    }

    pub fn hull_distance(&self, other: &GameObject) -> f64 {
        self.body().hull_distance(other.body())
    }

    /// Whether this object ignores `other` when interacting.
    pub fn is_friend(&self, other: &GameObject) -> bool {
        let other = other.kind();
        match self {
            GameObject::Missile(_) | GameObject::Mirv(_) => Missile::is_friend(other),
            GameObject::Bomber(_) => Bomber::is_friend(other),
            GameObject::Turret(_) => Turret::is_friend(other),
            GameObject::City(_) => City::is_friend(other),
            GameObject::Explosion(e) | GameObject::AirBurst(e) => e.is_friend(other),
            GameObject::TurretShot(_) => TurretShot::is_friend(other),
        }
    }

    /// Act on `other`. Passive variants do nothing.
    pub fn interact(&mut self, other: &mut GameObject, signals: &mut Vec<Signal>) {
        match self {
            GameObject::Missile(m) => m.interact(other, signals),
            GameObject::Mirv(m) => m.missile.interact(other, signals),
            GameObject::Explosion(e) | GameObject::AirBurst(e) => e.interact(other),
            GameObject::TurretShot(s) => s.interact(other, signals),
            GameObject::Bomber(_) | GameObject::Turret(_) | GameObject::City(_) => {}
        }
    }

    /// Advance one tick.
    pub fn update(&mut self, frame: &Frame<'_>, signals: &mut Vec<Signal>) {
        match self {
            GameObject::Missile(m) => m.update(frame, signals),
            GameObject::Mirv(m) => m.update(frame, signals),
            GameObject::Bomber(b) => b.update(frame, signals),
            GameObject::Turret(t) => t.update(),
            GameObject::City(c) => c.update(),
            GameObject::Explosion(e) | GameObject::AirBurst(e) => e.update(frame),
            GameObject::TurretShot(s) => s.update(frame, signals),
        }
    }

    pub fn view(&self) -> ObjectView {
        let body = self.body();
        ObjectView {
            id: body.id(),
            kind: body.kind(),
            position: body.center(),
            health: body.health(),
            hull_radius: body.hull_radius,
        }
    }

    pub fn as_turret(&self) -> Option<&Turret> {
        match self {
            GameObject::Turret(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_turret_mut(&mut self) -> Option<&mut Turret> {
        match self {
            GameObject::Turret(t) => Some(t),
            _ => None,
        }
    }
}
