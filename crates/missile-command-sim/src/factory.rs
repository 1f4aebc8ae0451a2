//! Builds game objects and their sprites.

use rand::Rng;

use missile_command_core::config::GameParameters;
use missile_command_core::constants::*;
use missile_command_core::enums::ObjectType;
use missile_command_core::types::{Particle, Position};

use crate::objects::{Body, Bomber, City, Explosion, GameObject, Mirv, Missile, Turret, TurretShot};
use crate::sprite::{SpriteFactory, SpriteKind};

pub struct GameObjectFactory {
    sprites: Box<dyn SpriteFactory>,
    params: GameParameters,
}

impl GameObjectFactory {
    pub fn new(sprites: Box<dyn SpriteFactory>, params: GameParameters) -> Self {
        Self { sprites, params }
    }

    fn body(
        &mut self,
        kind: ObjectType,
        sprite: SpriteKind,
        particle: Particle,
        health: i32,
        hull_radius: f64,
    ) -> Body {
        let sprite = self.sprites.make_sprite(sprite, particle.position);
        Body::new(kind, particle, health, hull_radius, sprite)
    }

    pub fn missile(&mut self, start: Particle) -> GameObject {
        let body = self.body(
            ObjectType::Missile,
            SpriteKind::Missile,
            start,
            MISSILE_HEALTH,
            MISSILE_HULL_RADIUS,
        );
        GameObject::Missile(Missile::new(body))
    }

    pub fn mirv(&mut self, start: Particle, deploy_altitude: f64) -> GameObject {
        let body = self.body(
            ObjectType::Missile,
            SpriteKind::Mirv,
            start,
            MISSILE_HEALTH,
            MISSILE_HULL_RADIUS,
        );
        GameObject::Mirv(Mirv::new(body, deploy_altitude))
    }

    /// Bomber entering at `start.x`, with random extra altitude, speed and
    /// bomb spacing.
    pub fn bomber(&mut self, start: Position, rng: &mut impl Rng) -> GameObject {
        let altitude = start.y + rng.gen_range(0..self.params.bomber_altitude_fuzz.max(1)) as f64;
        let velocity = BOMBER_VELOCITY + rng.gen_range(0..BOMBER_VELOCITY_FUZZ) as f64;
        let drop_interval =
            (self.params.max_x / BOMBER_AMMO as f64).trunc() + rng.gen_range(0..BOMBER_AMMO) as f64;

        let particle = Particle::new(Position::new(start.x, altitude), velocity, 0.0, 0.0);
        let radius = self.params.ground_hull_radius;
        let body = self.body(
            ObjectType::Bomber,
            SpriteKind::Bomber,
            particle,
            BOMBER_HEALTH,
            radius,
        );
        GameObject::Bomber(Bomber::new(body, BOMBER_AMMO, drop_interval))
    }

    pub fn turret_shot(&mut self, source: Position, target: Position) -> GameObject {
        let particle = Particle::new(
            source,
            TURRET_SHOT_VELOCITY,
            TURRET_SHOT_ACCELERATION,
            source.point_tangent(&target),
        );
        let body = self.body(
            ObjectType::TurretShot,
            SpriteKind::TurretShot,
            particle,
            MISSILE_HEALTH,
            MISSILE_HULL_RADIUS,
        );
        GameObject::TurretShot(TurretShot::new(body, target))
    }

    pub fn explosion(&mut self, position: Position, intensity: u32) -> GameObject {
        let body = self.body(
            ObjectType::Explosion,
            SpriteKind::Explosion,
            Particle::at_rest(position),
            EXPLOSION_HEALTH,
            0.0,
        );
        GameObject::Explosion(Explosion::new(
            body,
            self.params.max_explosion_radius,
            EXPLOSION_DURATION_MS,
            EXPLOSION_DAMAGE,
            intensity,
        ))
    }

    pub fn air_burst(&mut self, position: Position, intensity: u32) -> GameObject {
        let body = self.body(
            ObjectType::AirBurst,
            SpriteKind::AirBurst,
            Particle::at_rest(position),
            EXPLOSION_HEALTH,
            0.0,
        );
        GameObject::AirBurst(Explosion::new(
            body,
            self.params.max_air_burst_radius,
            AIR_BURST_DURATION_MS,
            AIR_BURST_DAMAGE,
            intensity,
        ))
    }

    pub fn city(&mut self, position: Position) -> GameObject {
        let radius = self.params.ground_hull_radius;
        let body = self.body(
            ObjectType::City,
            SpriteKind::City,
            Particle::at_rest(position),
            CITY_HEALTH,
            radius,
        );
        GameObject::City(City::new(body))
    }

    pub fn turret(&mut self, position: Position) -> GameObject {
        let radius = self.params.ground_hull_radius;
        let body = self.body(
            ObjectType::Turret,
            SpriteKind::Turret,
            Particle::at_rest(position),
            TURRET_HEALTH,
            radius,
        );
        GameObject::Turret(Turret::new(body, TURRET_AMMO))
    }
}
