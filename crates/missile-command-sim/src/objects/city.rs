use missile_command_core::enums::ObjectType;

use super::Body;
use crate::sprite::SpriteUpdate;

pub struct City {
    pub body: Body,
}

impl City {
    pub fn new(body: Body) -> Self {
        Self { body }
    }

    pub fn is_friend(other: ObjectType) -> bool {
        !matches!(
            other,
            ObjectType::Turret | ObjectType::City | ObjectType::TurretShot | ObjectType::Cursor
        )
    }

    pub fn update(&mut self) {
        if self.body.is_alive() {
            let update = SpriteUpdate::alive(self.body.center());
            self.body.push_sprite(update);
        } else {
            self.body.kill_sprite();
        }
    }
}
