//! View-representation contract.
//!
//! Every game object owns a sprite handle created by a [`SpriteFactory`].
//! The simulation only pushes updates into it and asks for its size; it
//! never inspects rendering state.

use missile_command_core::config::GameParameters;
use missile_command_core::types::Position;

/// What a sprite is told after each object update.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteUpdate {
    pub position: Position,
    /// Relative size in `[0, 1]`.
    pub size_scalar: f64,
    pub is_alive: bool,
    /// Optional text overlay (turret ammo).
    pub label: Option<String>,
}

impl SpriteUpdate {
    pub fn alive(position: Position) -> Self {
        Self {
            position,
            size_scalar: 1.0,
            is_alive: true,
            label: None,
        }
    }

    /// The final update an object's sprite receives.
    pub fn killed(position: Position) -> Self {
        Self {
            position,
            size_scalar: 0.0,
            is_alive: false,
            label: None,
        }
    }
}

pub trait GameSprite: Send {
    fn update(&mut self, data: &SpriteUpdate);
    fn height(&self) -> f64;
    fn width(&self) -> f64;
}

/// Which sprite a factory should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Missile,
    Mirv,
    Bomber,
    City,
    Turret,
    TurretShot,
    Explosion,
    AirBurst,
}

pub trait SpriteFactory: Send {
    fn make_sprite(&mut self, kind: SpriteKind, initial: Position) -> Box<dyn GameSprite>;
}

/// Sprite that renders nothing and only reports a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct NullSprite {
    pub width: f64,
    pub height: f64,
}

impl GameSprite for NullSprite {
    fn update(&mut self, _data: &SpriteUpdate) {}

    fn height(&self) -> f64 {
        self.height
    }

    fn width(&self) -> f64 {
        self.width
    }
}

/// Headless factory: ground objects get the ground sprite size, everything
/// else is missile-sized.
#[derive(Debug, Clone, Copy)]
pub struct NullSpriteFactory {
    ground: NullSprite,
    small: NullSprite,
}

impl NullSpriteFactory {
    pub fn new(params: &GameParameters) -> Self {
        let small = missile_command_core::constants::MISSILE_WIDTH as f64;
        Self {
            ground: NullSprite {
                width: params.ground_sprite_width,
                height: params.ground_sprite_height,
            },
            small: NullSprite {
                width: small,
                height: small,
            },
        }
    }
}

impl SpriteFactory for NullSpriteFactory {
    fn make_sprite(&mut self, kind: SpriteKind, _initial: Position) -> Box<dyn GameSprite> {
        match kind {
            SpriteKind::City | SpriteKind::Turret | SpriteKind::Bomber => Box::new(self.ground),
            _ => Box::new(self.small),
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Shared log of every update pushed to sprites made by a
    /// [`RecordingSpriteFactory`].
    pub type SpriteLog = Arc<Mutex<Vec<(SpriteKind, SpriteUpdate)>>>;

    pub struct RecordingSprite {
        kind: SpriteKind,
        log: SpriteLog,
    }

    impl GameSprite for RecordingSprite {
        fn update(&mut self, data: &SpriteUpdate) {
            self.log.lock().unwrap().push((self.kind, data.clone()));
        }

        fn height(&self) -> f64 {
            10.0
        }

        fn width(&self) -> f64 {
            10.0
        }
    }

    #[derive(Default)]
    pub struct RecordingSpriteFactory {
        pub log: SpriteLog,
    }

    impl RecordingSpriteFactory {
        pub fn kills(&self) -> usize {
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, u)| !u.is_alive)
                .count()
        }
    }

    impl SpriteFactory for RecordingSpriteFactory {
        fn make_sprite(&mut self, kind: SpriteKind, _initial: Position) -> Box<dyn GameSprite> {
            Box::new(RecordingSprite {
                kind,
                log: Arc::clone(&self.log),
            })
        }
    }

    /// A sprite that records into `log`, for building objects directly.
    pub fn sprite(kind: SpriteKind, log: &SpriteLog) -> Box<dyn GameSprite> {
        Box::new(RecordingSprite {
            kind,
            log: Arc::clone(log),
        })
    }
}
