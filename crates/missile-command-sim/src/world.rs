//! Mutable simulation state handed to event listeners, and the ground
//! layout every level starts from.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use missile_command_core::config::GameParameters;
use missile_command_core::constants::{CITY_SLOTS, TURRET_SLOTS};
use missile_command_core::enums::ObjectType;
use missile_command_core::fault::FaultLog;
use missile_command_core::types::Position;

use crate::container::GameObjectContainer;
use crate::factory::GameObjectFactory;
use crate::sprite::SpriteFactory;

pub struct SimWorld {
    pub objects: GameObjectContainer,
    pub factory: GameObjectFactory,
    pub rng: ChaCha8Rng,
    pub params: GameParameters,
    pub faults: FaultLog,
}

impl SimWorld {
    pub fn new(params: GameParameters, sprites: Box<dyn SpriteFactory>, seed: u64) -> Self {
        Self {
            objects: GameObjectContainer::new(),
            factory: GameObjectFactory::new(sprites, params.clone()),
            rng: ChaCha8Rng::seed_from_u64(seed),
            params,
            faults: FaultLog::new(),
        }
    }

    /// Replace everything with three fresh turrets and six fresh cities:
    /// turret, 3 cities, turret, 3 cities, turret.
    pub fn setup_base(&mut self) {
        self.objects.clear();
        for slot in TURRET_SLOTS {
            let turret = self.factory.turret(self.params.ground_slot(slot));
            self.objects.add(turret);
        }
        for slot in CITY_SLOTS {
            let city = self.factory.city(self.params.ground_slot(slot));
            self.objects.add(city);
        }
    }

    /// Centres of live cities and turrets, in container order.
    pub fn targets(&self) -> Vec<Position> {
        self.objects
            .iter()
            .filter(|o| o.is_alive() && matches!(o.kind(), ObjectType::City | ObjectType::Turret))
            .map(|o| o.center())
            .collect()
    }

    /// Container indices of turrets that can fire.
    pub fn armed_turrets(&self) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.as_turret().is_some_and(|t| t.is_armed()))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn remaining_cities(&self) -> u32 {
        self.objects
            .iter()
            .filter(|o| o.kind() == ObjectType::City && o.is_alive())
            .count() as u32
    }

    /// Rounds left across live turrets.
    pub fn remaining_ammo(&self) -> u32 {
        self.objects
            .iter()
            .filter_map(|o| o.as_turret())
            .filter(|t| t.body.is_alive())
            .map(|t| t.ammo())
            .sum()
    }

    pub fn enemies_remain(&self) -> bool {
        self.objects.iter().any(|o| o.kind().is_enemy())
    }
}
