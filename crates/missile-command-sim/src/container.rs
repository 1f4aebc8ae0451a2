//! Owner of every live game object.

use missile_command_core::enums::ObjectType;
use missile_command_core::types::ObjectId;

use crate::objects::GameObject;

#[derive(Default)]
pub struct GameObjectContainer {
    objects: Vec<GameObject>,
    next_id: ObjectId,
}

impl GameObjectContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `object` and assign it the next id.
    pub fn add(&mut self, mut object: GameObject) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        object.body_mut().set_id(id);
        self.objects.push(object);
        id
    }

    pub fn get(&self, index: usize) -> Option<&GameObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut GameObject> {
        self.objects.get_mut(index)
    }

    pub fn find(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn find_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn as_slice(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn as_mut_slice(&mut self) -> &mut [GameObject] {
        &mut self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn count_type(&self, kind: ObjectType) -> usize {
        self.objects.iter().filter(|o| o.kind() == kind).count()
    }

    pub fn contains_type(&self, kind: ObjectType) -> bool {
        self.objects.iter().any(|o| o.kind() == kind)
    }

    /// Remove every dead object not flagged `persist_after_dead`.
    ///
    /// Each removed object's sprite is killed before removal. Returns the
    /// removed objects.
    pub fn purge_dead(&mut self) -> Vec<GameObject> {
        let (live, mut dead): (Vec<_>, Vec<_>) = std::mem::take(&mut self.objects)
            .into_iter()
            .partition(|o| o.is_alive() || o.body().persist_after_dead);
        self.objects = live;
        for object in &mut dead {
            object.body_mut().kill_sprite();
        }
        dead
    }

    /// Remove everything. Ids keep counting up.
    pub fn clear(&mut self) {
        for mut object in self.objects.drain(..) {
            object.body_mut().kill_sprite();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Body, City, Explosion, Missile};
    use crate::sprite::recording::{sprite, SpriteLog};
    use crate::sprite::SpriteKind;
    use missile_command_core::types::{Particle, Position};

    fn body(kind: ObjectType, log: &SpriteLog) -> Body {
        Body::new(
            kind,
            Particle::at_rest(Position::new(10.0, 10.0)),
            100,
            5.0,
            sprite(SpriteKind::City, log),
        )
    }

    fn kills(log: &SpriteLog) -> usize {
        log.lock().unwrap().iter().filter(|(_, u)| !u.is_alive).count()
    }

    #[test]
    fn test_ids_are_monotonic_from_zero() {
        let log = SpriteLog::default();
        let mut container = GameObjectContainer::new();
        let a = container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        let b = container.add(GameObject::Missile(Missile::new(body(
            ObjectType::Missile,
            &log,
        ))));
        let c = container.add(GameObject::Explosion(Explosion::new(
            body(ObjectType::Explosion, &log),
            10.0,
            100,
            1,
            1,
        )));
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(container.get(1).map(|o| o.id()), Some(1));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let log = SpriteLog::default();
        let mut container = GameObjectContainer::new();
        container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        container.clear();
        let next = container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        assert_eq!(next, 1);
    }

    #[test]
    fn test_purge_is_idempotent() {
        let log = SpriteLog::default();
        let mut container = GameObjectContainer::new();
        let doomed = container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        if let Some(object) = container.find_mut(doomed) {
            object.body_mut().apply_damage(500);
        }

        let removed = container.purge_dead();
        assert_eq!(removed.len(), 1);
        assert_eq!(kills(&log), 1);

        let removed = container.purge_dead();
        assert!(removed.is_empty());
        assert_eq!(kills(&log), 1, "second purge must not signal again");
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_purge_skips_persistent_objects() {
        let log = SpriteLog::default();
        let mut container = GameObjectContainer::new();
        let mut keeper = body(ObjectType::City, &log);
        keeper.persist_after_dead = true;
        keeper.apply_damage(100);
        container.add(GameObject::City(City::new(keeper)));

        assert!(container.purge_dead().is_empty());
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_count_and_contains_type() {
        let log = SpriteLog::default();
        let mut container = GameObjectContainer::new();
        container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        container.add(GameObject::City(City::new(body(ObjectType::City, &log))));
        assert_eq!(container.count_type(ObjectType::City), 2);
        assert!(!container.contains_type(ObjectType::Bomber));
    }
}
