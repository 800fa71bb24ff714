//! Comment id allocation and lookup.
//!
//! Ids are handed out in increasing order starting at 1 and never reused,
//! even across engine restarts. The index maps live comment ids to their
//! entities so width reports can find them.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Default)]
pub struct CommentIndex {
    last_id: u64,
    live: FxHashMap<u64, Entity>,
}

impl CommentIndex {
    /// Allocate the next id.
    pub fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    pub fn insert(&mut self, id: u64, entity: Entity) {
        self.live.insert(id, entity);
    }

    pub fn remove(&mut self, id: u64) -> Option<Entity> {
        self.live.remove(&id)
    }

    pub fn get(&self, id: u64) -> Option<Entity> {
        self.live.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Forget every live comment; the id counter keeps counting.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_and_survive_clear() {
        let mut index = CommentIndex::default();
        assert_eq!(index.next_id(), 1);
        assert_eq!(index.next_id(), 2);
        index.clear();
        assert_eq!(index.next_id(), 3);
    }

    #[test]
    fn insert_get_remove() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let mut index = CommentIndex::default();
        let id = index.next_id();
        index.insert(id, entity);
        assert_eq!(index.get(id), Some(entity));
        assert_eq!(index.remove(id), Some(entity));
        assert!(index.get(id).is_none());
        assert!(index.is_empty());
    }
}
