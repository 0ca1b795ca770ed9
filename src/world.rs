//! Game world state owned by the main loop.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u64,
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Entity store with monotonically increasing ids starting at 1.
pub struct World {
    entities: HashMap<u64, Entity>,
    next_id: u64,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn spawn(&mut self, name: impl Into<String>, x: f32, y: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.insert(
            id,
            Entity {
                id,
                name: name.into(),
                x,
                y,
            },
        );
        id
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Serializes all entities as `id:name:x,y` entries joined by `;`.
    pub fn serialize(&self) -> String {
        self.entities
            .values()
            .map(|e| format!("{}:{}:{},{}", e.id, e.name, e.x, e.y))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_increasing_ids() {
        let mut world = World::new();
        assert_eq!(world.spawn("tree", 1.0, 2.0), 1);
        assert_eq!(world.spawn("rock", 3.0, 4.0), 2);
        assert_eq!(world.entities().count(), 2);
    }

    #[test]
    fn serialize_format() {
        let mut world = World::new();
        world.spawn("tree", 10.0, 20.5);
        assert_eq!(world.serialize(), "1:tree:10,20.5");
    }
}
