//! Deferred structural changes
//!
//! Components cannot touch the scene's object list while the scene is
//! iterating it. They queue spawns and removals here instead; the scene
//! applies them after each object's hook returns. Spawned objects become
//! visible after the update pass, removals are honored at the next flush
//! point.

use crate::object::{GameObject, ObjectId};

/// Queue of spawns and removals for one scene
#[derive(Debug, Default)]
pub struct SceneCommands {
    spawns: Vec<GameObject>,
    removals: Vec<ObjectId>,
}

impl SceneCommands {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object at the end of the current update pass
    pub fn spawn(&mut self, object: GameObject) {
        self.spawns.push(object);
    }

    /// Flag an object for removal
    pub fn remove(&mut self, id: ObjectId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.removals.is_empty()
    }

    pub(crate) fn take_spawns(&mut self) -> Vec<GameObject> {
        std::mem::take(&mut self.spawns)
    }

    pub(crate) fn take_removals(&mut self) -> Vec<ObjectId> {
        std::mem::take(&mut self.removals)
    }
}
