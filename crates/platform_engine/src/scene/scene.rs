//! # Scene
//!
//! A scene owns its game objects in a generational arena, keeps them in
//! insertion order, and drives the frame pipeline:
//!
//! ```text
//! handle_input  input pass over live objects, erasing flagged ones in place
//! update        physics integration -> camera follow -> update pass
//!               (erasing flagged ones in place) -> sweep remaining flagged
//!               objects -> add pending objects
//! render        render pass over live objects
//! ```
//!
//! Structural changes requested from inside a pass go through
//! [`SceneCommands`]; the scene applies them after each object's hooks
//! return, so iteration never observes a half-updated list. Objects spawned
//! during a pass are not updated until the next frame.

use slotmap::SlotMap;

use crate::core::config::PhysicsConfig;
use crate::core::context::{Context, FrameContext};
use crate::object::components::TransformComponent;
use crate::object::{GameObject, ObjectId};
use crate::physics::PhysicsEngine;

use super::SceneCommands;

/// Container and frame driver for game objects
pub struct Scene {
    name: String,
    objects: SlotMap<ObjectId, GameObject>,
    order: Vec<ObjectId>,
    pending: Vec<GameObject>,
    physics: PhysicsEngine,
    commands: SceneCommands,
}

impl Scene {
    /// Create an empty scene with default physics
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_physics(name, PhysicsEngine::new(&PhysicsConfig::default()))
    }

    /// Create an empty scene with a configured integrator
    pub fn with_physics(name: impl Into<String>, physics: PhysicsEngine) -> Self {
        let name = name.into();
        log::debug!("Creating scene '{name}'");
        Self {
            name,
            objects: SlotMap::with_key(),
            order: Vec::new(),
            pending: Vec::new(),
            physics,
            commands: SceneCommands::new(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene's integrator
    pub const fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    /// Mutable access to the scene's integrator
    pub fn physics_mut(&mut self) -> &mut PhysicsEngine {
        &mut self.physics
    }

    /// Add an object immediately and initialize its components.
    ///
    /// Used while building a level. From inside a pass, queue the object
    /// with `ctx.commands.spawn` instead.
    pub fn add(&mut self, object: GameObject, ctx: &mut Context) -> ObjectId {
        self.parts(ctx).insert(object)
    }

    /// Queue an object; it joins the scene at the end of the next update pass
    pub fn add_deferred(&mut self, object: GameObject) {
        self.pending.push(object);
    }

    /// Remove an object immediately, cleaning its components.
    ///
    /// Returns false (and logs) if the object is not in this scene.
    pub fn remove(&mut self, id: ObjectId, ctx: &mut Context) -> bool {
        let Some(index) = self.order.iter().position(|existing| *existing == id) else {
            log::warn!("Cannot remove {id:?} from scene '{}': not found", self.name);
            return false;
        };
        self.parts(ctx).erase_at(index);
        true
    }

    /// Flag an object for removal at the next flush point
    pub fn request_removal(&mut self, id: ObjectId) -> bool {
        match self.objects.get_mut(id) {
            Some(object) => {
                object.mark_for_removal();
                true
            }
            None => {
                log::warn!("Cannot flag {id:?} in scene '{}': not found", self.name);
                false
            }
        }
    }

    /// First object with the given name, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.objects.get(*id).is_some_and(|object| object.name() == name))
    }

    /// Every object with the given tag, in insertion order
    pub fn find_by_tag(&self, tag: &str) -> Vec<ObjectId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.objects.get(*id).is_some_and(|object| object.tag() == tag))
            .collect()
    }

    /// Borrow an object
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Mutably borrow an object
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Whether a handle refers to an object in this scene
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Live object handles in insertion order
    pub fn object_ids(&self) -> &[ObjectId] {
        &self.order
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no objects are live
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of objects waiting to join
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Input pass
    pub fn handle_input(&mut self, ctx: &mut Context) {
        self.parts(ctx)
            .run_pass(|object, frame| object.handle_input(frame));
    }

    /// Physics, camera and update pass, then flush structural changes
    pub fn update(&mut self, delta_time: f32, ctx: &mut Context) {
        let mut parts = self.parts(ctx);

        parts.frame.physics.integrate(delta_time, &mut *parts.objects);

        let focus = parts
            .frame
            .camera
            .target()
            .and_then(|id| parts.objects.get(id))
            .and_then(|object| object.get::<TransformComponent>())
            .map(|transform| transform.position);
        parts.frame.camera.update(delta_time, focus);

        parts.run_pass(|object, frame| object.update(delta_time, frame));
        parts.sweep_flagged();
        parts.flush_pending();
    }

    /// Render pass
    pub fn render(&mut self, ctx: &mut Context) {
        let mut parts = self.parts(ctx);
        for id in parts.order.iter() {
            if let Some(object) = parts.objects.get(*id) {
                object.render(&mut parts.frame);
            }
        }
        parts.apply_commands();
    }

    /// Run one whole frame: input, update, render
    pub fn frame(&mut self, delta_time: f32, ctx: &mut Context) {
        self.handle_input(ctx);
        self.update(delta_time, ctx);
        self.render(ctx);
    }

    /// Remove and clean every object; queued objects are dropped
    pub fn clean(&mut self, ctx: &mut Context) {
        log::debug!("Cleaning scene '{}' ({} objects)", self.name, self.order.len());
        let mut parts = self.parts(ctx);
        while !parts.order.is_empty() {
            parts.erase_at(parts.order.len() - 1);
        }
        parts.pending.clear();
        parts.frame.commands.take_spawns();
        parts.frame.commands.take_removals();
    }

    fn parts<'a>(&'a mut self, ctx: &'a mut Context) -> SceneParts<'a> {
        SceneParts {
            frame: ctx.frame(&mut self.physics, &mut self.commands),
            objects: &mut self.objects,
            order: &mut self.order,
            pending: &mut self.pending,
        }
    }
}

/// A scene split into disjoint borrows for the duration of a pass
struct SceneParts<'a> {
    frame: FrameContext<'a>,
    objects: &'a mut SlotMap<ObjectId, GameObject>,
    order: &'a mut Vec<ObjectId>,
    pending: &'a mut Vec<GameObject>,
}

impl SceneParts<'_> {
    fn insert(&mut self, object: GameObject) -> ObjectId {
        let id = self.objects.insert_with_key(|id| {
            let mut object = object;
            object.enter_scene(id);
            object
        });
        self.order.push(id);

        if let Some(object) = self.objects.get_mut(id) {
            log::debug!("Added '{}' as {id:?}", object.name());
            object.settle(&mut self.frame);
        }
        self.apply_commands();
        id
    }

    fn erase_at(&mut self, index: usize) {
        let id = self.order.remove(index);
        if let Some(mut object) = self.objects.remove(id) {
            object.clean(&mut self.frame);
            log::debug!("Removed '{}'", object.name());
        }
        self.apply_commands();
    }

    fn run_pass(&mut self, mut call: impl FnMut(&mut GameObject, &mut FrameContext<'_>)) {
        let mut index = 0;
        while index < self.order.len() {
            let id = self.order[index];
            if self.objects.get(id).map_or(true, GameObject::needs_removal) {
                self.erase_at(index);
                continue;
            }
            if let Some(object) = self.objects.get_mut(id) {
                call(object, &mut self.frame);
            }
            self.apply_commands();
            index += 1;
        }
    }

    fn sweep_flagged(&mut self) {
        let mut index = 0;
        while index < self.order.len() {
            if self.objects.get(self.order[index]).map_or(true, GameObject::needs_removal) {
                self.erase_at(index);
            } else {
                index += 1;
            }
        }
    }

    fn flush_pending(&mut self) {
        while !self.pending.is_empty() {
            for object in std::mem::take(&mut *self.pending) {
                self.insert(object);
            }
        }
    }

    fn apply_commands(&mut self) {
        for id in self.frame.commands.take_removals() {
            match self.objects.get_mut(id) {
                Some(object) => object.mark_for_removal(),
                None => log::warn!("Removal requested for unknown object {id:?}"),
            }
        }
        self.pending.extend(self.frame.commands.take_spawns());
    }
}
