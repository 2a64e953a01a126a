//! Scene stack
//!
//! Only the top scene receives input and updates; every scene renders,
//! bottom to top, so overlays such as a pause screen draw over the level
//! beneath them. Push, pop and replace requests are queued and applied
//! after the update pass, never in the middle of one.

use crate::core::context::Context;

use super::Scene;

enum Transition {
    Push(Scene),
    Pop,
    Replace(Scene),
}

/// Stack of scenes with deferred transitions
#[derive(Default)]
pub struct SceneManager {
    stack: Vec<Scene>,
    pending: Vec<Transition>,
}

impl SceneManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scene to go on top of the stack
    pub fn push(&mut self, scene: Scene) {
        self.pending.push(Transition::Push(scene));
    }

    /// Queue removal of the top scene
    pub fn pop(&mut self) {
        self.pending.push(Transition::Pop);
    }

    /// Queue replacement of the top scene
    pub fn replace(&mut self, scene: Scene) {
        self.pending.push(Transition::Replace(scene));
    }

    /// Apply queued transitions in request order
    pub fn apply_pending(&mut self, ctx: &mut Context) {
        for transition in std::mem::take(&mut self.pending) {
            match transition {
                Transition::Push(scene) => {
                    log::info!("Pushing scene '{}'", scene.name());
                    self.stack.push(scene);
                }
                Transition::Pop => self.pop_now(ctx),
                Transition::Replace(scene) => {
                    self.pop_now(ctx);
                    log::info!("Switching to scene '{}'", scene.name());
                    self.stack.push(scene);
                }
            }
        }
    }

    /// Top scene
    pub fn current(&self) -> Option<&Scene> {
        self.stack.last()
    }

    /// Mutable top scene
    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        self.stack.last_mut()
    }

    /// Number of scenes on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// True when no scene is active and none is queued
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty() && self.pending.is_empty()
    }

    /// Input pass on the top scene
    pub fn handle_input(&mut self, ctx: &mut Context) {
        if let Some(scene) = self.stack.last_mut() {
            scene.handle_input(ctx);
        }
    }

    /// Update the top scene, then apply queued transitions
    pub fn update(&mut self, delta_time: f32, ctx: &mut Context) {
        if let Some(scene) = self.stack.last_mut() {
            scene.update(delta_time, ctx);
        }
        self.apply_pending(ctx);
    }

    /// Render every scene, bottom to top
    pub fn render(&mut self, ctx: &mut Context) {
        for scene in &mut self.stack {
            scene.render(ctx);
        }
    }

    /// Clean and drop every scene, including ones still queued
    pub fn clear(&mut self, ctx: &mut Context) {
        for transition in std::mem::take(&mut self.pending) {
            if let Transition::Push(mut scene) | Transition::Replace(mut scene) = transition {
                log::info!("Dropping queued scene '{}'", scene.name());
                scene.clean(ctx);
            }
        }
        while !self.stack.is_empty() {
            self.pop_now(ctx);
        }
    }

    fn pop_now(&mut self, ctx: &mut Context) {
        match self.stack.pop() {
            Some(mut scene) => {
                log::info!("Popping scene '{}'", scene.name());
                scene.clean(ctx);
            }
            None => log::warn!("Scene pop requested on an empty stack"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::FrameContext;
    use crate::object::{Component, GameObject};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CleanCounter(Rc<Cell<u32>>);

    impl Component for CleanCounter {
        fn clean(&mut self, _owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_transitions_are_deferred() {
        let mut ctx = Context::default();
        let mut manager = SceneManager::new();
        manager.push(Scene::new("level"));
        assert_eq!(manager.depth(), 0);
        assert!(!manager.is_empty());

        manager.update(0.016, &mut ctx);
        assert_eq!(manager.depth(), 1);

        manager.push(Scene::new("pause"));
        manager.update(0.016, &mut ctx);
        assert_eq!(manager.current().map(Scene::name), Some("pause"));

        manager.pop();
        manager.update(0.016, &mut ctx);
        assert_eq!(manager.current().map(Scene::name), Some("level"));
    }

    #[test]
    fn test_replace_cleans_previous() {
        let mut ctx = Context::default();
        let mut manager = SceneManager::new();
        let mut level = Scene::new("level");
        level.add(GameObject::new("player"), &mut ctx);
        manager.push(level);
        manager.apply_pending(&mut ctx);

        manager.replace(Scene::new("game_over"));
        manager.apply_pending(&mut ctx);

        assert_eq!(manager.depth(), 1);
        assert_eq!(manager.current().map(Scene::name), Some("game_over"));
        assert!(manager.current().is_some_and(Scene::is_empty));
    }

    #[test]
    fn test_pop_on_empty_stack() {
        let mut ctx = Context::default();
        let mut manager = SceneManager::new();
        manager.pop();
        manager.apply_pending(&mut ctx);
        assert_eq!(manager.depth(), 0);
        manager.clear(&mut ctx);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_clear_cleans_queued_scenes() {
        let mut ctx = Context::default();
        let mut manager = SceneManager::new();
        let cleans = Rc::new(Cell::new(0));
        let scene_with_object = |name: &str, ctx: &mut Context| {
            let mut scene = Scene::new(name);
            scene.add(GameObject::new("crate").with(CleanCounter(Rc::clone(&cleans))), ctx);
            scene
        };

        manager.push(scene_with_object("level", &mut ctx));
        manager.apply_pending(&mut ctx);
        manager.push(scene_with_object("pause", &mut ctx));
        manager.replace(scene_with_object("game_over", &mut ctx));
        manager.pop();

        manager.clear(&mut ctx);
        assert!(manager.is_empty());
        assert_eq!(cleans.get(), 3);
    }
}
