//! Game object: a named container of capabilities

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use slotmap::Key;

use crate::core::context::FrameContext;

use super::Component;

slotmap::new_key_type! {
    /// Handle to a [`GameObject`] stored in a scene.
    ///
    /// Handles are generational: once the object is removed, lookups with an
    /// old handle fail instead of reaching a different object.
    pub struct ObjectId;
}

/// A named entity composed of at most one component per concrete type
pub struct GameObject {
    id: ObjectId,
    name: String,
    tag: String,
    components: HashMap<TypeId, Box<dyn Component>>,
    order: Vec<TypeId>,
    uninitialized: Vec<TypeId>,
    retired: Vec<Box<dyn Component>>,
    live: bool,
    needs_removal: bool,
}

impl GameObject {
    /// Create a detached object
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::null(),
            name: name.into(),
            tag: String::new(),
            components: HashMap::new(),
            order: Vec::new(),
            uninitialized: Vec::new(),
            retired: Vec::new(),
            live: false,
            needs_removal: false,
        }
    }

    /// Set the tag (builder style)
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Attach a component (builder style)
    #[must_use]
    pub fn with<T: Component>(mut self, component: T) -> Self {
        self.attach(component);
        self
    }

    /// Scene handle; null until the object is added to a scene
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object tag, used by game code to classify contacts
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Change the tag
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// True while the object is owned by a scene
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// True once the object has been flagged for removal
    pub const fn needs_removal(&self) -> bool {
        self.needs_removal
    }

    /// Flag the object for removal at the scene's next flush point
    pub fn mark_for_removal(&mut self) {
        if !self.needs_removal {
            log::debug!("Object '{}' flagged for removal", self.name);
        }
        self.needs_removal = true;
    }

    /// Attach a component, replacing any existing one of the same type.
    ///
    /// The component is initialized at the owner's next settle point: when
    /// the object enters a scene, or before its next pass if it is already
    /// live. A replaced component that had been initialized is cleaned at
    /// that point too.
    pub fn attach<T: Component>(&mut self, component: T) -> &mut Self {
        let type_id = TypeId::of::<T>();
        let pending = self.uninitialized.contains(&type_id);

        match self.components.insert(type_id, Box::new(component)) {
            Some(previous) if !pending => {
                log::debug!(
                    "Replacing {} on '{}'",
                    std::any::type_name::<T>(),
                    self.name
                );
                self.retired.push(previous);
            }
            Some(_) => {
                log::debug!(
                    "Replacing uninitialized {} on '{}'",
                    std::any::type_name::<T>(),
                    self.name
                );
            }
            None => {
                if !self.order.contains(&type_id) {
                    self.order.push(type_id);
                }
            }
        }

        if !pending {
            self.uninitialized.push(type_id);
        }
        self
    }

    /// Detach a component. Initialized components are cleaned at the next
    /// settle point. Returns false if no such component was attached.
    ///
    /// A component cannot detach itself from inside one of its own hooks;
    /// flag the object for removal instead.
    pub fn detach<T: Component>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        let Some(component) = self.components.remove(&type_id) else {
            return false;
        };

        self.order.retain(|existing| *existing != type_id);
        let was_pending = self.uninitialized.contains(&type_id);
        self.uninitialized.retain(|existing| *existing != type_id);
        if !was_pending {
            self.retired.push(component);
        }
        true
    }

    /// Borrow a component by type
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|component| (**component).as_any().downcast_ref::<T>())
    }

    /// Mutably borrow a component by type
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|component| (**component).as_any_mut().downcast_mut::<T>())
    }

    /// Check whether a component type is attached
    pub fn has<T: Component>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<T>())
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Run `f` with a component and the rest of its owner.
    ///
    /// The component is taken out of the object for the duration of the call,
    /// so `f` may freely borrow siblings through the owner. This is how
    /// external code drives behavior that needs both, e.g. applying damage
    /// to a player.
    pub fn with_component_mut<T: Component, R>(
        &mut self,
        f: impl FnOnce(&mut T, &mut Self) -> R,
    ) -> Option<R> {
        self.take_and_call(TypeId::of::<T>(), |component, owner| {
            (*component).as_any_mut().downcast_mut::<T>().map(|typed| f(typed, owner))
        })
        .flatten()
    }

    /// Clean retired components, then initialize pending ones in attach
    /// order. Components attached during `init` are initialized in the same
    /// call.
    pub fn settle(&mut self, ctx: &mut FrameContext<'_>) {
        self.clean_retired(ctx);
        if !self.live {
            return;
        }

        while !self.uninitialized.is_empty() {
            let batch = std::mem::take(&mut self.uninitialized);
            for type_id in batch {
                self.take_and_call(type_id, |component, owner| component.init(owner, ctx));
            }
            self.clean_retired(ctx);
        }
    }

    /// Input pass over all initialized components
    pub fn handle_input(&mut self, ctx: &mut FrameContext<'_>) {
        self.settle(ctx);
        for type_id in self.order.clone() {
            if self.uninitialized.contains(&type_id) {
                continue;
            }
            self.take_and_call(type_id, |component, owner| component.handle_input(owner, ctx));
        }
    }

    /// Update pass over all initialized components
    pub fn update(&mut self, delta_time: f32, ctx: &mut FrameContext<'_>) {
        self.settle(ctx);
        for type_id in self.order.clone() {
            if self.uninitialized.contains(&type_id) {
                continue;
            }
            self.take_and_call(type_id, |component, owner| {
                component.update(delta_time, owner, ctx);
            });
        }
    }

    /// Render pass over all initialized components
    pub fn render(&self, ctx: &mut FrameContext<'_>) {
        for type_id in &self.order {
            if self.uninitialized.contains(type_id) {
                continue;
            }
            if let Some(component) = self.components.get(type_id) {
                component.render(self, ctx);
            }
        }
    }

    /// Clean every initialized component, newest first. Safe to call more
    /// than once; each component is cleaned at most once per init.
    pub fn clean(&mut self, ctx: &mut FrameContext<'_>) {
        self.clean_retired(ctx);
        for type_id in self.order.clone().into_iter().rev() {
            if self.uninitialized.contains(&type_id) {
                continue;
            }
            self.take_and_call(type_id, |component, owner| component.clean(owner, ctx));
        }
        self.clean_retired(ctx);
        self.uninitialized = self.order.clone();
        self.live = false;
    }

    pub(crate) fn enter_scene(&mut self, id: ObjectId) {
        self.id = id;
        self.live = true;
        self.needs_removal = false;
    }

    fn clean_retired(&mut self, ctx: &mut FrameContext<'_>) {
        while !self.retired.is_empty() {
            for mut component in std::mem::take(&mut self.retired) {
                component.clean(self, ctx);
            }
        }
    }

    fn take_and_call<R>(
        &mut self,
        type_id: TypeId,
        call: impl FnOnce(&mut dyn Component, &mut Self) -> R,
    ) -> Option<R> {
        let mut component = self.components.remove(&type_id)?;
        let result = call(&mut *component, self);

        match self.components.entry(type_id) {
            Entry::Vacant(slot) => {
                slot.insert(component);
            }
            Entry::Occupied(_) => {
                // Replaced from inside its own hook
                self.retired.push(component);
            }
        }
        Some(result)
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("components", &self.components.len())
            .field("live", &self.live)
            .field("needs_removal", &self.needs_removal)
            .finish()
    }
}
