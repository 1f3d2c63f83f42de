//! Entity storage and the per-tick mutation surface
//!
//! A stage bundles everything a state handler is allowed to touch: the named
//! entity collections, the camera, the clear color, and a pending state
//! switch. The scheduler owns the stage and lends it out for exactly one
//! handler call per tick.

use crate::camera::Camera;
use crate::entity::Entity;
use crate::surface::Color;

struct Collection<E> {
    name: String,
    entities: Vec<E>,
}

/// Named, ordered entity collections plus the shared draw settings.
pub struct Stage<E> {
    collections: Vec<Collection<E>>,
    pub camera: Camera,
    pub clear_color: Color,
    next_state: Option<String>,
}

impl<E> Default for Stage<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Stage<E> {
    pub fn new() -> Self {
        Self {
            collections: Vec::new(),
            camera: Camera::default(),
            clear_color: Color::BLACK,
            next_state: None,
        }
    }

    /// Mutable access to a collection, created empty on first use.
    ///
    /// Creation order is remembered and becomes the default render order.
    pub fn collection_mut(&mut self, name: &str) -> &mut Vec<E> {
        let idx = match self.collections.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.collections.push(Collection {
                    name: name.to_owned(),
                    entities: Vec::new(),
                });
                self.collections.len() - 1
            }
        };
        &mut self.collections[idx].entities
    }

    pub fn collection(&self, name: &str) -> Option<&[E]> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.entities.as_slice())
    }

    /// Insert an entity at the end of a collection.
    ///
    /// Insertions made during an update pass are visible to the same or a
    /// later draw pass, never retroactively to one already in progress.
    pub fn spawn(&mut self, name: &str, entity: E) {
        self.collection_mut(name).push(entity);
    }

    /// Collection names in creation order
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.iter().map(|c| c.name.clone()).collect()
    }

    /// Empty the named collections, or every collection when none are given
    pub fn clear(&mut self, names: &[&str]) {
        for c in &mut self.collections {
            if names.is_empty() || names.contains(&c.name.as_str()) {
                c.entities.clear();
            }
        }
    }

    /// Request a state switch; the scheduler applies it after the current
    /// handler returns.
    pub fn switch_to(&mut self, state: &str) {
        self.next_state = Some(state.to_owned());
    }

    pub(crate) fn take_next_state(&mut self) -> Option<String> {
        self.next_state.take()
    }
}

impl<E: Entity> Stage<E> {
    /// Remove every entity whose removal flag is set, in the given collection
    /// order, preserving the relative order of survivors.
    ///
    /// A name with no matching collection is a programming error in the
    /// render order and panics.
    pub(crate) fn sweep(&mut self, order: &[String]) {
        for name in order {
            let collection = self
                .collections
                .iter_mut()
                .find(|c| &c.name == name)
                .unwrap_or_else(|| panic!("unknown collection in render order: {name}"));
            collection.entities.retain(|e| !e.removed());
        }
    }
}
