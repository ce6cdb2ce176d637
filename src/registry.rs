//! Control-event registry - the key → closure table behind the router
//!
//! Holds every binding in the process plus an index of the names registered
//! on each gesture. A gesture can carry several independently named
//! bindings, and the index is what lets a single gesture fire reach all of
//! them and lets teardown find them again.
//!
//! Mutating operations hand back the closures they displace so the caller
//! can drop them outside any borrow of the registry.

use crate::action::ActionClosure;
use crate::config::RouterConfig;
use crate::event::ControlEvent;
use crate::handle::ObjectId;
use crate::key::ControlKey;
use std::collections::{BTreeSet, HashMap};

/// Gesture id → names currently registered on it
#[derive(Debug, Clone, Default)]
pub struct GestureNameIndex {
    names: HashMap<ObjectId, BTreeSet<String>>,
}

impl GestureNameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, gesture: ObjectId, name: &str) {
        self.names
            .entry(gesture)
            .or_default()
            .insert(name.to_string());
    }

    /// Remove one name, dropping the gesture's entry once it is empty
    pub fn remove(&mut self, gesture: ObjectId, name: &str) {
        if let Some(set) = self.names.get_mut(&gesture) {
            set.remove(name);
            if set.is_empty() {
                self.names.remove(&gesture);
            }
        }
    }

    /// Remove and return every name of a gesture
    pub fn take(&mut self, gesture: ObjectId) -> BTreeSet<String> {
        self.names.remove(&gesture).unwrap_or_default()
    }

    pub fn names(&self, gesture: ObjectId) -> impl Iterator<Item = &str> {
        self.names
            .get(&gesture)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn contains(&self, gesture: ObjectId) -> bool {
        self.names.contains_key(&gesture)
    }

    /// Number of gestures with at least one name
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Single source of truth binding object events to closures
#[derive(Debug)]
pub struct ControlEventRegistry {
    bindings: HashMap<ControlKey, ActionClosure>,
    gesture_names: GestureNameIndex,
    strict_shapes: bool,
}

impl ControlEventRegistry {
    pub fn new() -> Self {
        Self::with_config(&RouterConfig::default())
    }

    pub fn with_config(config: &RouterConfig) -> Self {
        Self {
            bindings: HashMap::with_capacity(config.capacity),
            gesture_names: GestureNameIndex::new(),
            strict_shapes: config.strict_shapes,
        }
    }

    /// Insert or overwrite the closure for `key`, returning the replaced one
    ///
    /// The closure's shape is not checked against the key here.
    pub fn register(&mut self, key: ControlKey, closure: ActionClosure) -> Option<ActionClosure> {
        if let ControlKey::Gesture(id, name) = &key {
            self.gesture_names.insert(*id, name);
        }
        self.bindings.insert(key, closure)
    }

    /// Remove the closure for `key`. Absent keys are a no-op.
    pub fn unregister(&mut self, key: &ControlKey) -> Option<ActionClosure> {
        if let ControlKey::Gesture(id, name) = key {
            self.gesture_names.remove(*id, name);
        }
        self.bindings.remove(key)
    }

    /// Remove every binding of one object
    pub fn clear_all(&mut self, id: ObjectId) -> Vec<(ControlKey, ActionClosure)> {
        let mut removed = Vec::new();

        for name in self.gesture_names.take(id) {
            let key = ControlKey::Gesture(id, name);
            if let Some(closure) = self.bindings.remove(&key) {
                removed.push((key, closure));
            }
        }

        for event in ControlEvent::ALL {
            let key = ControlKey::Control(id, event);
            if let Some(closure) = self.bindings.remove(&key) {
                removed.push((key, closure));
            }
        }

        let key = ControlKey::CommandItem(id);
        if let Some(closure) = self.bindings.remove(&key) {
            removed.push((key, closure));
        }

        removed
    }

    pub fn resolve_control(&self, id: ObjectId, event: ControlEvent) -> Option<ActionClosure> {
        self.bindings.get(&ControlKey::Control(id, event)).cloned()
    }

    /// The closure bound on a gesture under `name`
    pub fn resolve_gesture(&self, id: ObjectId, name: &str) -> Option<ActionClosure> {
        self.bindings
            .get(&ControlKey::Gesture(id, name.to_string()))
            .cloned()
    }

    pub fn resolve_command(&self, id: ObjectId) -> Option<ActionClosure> {
        self.bindings.get(&ControlKey::CommandItem(id)).cloned()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn contains(&self, key: &ControlKey) -> bool {
        self.bindings.contains_key(key)
    }

    /// Names currently registered on a gesture
    pub fn gesture_names(&self, id: ObjectId) -> Vec<String> {
        self.gesture_names.names(id).map(str::to_string).collect()
    }

    pub fn gesture_index(&self) -> &GestureNameIndex {
        &self.gesture_names
    }

    /// Every key belonging to one object
    pub fn keys_for(&self, id: ObjectId) -> Vec<ControlKey> {
        self.bindings
            .keys()
            .filter(|key| key.object() == id)
            .cloned()
            .collect()
    }

    pub fn strict_shapes(&self) -> bool {
        self.strict_shapes
    }
}

impl Default for ControlEventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
