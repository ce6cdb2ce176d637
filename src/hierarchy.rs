//! View hierarchy - superview/subview tree that releases bindings on removal
//!
//! Removing a view from its superview removes its whole subtree and tears
//! down every binding of every removed object, so the router never holds
//! closures for views that are no longer on screen.
//!
//! # Example
//!
//! ```ignore
//! let mut tree = ViewHierarchy::new(&router);
//! let screen = router.allocate();
//! tree.add_root(screen)?;
//! tree.add_subview(screen, pay_button.id())?;
//! tree.attach_gesture(screen, swipe.id())?;
//!
//! tree.remove_from_superview(screen)?; // pay_button and swipe lose their actions
//! ```

use crate::handle::ObjectId;
use crate::router::ActionRouter;
use anyhow::{bail, Result};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Node {
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

/// Tree of object ids
#[derive(Debug)]
pub struct ViewHierarchy {
    router: ActionRouter,
    nodes: HashMap<ObjectId, Node>,
    roots: Vec<ObjectId>,
}

impl ViewHierarchy {
    pub fn new(router: &ActionRouter) -> Self {
        Self {
            router: router.clone(),
            nodes: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Add a top-level view (a window or screen)
    pub fn add_root(&mut self, id: ObjectId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            bail!("view {id} is already in the hierarchy");
        }
        self.nodes.insert(id, Node::default());
        self.roots.push(id);
        Ok(())
    }

    /// Attach `child` under `parent`
    pub fn add_subview(&mut self, parent: ObjectId, child: ObjectId) -> Result<()> {
        if !self.nodes.contains_key(&parent) {
            bail!("superview {parent} is not in the hierarchy");
        }
        if parent == child {
            bail!("view {child} cannot be its own subview");
        }
        if self.nodes.contains_key(&child) {
            bail!("view {child} already has a superview");
        }

        self.nodes.insert(
            child,
            Node {
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Attach a gesture recognizer to a view
    pub fn attach_gesture(&mut self, view: ObjectId, gesture: ObjectId) -> Result<()> {
        self.add_subview(view, gesture)
    }

    /// Detach `id` and its subtree, tearing down every removed object
    ///
    /// Returns the removed ids, `id` first.
    pub fn remove_from_superview(&mut self, id: ObjectId) -> Result<Vec<ObjectId>> {
        let Some(parent) = self.nodes.get(&id).map(|node| node.parent) else {
            bail!("view {id} is not in the hierarchy");
        };

        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(&parent) {
                    parent.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children.iter().rev());
                removed.push(current);
            }
        }

        debug!(view = %id, count = removed.len(), "removed from superview");
        for object in &removed {
            self.router.teardown(*object);
        }
        Ok(removed)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn superview(&self, id: ObjectId) -> Option<ObjectId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn subviews(&self, id: ObjectId) -> &[ObjectId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Number of views in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
