//! The scene hierarchy flattened into an index addressed table.

use awsm_animation_core::NodeKey;
use slotmap::SecondaryMap;

use crate::{
    error::{AnimationImportError, Result},
    scene::SceneSource,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeEntry {
    pub key: NodeKey,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
}

/// Nodes in depth-first pre-order, so iterating the table is the traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTable {
    entries: Vec<NodeEntry>,
}

impl NodeTable {
    /// Walks the scene from its root with an explicit stack.
    pub fn flatten<S: SceneSource + ?Sized>(scene: &S) -> Result<Self> {
        let mut entries: Vec<NodeEntry> = Vec::new();
        let mut visited: SecondaryMap<NodeKey, ()> = SecondaryMap::new();
        let mut stack: Vec<(NodeKey, Option<usize>, usize)> = vec![(scene.root(), None, 0)];

        while let Some((key, parent, depth)) = stack.pop() {
            if visited.insert(key, ()).is_some() {
                return Err(AnimationImportError::CyclicHierarchy(key));
            }
            let children = scene
                .children(key)
                .ok_or(AnimationImportError::UnknownNode(key))?;

            let index = entries.len();
            if let Some(parent) = parent {
                entries[parent].children.push(index);
            }
            entries.push(NodeEntry {
                key,
                parent,
                children: Vec::with_capacity(children.len()),
                depth,
            });

            // reversed, so the first child is popped first
            stack.extend(
                children
                    .iter()
                    .rev()
                    .map(|child| (*child, Some(index), depth + 1)),
            );
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    pub fn get(&self, index: usize) -> Option<&NodeEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
