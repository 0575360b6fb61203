use std::collections::HashMap;

use awsm_animation_core::{LayerKey, NodeKey, SourceCurve, TimeMode};
use slotmap::SlotMap;

use super::{
    AnimationStack, Channel, NodeAttribute, PivotConfig, PivotSet, SceneSource,
};
use crate::error::{AnimationImportError, Result};

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    attribute: NodeAttribute,
    children: Vec<NodeKey>,
    has_target: bool,
    source_pivot: PivotConfig,
    destination_pivot: PivotConfig,
    rotation_active: bool,
}

/// A bake request the scene received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotBakeRecord {
    pub stack: usize,
    pub frame_rate: f64,
}

/// A scene held in memory, with curves already expressed in local space.
///
/// Baking pivots only records the request, the curves are left as they are.
#[derive(Debug, Clone)]
pub struct MemoryScene {
    nodes: SlotMap<NodeKey, MemoryNode>,
    root: NodeKey,
    layers: SlotMap<LayerKey, ()>,
    stacks: Vec<AnimationStack>,
    curves: HashMap<(NodeKey, LayerKey, Channel), SourceCurve>,
    time_mode: TimeMode,
    application_name: Option<String>,
    active_bake: Option<PivotBakeRecord>,
    bake_history: Vec<PivotBakeRecord>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new(TimeMode::default())
    }
}

impl MemoryScene {
    /// Creates a scene holding only a root node.
    pub fn new(time_mode: TimeMode) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(MemoryNode::default());
        Self {
            nodes,
            root,
            layers: SlotMap::with_key(),
            stacks: Vec::new(),
            curves: HashMap::new(),
            time_mode,
            application_name: None,
            active_bake: None,
            bake_history: Vec::new(),
        }
    }

    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn add_node(&mut self, parent: NodeKey, attribute: NodeAttribute) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return Err(AnimationImportError::UnknownNode(parent));
        }
        let node = self.nodes.insert(MemoryNode {
            attribute,
            ..Default::default()
        });
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(node);
        }
        Ok(node)
    }

    pub fn set_target(&mut self, node: NodeKey, has_target: bool) -> Result<()> {
        self.node_mut(node)?.has_target = has_target;
        Ok(())
    }

    /// Adds a stack without layers and returns its index.
    pub fn add_stack(&mut self, name: impl Into<String>) -> usize {
        self.stacks.push(AnimationStack {
            name: name.into(),
            layers: Vec::new(),
        });
        self.stacks.len() - 1
    }

    pub fn add_layer(&mut self, stack: usize) -> Result<LayerKey> {
        let stack = self
            .stacks
            .get_mut(stack)
            .ok_or(AnimationImportError::MissingStack(stack))?;
        let layer = self.layers.insert(());
        stack.layers.push(layer);
        Ok(layer)
    }

    /// Adds a stack with a single layer and returns the layer.
    pub fn add_stack_with_layer(&mut self, name: impl Into<String>) -> LayerKey {
        let layer = self.layers.insert(());
        self.stacks.push(AnimationStack {
            name: name.into(),
            layers: vec![layer],
        });
        layer
    }

    pub fn set_curve(
        &mut self,
        node: NodeKey,
        layer: LayerKey,
        channel: Channel,
        curve: SourceCurve,
    ) -> Result<()> {
        self.node_mut(node)?;
        self.curves.insert((node, layer, channel), curve);
        Ok(())
    }

    /// The bake currently applied, if any.
    pub fn active_pivot_bake(&self) -> Option<&PivotBakeRecord> {
        self.active_bake.as_ref()
    }

    /// Every bake request received so far.
    pub fn pivot_bake_history(&self) -> &[PivotBakeRecord] {
        &self.bake_history
    }

    fn node_mut(&mut self, node: NodeKey) -> Result<&mut MemoryNode> {
        self.nodes
            .get_mut(node)
            .ok_or(AnimationImportError::UnknownNode(node))
    }
}

impl SceneSource for MemoryScene {
    fn root(&self) -> NodeKey {
        self.root
    }

    fn children(&self, node: NodeKey) -> Option<&[NodeKey]> {
        self.nodes.get(node).map(|node| node.children.as_slice())
    }

    fn attribute(&self, node: NodeKey) -> NodeAttribute {
        self.nodes
            .get(node)
            .map(|node| node.attribute)
            .unwrap_or_default()
    }

    fn has_target(&self, node: NodeKey) -> bool {
        self.nodes.get(node).is_some_and(|node| node.has_target)
    }

    fn curve(&self, node: NodeKey, layer: LayerKey, channel: Channel) -> Option<&SourceCurve> {
        self.curves.get(&(node, layer, channel))
    }

    fn animation_stacks(&self) -> &[AnimationStack] {
        &self.stacks
    }

    fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    fn pivot(&self, node: NodeKey, set: PivotSet) -> PivotConfig {
        self.nodes
            .get(node)
            .map(|node| match set {
                PivotSet::Source => node.source_pivot,
                PivotSet::Destination => node.destination_pivot,
            })
            .unwrap_or_default()
    }

    fn set_pivot_config(&mut self, node: NodeKey, set: PivotSet, config: PivotConfig) {
        if let Some(node) = self.nodes.get_mut(node) {
            match set {
                PivotSet::Source => node.source_pivot = config,
                PivotSet::Destination => node.destination_pivot = config,
            }
        }
    }

    fn rotation_active(&self, node: NodeKey) -> bool {
        self.nodes.get(node).is_some_and(|node| node.rotation_active)
    }

    fn set_rotation_active(&mut self, node: NodeKey, active: bool) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.rotation_active = active;
        }
    }

    fn bake_pivot_animation(&mut self, stack: usize, frame_rate: f64) {
        let record = PivotBakeRecord { stack, frame_rate };
        self.active_bake = Some(record);
        self.bake_history.push(record);
    }

    fn revert_pivot_animation(&mut self) {
        self.active_bake = None;
    }
}
