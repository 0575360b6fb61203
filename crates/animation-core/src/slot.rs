//! Typed curve identifiers.
//!
//! A clip stores its curves under a [`CurveSlot`] instead of a formatted
//! string. The display name is only produced at the serialization boundary.

use slotmap::new_key_type;

new_key_type! {
    /// A node of the source scene graph.
    pub struct NodeKey;
    /// An animation layer of the source scene.
    pub struct LayerKey;
}

/// Animated property of a produced curve.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveProperty {
    #[strum(serialize = "Transform.Position")]
    Translation,
    #[strum(serialize = "Transform.Rotation")]
    Rotation,
    #[strum(serialize = "Transform.Scale")]
    Scale,
    #[strum(serialize = "Camera.VerticalFieldOfView")]
    VerticalFieldOfView,
    #[strum(serialize = "Camera.NearClipPlane")]
    NearClipPlane,
    #[strum(serialize = "Camera.FarClipPlane")]
    FarClipPlane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSlot {
    pub property: CurveProperty,
    /// Set for aggregate clips, where curves of many nodes share one clip.
    pub node: Option<NodeKey>,
}

impl CurveSlot {
    pub fn new(property: CurveProperty) -> Self {
        Self {
            property,
            node: None,
        }
    }

    pub fn for_node(property: CurveProperty, node: NodeKey) -> Self {
        Self {
            property,
            node: Some(node),
        }
    }

    /// `Transform.Position` or `Transform.Position[<node name>]`.
    pub fn display_name(&self, node_name: impl FnOnce(NodeKey) -> String) -> String {
        match self.node {
            Some(node) => format!("{}[{}]", self.property, node_name(node)),
            None => self.property.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn display_names() {
        let mut nodes: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let node = nodes.insert(());

        assert_eq!(
            CurveSlot::new(CurveProperty::Rotation).display_name(|_| unreachable!()),
            "Transform.Rotation"
        );
        assert_eq!(
            CurveSlot::for_node(CurveProperty::Translation, node)
                .display_name(|_| "Hips".to_string()),
            "Transform.Position[Hips]"
        );
    }

    #[test]
    fn property_names_are_unique() {
        let mut names: Vec<String> = CurveProperty::iter().map(|p| p.to_string()).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
