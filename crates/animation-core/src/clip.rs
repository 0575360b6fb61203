use indexmap::IndexMap;

use crate::{
    curve::ClipCurve,
    slot::{CurveSlot, NodeKey},
    time::TimeSpan,
};

/// Sampled curves keyed by slot, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationClip {
    pub duration: TimeSpan,
    #[cfg_attr(feature = "serde", serde(with = "indexmap::map::serde_seq"))]
    curves: IndexMap<CurveSlot, ClipCurve>,
}

impl AnimationClip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a curve if it has at least one keyframe and returns whether it was added.
    ///
    /// A curve already stored under the same slot is replaced.
    pub fn add_curve(&mut self, slot: CurveSlot, curve: impl Into<ClipCurve>) -> bool {
        let curve = curve.into();
        if curve.is_empty() {
            return false;
        }

        if self.curves.insert(slot, curve).is_some() {
            tracing::warn!("replacing existing {} curve", slot.property);
        }
        self.duration = self
            .curves
            .values()
            .filter_map(ClipCurve::end_time)
            .max()
            .unwrap_or_default();

        true
    }

    pub fn curve(&self, slot: &CurveSlot) -> Option<&ClipCurve> {
        self.curves.get(slot)
    }

    pub fn curves(&self) -> impl Iterator<Item = (&CurveSlot, &ClipCurve)> {
        self.curves.iter()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Clips without curves are not materialized.
    pub fn into_non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Resolves slots to display names for serialization.
    pub fn named_curves<'a>(
        &'a self,
        node_name: impl Fn(NodeKey) -> String + 'a,
    ) -> impl Iterator<Item = (String, &'a ClipCurve)> + 'a {
        self.curves
            .iter()
            .map(move |(slot, curve)| (slot.display_name(&node_name), curve))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        curve::{AnimationCurve, CurveInterpolation, Keyframe},
        slot::CurveProperty,
    };

    fn float_curve(times: &[i64]) -> AnimationCurve<f32> {
        AnimationCurve::from_keyframes(
            CurveInterpolation::Linear,
            times
                .iter()
                .map(|time| Keyframe::new(TimeSpan(*time), 0.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_curves_are_not_added() {
        let mut clip = AnimationClip::new();
        assert!(!clip.add_curve(
            CurveSlot::new(CurveProperty::NearClipPlane),
            AnimationCurve::<f32>::default()
        ));
        assert!(clip.is_empty());
        assert_eq!(clip.into_non_empty(), None);
    }

    #[test]
    fn duration_is_max_last_keyframe() {
        let mut clip = AnimationClip::new();
        clip.add_curve(CurveSlot::new(CurveProperty::NearClipPlane), float_curve(&[0, 50]));
        clip.add_curve(
            CurveSlot::new(CurveProperty::Translation),
            AnimationCurve::from_keyframes(
                CurveInterpolation::Cubic,
                vec![Keyframe::new(TimeSpan(20), Vec3::ZERO)],
            )
            .unwrap(),
        );
        assert_eq!(clip.duration, TimeSpan(50));

        clip.add_curve(CurveSlot::new(CurveProperty::FarClipPlane), float_curve(&[10, 80]));
        assert_eq!(clip.duration, TimeSpan(80));
        assert_eq!(clip.len(), 3);
    }

    #[test]
    fn replacing_a_slot_recomputes_duration() {
        let slot = CurveSlot::new(CurveProperty::VerticalFieldOfView);
        let mut clip = AnimationClip::new();
        clip.add_curve(slot, float_curve(&[0, 100]));
        clip.add_curve(slot, float_curve(&[0, 40]));
        assert_eq!(clip.len(), 1);
        assert_eq!(clip.duration, TimeSpan(40));
    }

    #[test]
    fn named_curves_keep_insertion_order() {
        let mut clip = AnimationClip::new();
        clip.add_curve(CurveSlot::new(CurveProperty::FarClipPlane), float_curve(&[0]));
        clip.add_curve(CurveSlot::new(CurveProperty::NearClipPlane), float_curve(&[0]));
        let names: Vec<String> = clip.named_curves(|_| String::new()).map(|(name, _)| name).collect();
        assert_eq!(names, ["Camera.FarClipPlane", "Camera.NearClipPlane"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_keeps_slots_and_order() {
        let mut nodes: slotmap::SlotMap<NodeKey, ()> = slotmap::SlotMap::with_key();
        let node = nodes.insert(());

        let mut clip = AnimationClip::new();
        clip.add_curve(CurveSlot::for_node(CurveProperty::FarClipPlane, node), float_curve(&[0, 7]));
        clip.add_curve(CurveSlot::new(CurveProperty::NearClipPlane), float_curve(&[3]));

        let json = serde_json::to_string(&clip).unwrap();
        let back: AnimationClip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clip);
        assert_eq!(back.duration, TimeSpan(7));
    }
}
