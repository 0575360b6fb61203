//! Turning the first animation stack of a scene into clips.

use awsm_animation_core::{AnimationClip, CurveInterpolation, LayerKey, NodeKey};
use glam::Vec3;
use indexmap::{map::Entry, IndexMap, IndexSet};

use crate::{
    assemble::NodeCurves,
    config::ConversionConfig,
    discovery::{self, discover},
    error::{AnimationImportError, Result},
    mapping::{CoordinateAdjust, SceneMapping},
    node_table::NodeTable,
    pivot::PivotBake,
    resample::Resampler,
    scene::{ChannelProperty, SceneSource},
    transform::{
        convert_scale, convert_translation, degrees_to_radians, focal_length_to_fov,
        rotation_to_quat,
    },
};

pub struct AnimationConverterBuilder<S> {
    scene: S,
    mapping: Option<Box<dyn SceneMapping>>,
    config: ConversionConfig,
}

impl<S: SceneSource> AnimationConverterBuilder<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            mapping: None,
            config: ConversionConfig::default(),
        }
    }

    pub fn with_scene_mapping(mut self, mapping: impl SceneMapping + 'static) -> Self {
        self.mapping = Some(Box::new(mapping));
        self
    }

    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<AnimationConverter<S>> {
        let mapping = self
            .mapping
            .ok_or(AnimationImportError::MissingSceneMapping)?;

        Ok(AnimationConverter {
            scene: self.scene,
            mapping,
            config: self.config,
        })
    }
}

pub struct AnimationConverter<S> {
    scene: S,
    mapping: Box<dyn SceneMapping>,
    config: ConversionConfig,
}

impl<S: SceneSource> AnimationConverter<S> {
    pub fn builder(scene: S) -> AnimationConverterBuilder<S> {
        AnimationConverterBuilder::new(scene)
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn into_scene(self) -> S {
        self.scene
    }

    pub fn mapping(&self) -> &dyn SceneMapping {
        self.mapping.as_ref()
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Every stack has some node with a complete transform triple or an
    /// animated camera lens on its first layer.
    ///
    /// Informational only, conversion does not depend on it.
    pub fn has_animation_data(&self) -> Result<bool> {
        let stacks = self.scene.animation_stacks();
        if stacks.is_empty() {
            return Ok(false);
        }

        let nodes = NodeTable::flatten(&self.scene)?;
        Ok(stacks.iter().all(|stack| match stack.first_layer() {
            Some(layer) => nodes
                .keys()
                .any(|node| discovery::has_animation_data(&self.scene, node, layer)),
            None => false,
        }))
    }

    /// Any transform axis of `node` is animated in the stack that gets converted.
    pub fn node_has_animation(&self, node: NodeKey) -> bool {
        self.scene
            .animation_stacks()
            .first()
            .and_then(|stack| stack.first_layer())
            .is_some_and(|layer| discovery::has_animation(&self.scene, node, layer))
    }

    /// Names of the animated nodes over the first layer of every stack, in
    /// traversal order. `None` when the scene has no stacks.
    pub fn extract_animation_nodes(&self) -> Result<Option<Vec<String>>> {
        let stacks = self.scene.animation_stacks();
        if stacks.is_empty() {
            return Ok(None);
        }

        let nodes = NodeTable::flatten(&self.scene)?;
        let mut names = IndexSet::new();
        for layer in stacks.iter().filter_map(|stack| stack.first_layer()) {
            for node in nodes.keys() {
                if discovery::is_animated(&self.scene, node, layer, self.config.incomplete_channels)
                {
                    names.insert(self.mapping.node_name(node));
                }
            }
        }

        Ok(Some(names.into_iter().collect()))
    }

    /// All animated nodes of the first stack in one clip, `None` if nothing is animated.
    pub fn process_animation(&mut self) -> Result<Option<AnimationClip>> {
        let mut clip = AnimationClip::new();
        for (node, curves) in self.convert_first_stack()? {
            curves.add_to_clip(&mut clip, Some(node));
        }

        Ok(clip.into_non_empty())
    }

    /// One clip per animated node of the first stack, keyed by node name.
    pub fn process_animation_by_node(&mut self) -> Result<IndexMap<String, AnimationClip>> {
        let mut clips = IndexMap::new();
        for (node, curves) in self.convert_first_stack()? {
            let mut clip = AnimationClip::new();
            curves.add_to_clip(&mut clip, None);
            let Some(clip) = clip.into_non_empty() else {
                continue;
            };

            match clips.entry(self.mapping.node_name(node)) {
                Entry::Occupied(entry) => {
                    tracing::warn!("duplicate node name {}, keeping the first clip", entry.key());
                }
                Entry::Vacant(entry) => {
                    entry.insert(clip);
                }
            }
        }

        Ok(clips)
    }

    fn convert_first_stack(&mut self) -> Result<Vec<(NodeKey, NodeCurves)>> {
        let stacks = self.scene.animation_stacks();
        let Some(stack) = stacks.first() else {
            tracing::info!("no animation stacks");
            return Ok(Vec::new());
        };
        if stacks.len() > 1 {
            tracing::warn!(
                "{} animation stacks found, only \"{}\" is converted",
                stacks.len(),
                stack.name
            );
        }
        let stack_name = stack.name.clone();
        let Some(layer) = stack.first_layer() else {
            tracing::warn!("animation stack \"{stack_name}\" has no layers");
            return Ok(Vec::new());
        };

        let _span =
            tracing::span!(tracing::Level::INFO, "Animation stack", name = %stack_name).entered();
        if let Some(application) = self.scene.application_name() {
            tracing::debug!("authored with {application}");
        }

        let nodes = NodeTable::flatten(&self.scene)?;
        let bake = PivotBake::begin(
            &mut self.scene,
            &nodes,
            0,
            self.config.pivot_bake_frame_rate,
        );
        let resampler = Resampler::new(bake.time_mode(), self.config.incomplete_channels);

        let mut converted = Vec::new();
        for node in nodes.keys() {
            let name = self.mapping.node_name(node);
            let _span = tracing::span!(tracing::Level::DEBUG, "Node", name = %name).entered();

            let curves = convert_node(
                &*bake,
                self.mapping.as_ref(),
                &self.config,
                &resampler,
                layer,
                node,
            )?;
            if !curves.is_empty() {
                converted.push((node, curves));
            }
        }
        drop(bake);

        tracing::info!("{} of {} nodes animated", converted.len(), nodes.len());
        Ok(converted)
    }
}

fn convert_node<S: SceneSource + ?Sized>(
    scene: &S,
    mapping: &dyn SceneMapping,
    config: &ConversionConfig,
    resampler: &Resampler,
    layer: LayerKey,
    node: NodeKey,
) -> Result<NodeCurves> {
    let adjust = CoordinateAdjust::from_matrix(mapping.coordinate_adjust(node));
    let mut curves = NodeCurves::default();

    if let Some(mut translation) =
        resampler.resample::<Vec3>(&discover(scene, node, layer, ChannelProperty::Translation))?
    {
        convert_translation(&mut translation, &adjust);
        curves.translation = Some(translation.with_interpolation(CurveInterpolation::Cubic));
    }

    if let Some(mut rotation) =
        resampler.resample::<Vec3>(&discover(scene, node, layer, ChannelProperty::Rotation))?
    {
        degrees_to_radians(&mut rotation);
        curves.rotation = Some(rotation_to_quat(rotation, &adjust));
    }

    if let Some(mut scale) =
        resampler.resample::<Vec3>(&discover(scene, node, layer, ChannelProperty::Scaling))?
    {
        convert_scale(&mut scale, &adjust, config.scale_conversion);
        curves.scale = Some(scale.with_interpolation(CurveInterpolation::Cubic));
    }

    let attribute = scene.attribute(node);
    if let Some(camera) = attribute.camera() {
        let float_track = |property| {
            resampler
                .resample::<f32>(&discover(scene, node, layer, property))
                .map(|curve| curve.map(|curve| curve.with_interpolation(CurveInterpolation::Cubic)))
        };

        if let Some(mut fov) = float_track(ChannelProperty::FieldOfView)? {
            degrees_to_radians(&mut fov);
            curves.field_of_view = Some(fov);
        }

        if let Some(mut fov) = float_track(ChannelProperty::FocalLength)? {
            if curves.field_of_view.is_some() {
                tracing::warn!("field of view and focal length are both animated, using focal length");
            }
            focal_length_to_fov(&mut fov, camera.film_height, config.focal_length_fov_unit);
            curves.focal_length_fov = Some(fov);
        }

        curves.near_plane = float_track(ChannelProperty::NearPlane)?;
        curves.far_plane = float_track(ChannelProperty::FarPlane)?;
    }

    if !curves.is_empty() {
        tracing::debug!("converted animation");
    }
    Ok(curves)
}
