//! Live skeleton binding: bone nodes, expression channels, look-at target.
//!
//! One binding is live at a time, owned by the currently loaded avatar.
//! Replacing the avatar replaces the binding wholesale; old bindings become
//! unreachable, they are never mutated in place by a swap. Retargeting only
//! ever touches the local rotation/position of bound nodes and the
//! expression weights; hierarchy and scale are out of reach by construction.

use glam::{Quat, Vec2, Vec3};
use std::collections::HashMap;

use super::bones::BoneId;

/// A transformable node bound to one humanoid bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneNode {
    /// Local rotation (unit quaternion)
    pub local_rotation: Quat,
    /// Local position
    pub local_position: Vec3,
}

impl Default for BoneNode {
    fn default() -> Self {
        Self {
            local_rotation: Quat::IDENTITY,
            local_position: Vec3::ZERO,
        }
    }
}

/// Expression blend channels driven by the facial retargeter.
///
/// The blink channels double as the blink filter's history: the current
/// weight is read back each frame and blended against the new raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionChannel {
    BlinkLeft,
    BlinkRight,
    Aa,
    Ih,
    Ou,
    Ee,
    Oh,
}

impl ExpressionChannel {
    pub const ALL: [ExpressionChannel; 7] = [
        ExpressionChannel::BlinkLeft,
        ExpressionChannel::BlinkRight,
        ExpressionChannel::Aa,
        ExpressionChannel::Ih,
        ExpressionChannel::Ou,
        ExpressionChannel::Ee,
        ExpressionChannel::Oh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExpressionChannel::BlinkLeft => "blinkLeft",
            ExpressionChannel::BlinkRight => "blinkRight",
            ExpressionChannel::Aa => "aa",
            ExpressionChannel::Ih => "ih",
            ExpressionChannel::Ou => "ou",
            ExpressionChannel::Ee => "ee",
            ExpressionChannel::Oh => "oh",
        }
    }
}

/// Maps [`BoneId`] to the avatar's live nodes, plus the expression weights
/// and gaze target the facial retargeter drives.
#[derive(Debug, Clone, Default)]
pub struct SkeletonBinding {
    nodes: HashMap<BoneId, BoneNode>,
    expressions: HashMap<ExpressionChannel, f32>,
    /// Look-at target as a pitch (x) / yaw (y) Euler pair
    look_at: Vec2,
}

impl SkeletonBinding {
    /// Empty binding; nothing is rigged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding with the given bones rigged at identity.
    pub fn with_bones<I: IntoIterator<Item = BoneId>>(bones: I) -> Self {
        Self {
            nodes: bones
                .into_iter()
                .map(|bone| (bone, BoneNode::default()))
                .collect(),
            ..Self::default()
        }
    }

    /// Binding with every humanoid bone rigged at identity.
    pub fn complete() -> Self {
        Self::with_bones(BoneId::ALL)
    }

    pub fn is_bound(&self, bone: BoneId) -> bool {
        self.nodes.contains_key(&bone)
    }

    /// Resolve a bone to its node. Returns `None` for unrigged bones;
    /// callers treat that as "do nothing for this bone this frame".
    pub fn node(&self, bone: BoneId) -> Option<&BoneNode> {
        self.nodes.get(&bone)
    }

    pub fn node_mut(&mut self, bone: BoneId) -> Option<&mut BoneNode> {
        self.nodes.get_mut(&bone)
    }

    /// Current weight of an expression channel (0.0 if never written).
    pub fn expression(&self, channel: ExpressionChannel) -> f32 {
        self.expressions.get(&channel).copied().unwrap_or(0.0)
    }

    /// Write an expression weight, clamped to [0, 1].
    pub fn set_expression(&mut self, channel: ExpressionChannel, weight: f32) {
        self.expressions.insert(channel, weight.clamp(0.0, 1.0));
    }

    pub fn look_at(&self) -> Vec2 {
        self.look_at
    }

    pub fn set_look_at(&mut self, target: Vec2) {
        self.look_at = target;
    }
}
