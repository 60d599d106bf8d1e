//! Semantic humanoid bone identifiers.
//!
//! The set is fixed and stable across avatars (VRM humanoid vocabulary).
//! Not every avatar binds a node for every id; resolution happens through
//! [`super::SkeletonBinding`].

/// Body side, used for paired bones and hand solve results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A semantic humanoid bone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoneId {
    Hips,
    Spine,
    Chest,
    Neck,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    RightUpperLeg,
    RightLowerLeg,
    LeftThumbProximal,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbProximal,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
}

impl BoneId {
    /// Every bone id, body first, then left fingers, then right fingers.
    pub const ALL: [BoneId; 42] = [
        BoneId::Hips,
        BoneId::Spine,
        BoneId::Chest,
        BoneId::Neck,
        BoneId::LeftUpperArm,
        BoneId::LeftLowerArm,
        BoneId::LeftHand,
        BoneId::RightUpperArm,
        BoneId::RightLowerArm,
        BoneId::RightHand,
        BoneId::LeftUpperLeg,
        BoneId::LeftLowerLeg,
        BoneId::RightUpperLeg,
        BoneId::RightLowerLeg,
        BoneId::LeftThumbProximal,
        BoneId::LeftThumbDistal,
        BoneId::LeftIndexProximal,
        BoneId::LeftIndexIntermediate,
        BoneId::LeftIndexDistal,
        BoneId::LeftMiddleProximal,
        BoneId::LeftMiddleIntermediate,
        BoneId::LeftMiddleDistal,
        BoneId::LeftRingProximal,
        BoneId::LeftRingIntermediate,
        BoneId::LeftRingDistal,
        BoneId::LeftLittleProximal,
        BoneId::LeftLittleIntermediate,
        BoneId::LeftLittleDistal,
        BoneId::RightThumbProximal,
        BoneId::RightThumbDistal,
        BoneId::RightIndexProximal,
        BoneId::RightIndexIntermediate,
        BoneId::RightIndexDistal,
        BoneId::RightMiddleProximal,
        BoneId::RightMiddleIntermediate,
        BoneId::RightMiddleDistal,
        BoneId::RightRingProximal,
        BoneId::RightRingIntermediate,
        BoneId::RightRingDistal,
        BoneId::RightLittleProximal,
        BoneId::RightLittleIntermediate,
        BoneId::RightLittleDistal,
    ];

    /// VRM humanoid bone name, as found in avatar asset bone maps.
    pub fn name(self) -> &'static str {
        match self {
            BoneId::Hips => "hips",
            BoneId::Spine => "spine",
            BoneId::Chest => "chest",
            BoneId::Neck => "neck",
            BoneId::LeftUpperArm => "leftUpperArm",
            BoneId::LeftLowerArm => "leftLowerArm",
            BoneId::LeftHand => "leftHand",
            BoneId::RightUpperArm => "rightUpperArm",
            BoneId::RightLowerArm => "rightLowerArm",
            BoneId::RightHand => "rightHand",
            BoneId::LeftUpperLeg => "leftUpperLeg",
            BoneId::LeftLowerLeg => "leftLowerLeg",
            BoneId::RightUpperLeg => "rightUpperLeg",
            BoneId::RightLowerLeg => "rightLowerLeg",
            BoneId::LeftThumbProximal => "leftThumbProximal",
            BoneId::LeftThumbDistal => "leftThumbDistal",
            BoneId::LeftIndexProximal => "leftIndexProximal",
            BoneId::LeftIndexIntermediate => "leftIndexIntermediate",
            BoneId::LeftIndexDistal => "leftIndexDistal",
            BoneId::LeftMiddleProximal => "leftMiddleProximal",
            BoneId::LeftMiddleIntermediate => "leftMiddleIntermediate",
            BoneId::LeftMiddleDistal => "leftMiddleDistal",
            BoneId::LeftRingProximal => "leftRingProximal",
            BoneId::LeftRingIntermediate => "leftRingIntermediate",
            BoneId::LeftRingDistal => "leftRingDistal",
            BoneId::LeftLittleProximal => "leftLittleProximal",
            BoneId::LeftLittleIntermediate => "leftLittleIntermediate",
            BoneId::LeftLittleDistal => "leftLittleDistal",
            BoneId::RightThumbProximal => "rightThumbProximal",
            BoneId::RightThumbDistal => "rightThumbDistal",
            BoneId::RightIndexProximal => "rightIndexProximal",
            BoneId::RightIndexIntermediate => "rightIndexIntermediate",
            BoneId::RightIndexDistal => "rightIndexDistal",
            BoneId::RightMiddleProximal => "rightMiddleProximal",
            BoneId::RightMiddleIntermediate => "rightMiddleIntermediate",
            BoneId::RightMiddleDistal => "rightMiddleDistal",
            BoneId::RightRingProximal => "rightRingProximal",
            BoneId::RightRingIntermediate => "rightRingIntermediate",
            BoneId::RightRingDistal => "rightRingDistal",
            BoneId::RightLittleProximal => "rightLittleProximal",
            BoneId::RightLittleIntermediate => "rightLittleIntermediate",
            BoneId::RightLittleDistal => "rightLittleDistal",
        }
    }

    /// Which side of the body this bone belongs to; `None` for axial bones.
    pub fn side(self) -> Option<Side> {
        let name = self.name();
        if name.starts_with("left") {
            Some(Side::Left)
        } else if name.starts_with("right") {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The left/right counterpart of a paired bone; axial bones map to
    /// themselves.
    pub fn mirrored(self) -> BoneId {
        match self {
            BoneId::LeftUpperArm => BoneId::RightUpperArm,
            BoneId::LeftLowerArm => BoneId::RightLowerArm,
            BoneId::LeftHand => BoneId::RightHand,
            BoneId::RightUpperArm => BoneId::LeftUpperArm,
            BoneId::RightLowerArm => BoneId::LeftLowerArm,
            BoneId::RightHand => BoneId::LeftHand,
            BoneId::LeftUpperLeg => BoneId::RightUpperLeg,
            BoneId::LeftLowerLeg => BoneId::RightLowerLeg,
            BoneId::RightUpperLeg => BoneId::LeftUpperLeg,
            BoneId::RightLowerLeg => BoneId::LeftLowerLeg,
            BoneId::LeftThumbProximal => BoneId::RightThumbProximal,
            BoneId::LeftThumbDistal => BoneId::RightThumbDistal,
            BoneId::LeftIndexProximal => BoneId::RightIndexProximal,
            BoneId::LeftIndexIntermediate => BoneId::RightIndexIntermediate,
            BoneId::LeftIndexDistal => BoneId::RightIndexDistal,
            BoneId::LeftMiddleProximal => BoneId::RightMiddleProximal,
            BoneId::LeftMiddleIntermediate => BoneId::RightMiddleIntermediate,
            BoneId::LeftMiddleDistal => BoneId::RightMiddleDistal,
            BoneId::LeftRingProximal => BoneId::RightRingProximal,
            BoneId::LeftRingIntermediate => BoneId::RightRingIntermediate,
            BoneId::LeftRingDistal => BoneId::RightRingDistal,
            BoneId::LeftLittleProximal => BoneId::RightLittleProximal,
            BoneId::LeftLittleIntermediate => BoneId::RightLittleIntermediate,
            BoneId::LeftLittleDistal => BoneId::RightLittleDistal,
            BoneId::RightThumbProximal => BoneId::LeftThumbProximal,
            BoneId::RightThumbDistal => BoneId::LeftThumbDistal,
            BoneId::RightIndexProximal => BoneId::LeftIndexProximal,
            BoneId::RightIndexIntermediate => BoneId::LeftIndexIntermediate,
            BoneId::RightIndexDistal => BoneId::LeftIndexDistal,
            BoneId::RightMiddleProximal => BoneId::LeftMiddleProximal,
            BoneId::RightMiddleIntermediate => BoneId::LeftMiddleIntermediate,
            BoneId::RightMiddleDistal => BoneId::LeftMiddleDistal,
            BoneId::RightRingProximal => BoneId::LeftRingProximal,
            BoneId::RightRingIntermediate => BoneId::LeftRingIntermediate,
            BoneId::RightRingDistal => BoneId::LeftRingDistal,
            BoneId::RightLittleProximal => BoneId::LeftLittleProximal,
            BoneId::RightLittleIntermediate => BoneId::LeftLittleIntermediate,
            BoneId::RightLittleDistal => BoneId::LeftLittleDistal,
            axial => axial,
        }
    }
}

impl std::fmt::Display for BoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
