use glam::Vec2;

use crate::math::polygon::Polygon;
use crate::math::transform::SegmentOffset;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[repr(transparent)]
pub struct SegmentUuid(pub(crate) u32);

/// What a pointer-down on the segment starts. Fixed at construction: the root
/// torso drags the whole figure, every other segment rotates about its joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
	Draggable,
	Rotatable,
}

/// Transient interaction state of one segment.
///
/// Pinch-scaling runs on its own gesture channel and never enters `Scaling`
/// through the reference interaction flow; the variant is part of the mode set
/// all the same.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
	#[default]
	Idle,
	Dragging,
	Rotating,
	Scaling,
}

/// Cached composed-ancestor state, the pivot base for rotation gestures.
///
/// Between mutations, `point` equals the sum of every ancestor's translation and
/// `rotation` the sum of every ancestor's rotation. Nothing recomputes this from
/// the full chain; every ancestor mutation cascades the delta down before
/// returning, so the cache is never observable out of sync.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anchor {
	pub point: Vec2,
	/// Degrees.
	pub rotation: f32,
}

/// Opaque hand-off to the renderer: which sprite to paint and where its
/// local-space bounds sit. Computed once at build time, never read back.
#[derive(Debug, Clone)]
pub struct RenderPayload {
	pub sprite: String,
	/// Top-left and bottom-right corners in segment-local space.
	pub bounds: (Vec2, Vec2),
}

pub struct Segment {
	pub uuid: SegmentUuid,
	pub name: String,
	pub kind: SegmentKind,
	pub offset: SegmentOffset,
	pub anchor: Anchor,
	/// Degrees. The joint may not leave `[0, max]` or `[360 - max, 360)`.
	pub max_rotation: f32,
	pub scalable: bool,
	pub hit_polygon: Polygon,
	pub payload: RenderPayload,
	pub mode: InteractionMode,
}

impl Segment {
	/// World position of the joint pivot that rotation gestures steer around.
	pub fn pivot(&self) -> Vec2 {
		self.anchor.point + self.offset.translation
	}
}
