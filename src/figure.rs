pub mod layout;
mod tree;

use std::collections::HashMap;

use glam::{Affine2, Vec2};
use tracing::debug;

use crate::math::polygon::Polygon;
use crate::math::transform::SegmentOffset;
use crate::node::{Anchor, InteractionMode, RenderPayload, Segment, SegmentKind, SegmentUuid};

use layout::JointDef;
pub use tree::{SegmentTree, MAX_SCALE, MIN_SCALE};

#[derive(Debug, thiserror::Error)]
pub enum FigureBuildError {
	#[error("figure layout is empty")]
	EmptyLayout,
	#[error("first layout row {0:?} must be the root and name no parent")]
	RootHasParent(String),
	#[error("layout row {0:?} is a second root; only the first row may omit a parent")]
	SecondRoot(String),
	#[error("segment {child:?} references unknown parent {parent:?}")]
	UnknownParent { child: String, parent: String },
	#[error("duplicate segment name {0:?}")]
	DuplicateName(String),
	#[error("segment {0:?} outline has fewer than 3 vertices")]
	DegenerateOutline(String),
}

/// The articulated figure: a facade over the segment tree that owns scene
/// construction and the viewport-relative placement of the root.
pub struct Figure {
	tree: SegmentTree,
}

impl Figure {
	/// Build the standard reference figure.
	pub fn new() -> Self {
		Self::from_layout(layout::REFERENCE_FIGURE).expect("reference figure layout is valid")
	}

	/// Build a figure from a joint table. All-or-nothing: on any malformed row the
	/// error is returned before a tree is ever exposed.
	pub fn from_layout(defs: &[JointDef]) -> Result<Self, FigureBuildError> {
		if defs.is_empty() {
			return Err(FigureBuildError::EmptyLayout);
		}

		let mut uuids: HashMap<&str, SegmentUuid> = HashMap::new();
		let mut tree: Option<SegmentTree> = None;

		for (index, def) in defs.iter().enumerate() {
			if uuids.contains_key(def.name) {
				return Err(FigureBuildError::DuplicateName(def.name.to_owned()));
			}
			if let Some(outline) = def.outline {
				if outline.len() < 3 {
					return Err(FigureBuildError::DegenerateOutline(def.name.to_owned()));
				}
			}

			let uuid = SegmentUuid(index as u32);
			match (def.parent, &mut tree) {
				(None, None) => {
					let segment = build_segment(uuid, def, true);
					tree = Some(SegmentTree::new_with_root(segment));
				}
				(None, Some(_)) => return Err(FigureBuildError::SecondRoot(def.name.to_owned())),
				(Some(_), None) => return Err(FigureBuildError::RootHasParent(defs[0].name.to_owned())),
				(Some(parent), Some(tree)) => {
					let parent_uuid = *uuids.get(parent).ok_or_else(|| FigureBuildError::UnknownParent {
						child: def.name.to_owned(),
						parent: parent.to_owned(),
					})?;
					let segment = build_segment(uuid, def, false);
					tree.add(parent_uuid, uuid, segment);
				}
			}
			uuids.insert(def.name, uuid);
		}

		let tree = tree.expect("first row built the root");
		debug!(segments = tree.len(), "figure built");
		Ok(Self { tree })
	}

	pub fn tree(&self) -> &SegmentTree {
		&self.tree
	}

	pub fn root(&self) -> SegmentUuid {
		self.tree.root()
	}

	pub fn segment(&self, id: SegmentUuid) -> Option<&Segment> {
		self.tree.get_segment(id)
	}

	pub fn segment_mut(&mut self, id: SegmentUuid) -> Option<&mut Segment> {
		self.tree.get_segment_mut(id)
	}

	pub fn segment_named(&self, name: &str) -> Option<&Segment> {
		self.tree.iter().find(|segment| segment.name == name)
	}

	/// Segments in draw order: parents before the children drawn over them.
	pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
		self.tree.iter()
	}

	pub fn hit_test(&self, point: Vec2) -> Option<SegmentUuid> {
		self.tree.hit_test(point)
	}

	pub fn translate(&mut self, id: SegmentUuid, delta: Vec2) {
		self.tree.translate(id, delta)
	}

	pub fn rotate(&mut self, id: SegmentUuid, angle: f32) -> bool {
		self.tree.rotate(id, angle)
	}

	pub fn scale(&mut self, id: SegmentUuid, factor: f32) -> bool {
		self.tree.scale(id, factor)
	}

	pub fn full_transform(&self, id: SegmentUuid) -> Affine2 {
		self.tree.full_transform(id)
	}

	pub fn draw_transform(&self, id: SegmentUuid) -> Affine2 {
		self.tree.draw_transform(id)
	}

	/// Place the root at the center of a viewport of `size`. Anchors of the whole
	/// tree follow, as for any translation.
	pub fn recenter(&mut self, size: Vec2) {
		let root = self.root();
		let delta = size / 2.0 - self.tree.get_segment(root).unwrap().offset.translation;
		self.tree.translate(root, delta);
	}
}

impl Default for Figure {
	fn default() -> Self {
		Self::new()
	}
}

fn build_segment(uuid: SegmentUuid, def: &JointDef, is_root: bool) -> Segment {
	let pivot_offset = def.size * def.pivot;
	let half = def.size / 2.0;

	let hit_polygon = match def.outline {
		Some(outline) => Polygon::new(outline.to_vec()),
		None => Polygon::rect(def.size, pivot_offset),
	};

	// The root is placed by the viewport, not by a parent attachment.
	let translation = if is_root { def.attach } else { def.attach - pivot_offset };

	Segment {
		uuid,
		name: def.name.to_owned(),
		kind: if is_root {
			SegmentKind::Draggable
		} else {
			SegmentKind::Rotatable
		},
		offset: SegmentOffset {
			translation,
			..SegmentOffset::default()
		},
		anchor: Anchor::default(),
		max_rotation: def.max_rotation,
		scalable: def.scalable,
		hit_polygon,
		payload: RenderPayload {
			sprite: def.sprite.to_owned(),
			bounds: (pivot_offset - half, pivot_offset + half),
		},
		mode: InteractionMode::Idle,
	}
}
