use std::collections::HashMap;

use glam::{Affine2, Vec2};
use indextree::Arena;

use crate::math::transform::{checked_inverse, rotation_about_origin, stretch_along_axis};
use crate::node::{Segment, SegmentUuid};

pub const MIN_SCALE: f32 = 0.2;
pub const MAX_SCALE: f32 = 5.0;

/// The jointed segment tree. Nodes live in an arena and refer to each other by
/// id, so parent back-links cannot extend ownership into a reference cycle.
pub struct SegmentTree {
	root_id: indextree::NodeId,
	arena: Arena<Segment>,
	segment_ids: HashMap<SegmentUuid, indextree::NodeId>,
}

impl SegmentTree {
	pub fn new_with_root(segment: Segment) -> Self {
		let uuid = segment.uuid;
		let mut arena = Arena::new();
		let mut segment_ids = HashMap::new();

		let root_id = arena.new_node(segment);
		segment_ids.insert(uuid, root_id);

		Self {
			root_id,
			arena,
			segment_ids,
		}
	}

	/// Attach `segment` under `parent`, immediately initializing the child's anchor
	/// from the parent's composed anchor and rotation so the pivot cache invariant
	/// holds from the moment of attachment.
	pub fn add(&mut self, parent: SegmentUuid, id: SegmentUuid, segment: Segment) {
		let parent_id = *self.segment_ids.get(&parent).expect("parent should be added earlier");

		let (base_point, base_rotation) = {
			let parent = self.arena.get(parent_id).unwrap().get();
			(
				parent.anchor.point + parent.offset.translation,
				parent.anchor.rotation + parent.offset.rotation,
			)
		};

		let node_id = self.arena.new_node(segment);
		parent_id.append(node_id, &mut self.arena);

		if self.segment_ids.insert(id, node_id).is_some() {
			panic!("duplicate segment uuid");
		}

		self.shift_anchors(node_id, base_point, base_rotation);
	}

	pub fn root(&self) -> SegmentUuid {
		self.arena.get(self.root_id).unwrap().get().uuid
	}

	pub fn get_segment(&self, id: SegmentUuid) -> Option<&Segment> {
		Some(self.arena.get(*self.segment_ids.get(&id)?)?.get())
	}

	pub fn get_segment_mut(&mut self, id: SegmentUuid) -> Option<&mut Segment> {
		Some(self.arena.get_mut(*self.segment_ids.get(&id)?)?.get_mut())
	}

	/// Segments in tree order (parents before their children).
	pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
		self.root_id
			.descendants(&self.arena)
			.map(|node_id| self.arena.get(node_id).unwrap().get())
	}

	pub fn len(&self) -> usize {
		self.segment_ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segment_ids.is_empty()
	}

	/// Move the segment by `delta` in its parent's frame. Every descendant's anchor
	/// follows by the same delta before this returns.
	pub fn translate(&mut self, id: SegmentUuid, delta: Vec2) {
		let node_id = self.node_id(id);
		self.arena.get_mut(node_id).unwrap().get_mut().offset.translation += delta;

		if delta != Vec2::ZERO {
			for child in node_id.children(&self.arena).collect::<Vec<_>>() {
				self.shift_anchors(child, delta, 0.0);
			}
		}
	}

	/// Attempt to rotate the joint by `angle` degrees. The candidate angle is taken
	/// modulo 360 and accepted only inside the window `candidate <= max_rotation ||
	/// candidate >= 360 - max_rotation`; a candidate in the dead zone leaves the
	/// joint exactly where it was (rejection, not saturation) and returns `false`.
	///
	/// On acceptance every descendant's anchor rotation advances by `angle`, and the
	/// descendant's translation vector is re-rotated by `angle` about the origin: a
	/// rotating parent relocates the attachment point of its whole subtree, not just
	/// its orientation.
	pub fn rotate(&mut self, id: SegmentUuid, angle: f32) -> bool {
		let node_id = self.node_id(id);
		let segment = self.arena.get_mut(node_id).unwrap().get_mut();

		let candidate = (segment.offset.rotation + angle).rem_euclid(360.0);
		if candidate > segment.max_rotation && candidate < 360.0 - segment.max_rotation {
			return false;
		}
		segment.offset.rotation = candidate;

		let spin = rotation_about_origin(angle);
		for node_id in node_id.descendants(&self.arena).skip(1).collect::<Vec<_>>() {
			let descendant = self.arena.get_mut(node_id).unwrap().get_mut();
			descendant.anchor.rotation = (descendant.anchor.rotation + angle).rem_euclid(360.0);
			descendant.offset.translation = spin.transform_point2(descendant.offset.translation);
		}
		true
	}

	/// Attempt to scale the segment by the multiplicative `factor`. A no-op returning
	/// `false` unless the segment is scalable and the product stays inside
	/// `[MIN_SCALE, MAX_SCALE]`.
	///
	/// On acceptance every descendant receives a frame-relative stretch about this
	/// segment's cumulative axis, so children slide along the limb as it lengthens.
	/// Scalable descendants additionally compound the factor into their own scale,
	/// re-checked against the bounds and cascading deeper around their own axis.
	pub fn scale(&mut self, id: SegmentUuid, factor: f32) -> bool {
		let node_id = self.node_id(id);
		let segment = self.arena.get(node_id).unwrap().get();

		if !segment.scalable {
			return false;
		}
		let next = segment.offset.scale * factor;
		if !(MIN_SCALE..=MAX_SCALE).contains(&next) {
			return false;
		}
		let axis = segment.anchor.rotation + segment.offset.rotation;

		self.arena.get_mut(node_id).unwrap().get_mut().offset.scale = next;
		for child in node_id.children(&self.arena).collect::<Vec<_>>() {
			self.stretch(child, factor, axis);
		}
		true
	}

	fn stretch(&mut self, node_id: indextree::NodeId, factor: f32, axis: f32) {
		let map = stretch_along_axis(factor, axis);
		let segment = self.arena.get_mut(node_id).unwrap().get_mut();
		segment.offset.translation = map.transform_point2(segment.offset.translation);

		if segment.scalable {
			let uuid = segment.uuid;
			self.scale(uuid, factor);
		} else {
			for child in node_id.children(&self.arena).collect::<Vec<_>>() {
				self.stretch(child, factor, axis);
			}
		}
	}

	/// Composed ancestor chain for this segment, scale excluded.
	///
	/// Folding root-to-node as `T(n) * full(parent) * R(n)` keeps each segment's
	/// translation in its parent's frame while its rotation stays innermost, which
	/// is what the incremental anchor cascades assume.
	pub fn full_transform(&self, id: SegmentUuid) -> Affine2 {
		let node_id = self.node_id(id);
		let mut chain: Vec<_> = node_id.ancestors(&self.arena).collect();
		chain.reverse();

		let mut full = Affine2::IDENTITY;
		for node_id in chain {
			let offset = &self.arena.get(node_id).unwrap().get().offset;
			full = offset.translation_matrix() * full * offset.rotation_matrix();
		}
		full
	}

	/// The transform to draw this segment's own payload under: the full chain with
	/// the segment's own scale appended innermost. Descendants never see the scale.
	pub fn draw_transform(&self, id: SegmentUuid) -> Affine2 {
		let node_id = self.node_id(id);
		self.full_transform(id) * self.arena.get(node_id).unwrap().get().offset.scale_matrix()
	}

	/// Resolve a world-space point to the most specific segment under it.
	///
	/// Children are tested before their parent, in attachment order, and the first
	/// match wins: a child drawn over or inside a parent region is picked
	/// preferentially. `None` on a miss is not an error.
	pub fn hit_test(&self, point: Vec2) -> Option<SegmentUuid> {
		self.hit_test_node(self.root_id, point)
	}

	fn hit_test_node(&self, node_id: indextree::NodeId, point: Vec2) -> Option<SegmentUuid> {
		for child in node_id.children(&self.arena) {
			if let Some(hit) = self.hit_test_node(child, point) {
				return Some(hit);
			}
		}

		let segment = self.arena.get(node_id).unwrap().get();
		let local = checked_inverse(self.full_transform(segment.uuid)).transform_point2(point);
		segment.hit_polygon.contains(local).then_some(segment.uuid)
	}

	/// Advance the anchor cache of a whole subtree by a translation/rotation delta.
	fn shift_anchors(&mut self, node_id: indextree::NodeId, delta: Vec2, angle: f32) {
		for node_id in node_id.descendants(&self.arena).collect::<Vec<_>>() {
			let segment = self.arena.get_mut(node_id).unwrap().get_mut();
			segment.anchor.point += delta;
			segment.anchor.rotation = (segment.anchor.rotation + angle).rem_euclid(360.0);
		}
	}

	fn node_id(&self, id: SegmentUuid) -> indextree::NodeId {
		*self.segment_ids.get(&id).expect("segment uuid not in tree")
	}
}
