use glam::Vec2;
use tracing::{debug, trace};

use crate::figure::Figure;
use crate::node::{InteractionMode, SegmentKind, SegmentUuid};

/// Normalized single-pointer event. The platform layer owns raw multi-touch
/// bookkeeping and delivers one coherent down/move/up stream here.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
	Down(Vec2),
	Move(Vec2),
	Up,
	Cancel,
}

/// Normalized pinch gesture event, an independent channel from pointer events.
#[derive(Debug, Clone, Copy)]
pub enum PinchEvent {
	Begin { focus: Vec2 },
	/// Incremental scale factor since the previous step.
	Step { factor: f32 },
	End,
}

/// Consumes normalized input, resolves hits and drives segment state machines.
///
/// The controller exclusively owns the active segment reference for the duration
/// of a gesture; it is a field here, never global state, so the core stays
/// testable without a live view.
pub struct InteractionController {
	figure: Figure,
	viewport: Vec2,
	active: Option<SegmentUuid>,
	pinch_target: Option<SegmentUuid>,
	last_touch: Vec2,
}

impl InteractionController {
	/// Standard figure, root centered in a viewport of `size`.
	pub fn new(size: Vec2) -> Self {
		Self::with_figure(Figure::new(), size)
	}

	pub fn with_figure(mut figure: Figure, size: Vec2) -> Self {
		figure.recenter(size);
		Self {
			figure,
			viewport: size,
			active: None,
			pinch_target: None,
			last_touch: Vec2::ZERO,
		}
	}

	pub fn figure(&self) -> &Figure {
		&self.figure
	}

	/// Feed one pointer event. Returns whether the scene needs redrawing.
	pub fn on_pointer(&mut self, event: PointerEvent) -> bool {
		match event {
			PointerEvent::Down(point) => self.pointer_down(point),
			PointerEvent::Move(point) => self.pointer_move(point),
			PointerEvent::Up | PointerEvent::Cancel => self.release(),
		}
	}

	/// Feed one pinch event. Returns whether the scene needs redrawing.
	pub fn on_pinch(&mut self, event: PinchEvent) -> bool {
		match event {
			PinchEvent::Begin { focus } => {
				self.pinch_target = self
					.figure
					.hit_test(focus)
					.filter(|&id| self.figure.segment(id).unwrap().scalable);
				if let Some(id) = self.pinch_target {
					trace!(segment = %self.figure.segment(id).unwrap().name, "pinch begin");
				}
				false
			}
			PinchEvent::Step { factor } => match self.pinch_target {
				Some(id) => {
					self.figure.scale(id, factor);
					true
				}
				None => false,
			},
			PinchEvent::End => {
				self.pinch_target = None;
				false
			}
		}
	}

	/// Drop all transient interaction state, rebuild the figure from the reference
	/// layout and re-center it. Previously resolved segment ids are invalidated.
	pub fn reset(&mut self) {
		debug!("figure reset");
		self.active = None;
		self.pinch_target = None;
		self.figure = Figure::new();
		self.figure.recenter(self.viewport);
	}

	/// The viewport was resized: re-center the root, leave the pose alone.
	pub fn set_viewport(&mut self, size: Vec2) {
		self.viewport = size;
		self.figure.recenter(size);
	}

	fn pointer_down(&mut self, point: Vec2) -> bool {
		self.active = self.figure.hit_test(point);
		if let Some(id) = self.active {
			let segment = self.figure.segment_mut(id).unwrap();
			segment.mode = match segment.kind {
				SegmentKind::Draggable => InteractionMode::Dragging,
				SegmentKind::Rotatable => InteractionMode::Rotating,
			};
			self.last_touch = point;
			trace!(segment = %segment.name, mode = ?segment.mode, "pointer down");
		}
		false
	}

	fn pointer_move(&mut self, point: Vec2) -> bool {
		let Some(id) = self.active else {
			return false;
		};

		match self.figure.segment(id).unwrap().mode {
			InteractionMode::Dragging => {
				self.figure.translate(id, point - self.last_touch);
			}
			InteractionMode::Rotating => {
				// incremental angle between the two touch bearings around the pivot
				let pivot = self.figure.segment(id).unwrap().pivot();
				let mut angle = bearing(pivot, point) - bearing(pivot, self.last_touch);
				if angle < 0.0 {
					angle += 360.0;
				}
				self.figure.rotate(id, angle);
			}
			InteractionMode::Idle | InteractionMode::Scaling => {}
		}

		self.last_touch = point;
		true
	}

	fn release(&mut self) -> bool {
		if let Some(id) = self.active.take() {
			self.figure.segment_mut(id).unwrap().mode = InteractionMode::Idle;
			trace!("pointer released");
		}
		false
	}
}

/// Degrees from `pivot` to `point`, atan2 convention.
fn bearing(pivot: Vec2, point: Vec2) -> f32 {
	(point.y - pivot.y).atan2(point.x - pivot.x).to_degrees()
}

#[cfg(test)]
mod tests {
	use glam::Vec2;

	use crate::math::transform::rotation_about_origin;
	use crate::node::InteractionMode;

	use super::{InteractionController, PinchEvent, PointerEvent};

	const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);

	/// World-space points resolved against the standard figure centered at (400, 400):
	/// a spot on the torso no limb covers, a spot on the head, and a spot on the
	/// right upper leg clear of the lower leg and foot.
	const ON_TORSO: Vec2 = Vec2::new(385.0, 380.0);
	const ON_HEAD: Vec2 = Vec2::new(400.0, 187.0);
	const ON_RIGHT_UPPER_LEG: Vec2 = Vec2::new(541.6, 436.8);

	fn controller() -> InteractionController {
		InteractionController::new(VIEWPORT)
	}

	#[test]
	fn fixture_points_resolve_to_the_expected_segments() {
		let controller = controller();
		let figure = controller.figure();

		let name = |p| figure.segment(figure.hit_test(p).unwrap()).unwrap().name.clone();
		assert_eq!(name(ON_TORSO), "torso");
		assert_eq!(name(ON_HEAD), "head");
		assert_eq!(name(ON_RIGHT_UPPER_LEG), "right_upper_leg");
	}

	#[test]
	fn dragging_the_torso_carries_the_whole_figure() {
		let mut controller = controller();

		assert!(!controller.on_pointer(PointerEvent::Down(ON_TORSO)));
		assert!(controller.on_pointer(PointerEvent::Move(ON_TORSO + Vec2::new(10.0, -10.0))));

		let figure = controller.figure();
		let torso = figure.segment_named("torso").unwrap();
		assert!(torso.offset.translation.abs_diff_eq(Vec2::new(410.0, 390.0), 1e-4));
		assert_eq!(torso.mode, InteractionMode::Dragging);

		// anchors of every limb follow; their own offsets stay untouched
		let head = figure.segment_named("head").unwrap();
		assert!(head.anchor.point.abs_diff_eq(Vec2::new(410.0, 390.0), 1e-4));
		assert!(head.offset.translation.abs_diff_eq(Vec2::new(0.0, -123.0), 1e-4));

		controller.on_pointer(PointerEvent::Up);
		assert_eq!(
			controller.figure().segment_named("torso").unwrap().mode,
			InteractionMode::Idle
		);
	}

	#[test]
	fn head_gesture_touches_only_the_head() {
		let mut controller = controller();

		controller.on_pointer(PointerEvent::Down(ON_HEAD));
		assert!(controller.on_pointer(PointerEvent::Move(ON_HEAD + Vec2::new(10.0, 0.0))));

		let figure = controller.figure();
		let head = figure.segment_named("head").unwrap();
		assert!(head.offset.rotation > 0.0);
		assert!(head.offset.rotation < 50.0);

		// siblings outside the head's subtree never moved
		for name in ["left_upper_arm", "right_upper_arm", "left_upper_leg", "right_upper_leg"] {
			let sibling = figure.segment_named(name).unwrap();
			assert_eq!(sibling.offset.rotation, 0.0);
			assert!(sibling.anchor.point.abs_diff_eq(Vec2::new(400.0, 400.0), 1e-4));
		}
		let torso = figure.segment_named("torso").unwrap();
		assert!(torso.offset.translation.abs_diff_eq(Vec2::new(400.0, 400.0), 1e-4));
	}

	#[test]
	fn rotation_caps_at_the_joint_limit() {
		let mut controller = controller();
		let pivot = controller
			.figure()
			.segment_named("right_upper_leg")
			.unwrap()
			.pivot();

		let swing = |degrees: f32| pivot + rotation_about_origin(degrees).transform_point2(ON_RIGHT_UPPER_LEG - pivot);

		controller.on_pointer(PointerEvent::Down(ON_RIGHT_UPPER_LEG));
		controller.on_pointer(PointerEvent::Move(swing(60.0)));
		let rotation = controller.figure().segment_named("right_upper_leg").unwrap().offset.rotation;
		assert!((rotation - 60.0).abs() < 0.01);

		// another 60 degrees would land at 120, outside the 90 degree window
		controller.on_pointer(PointerEvent::Move(swing(120.0)));
		let rotation = controller.figure().segment_named("right_upper_leg").unwrap().offset.rotation;
		assert!((rotation - 60.0).abs() < 0.01);

		// identical further input produces no further change
		controller.on_pointer(PointerEvent::Move(swing(120.0)));
		let rotation = controller.figure().segment_named("right_upper_leg").unwrap().offset.rotation;
		assert!((rotation - 60.0).abs() < 0.01);
	}

	#[test]
	fn miss_leaves_everything_idle() {
		let mut controller = controller();

		assert!(!controller.on_pointer(PointerEvent::Down(Vec2::new(5.0, 5.0))));
		assert!(!controller.on_pointer(PointerEvent::Move(Vec2::new(50.0, 50.0))));

		let torso = controller.figure().segment_named("torso").unwrap();
		assert_eq!(torso.mode, InteractionMode::Idle);
		assert!(torso.offset.translation.abs_diff_eq(Vec2::new(400.0, 400.0), 1e-4));
	}

	#[test]
	fn cancel_drops_the_active_segment() {
		let mut controller = controller();

		controller.on_pointer(PointerEvent::Down(ON_TORSO));
		controller.on_pointer(PointerEvent::Cancel);

		// moves after a cancel apply no further deltas
		assert!(!controller.on_pointer(PointerEvent::Move(ON_TORSO + Vec2::new(100.0, 0.0))));
		let torso = controller.figure().segment_named("torso").unwrap();
		assert!(torso.offset.translation.abs_diff_eq(Vec2::new(400.0, 400.0), 1e-4));
		assert_eq!(torso.mode, InteractionMode::Idle);
	}

	#[test]
	fn pinch_scales_the_scalable_hit() {
		let mut controller = controller();

		controller.on_pinch(PinchEvent::Begin {
			focus: ON_RIGHT_UPPER_LEG,
		});
		assert!(controller.on_pinch(PinchEvent::Step { factor: 2.0 }));
		assert!(controller.on_pinch(PinchEvent::Step { factor: 2.0 }));

		let scale = controller.figure().segment_named("right_upper_leg").unwrap().offset.scale;
		assert!((scale - 4.0).abs() < 1e-5);

		// crossing the upper bound is refused, the reached value stays
		controller.on_pinch(PinchEvent::Step { factor: 2.0 });
		let scale = controller.figure().segment_named("right_upper_leg").unwrap().offset.scale;
		assert!((scale - 4.0).abs() < 1e-5);

		// pinch never touches the primary interaction mode
		assert_eq!(
			controller.figure().segment_named("right_upper_leg").unwrap().mode,
			InteractionMode::Idle
		);

		controller.on_pinch(PinchEvent::End);
		assert!(!controller.on_pinch(PinchEvent::Step { factor: 1.1 }));
		let scale = controller.figure().segment_named("right_upper_leg").unwrap().offset.scale;
		assert!((scale - 4.0).abs() < 1e-5);
	}

	#[test]
	fn pinch_requires_the_hit_itself_to_be_scalable() {
		let mut controller = controller();

		// the head is not scalable
		controller.on_pinch(PinchEvent::Begin { focus: ON_HEAD });
		assert!(!controller.on_pinch(PinchEvent::Step { factor: 1.5 }));
		assert_eq!(controller.figure().segment_named("head").unwrap().offset.scale, 1.0);

		// a spot on the right lower leg: its parent is scalable, it is not,
		// and the parent does not inherit the gesture
		let lower = controller.figure().segment_named("right_lower_leg").unwrap();
		let focus = lower.pivot();
		controller.on_pinch(PinchEvent::Begin { focus });
		assert!(!controller.on_pinch(PinchEvent::Step { factor: 1.5 }));
		assert_eq!(
			controller.figure().segment_named("right_upper_leg").unwrap().offset.scale,
			1.0
		);
	}

	#[test]
	fn reset_restores_the_construction_pose() {
		let mut controller = controller();

		controller.on_pointer(PointerEvent::Down(ON_HEAD));
		controller.on_pointer(PointerEvent::Move(ON_HEAD + Vec2::new(10.0, 0.0)));
		controller.on_pointer(PointerEvent::Up);
		assert!(controller.figure().segment_named("head").unwrap().offset.rotation > 0.0);

		controller.on_pointer(PointerEvent::Down(ON_TORSO));
		controller.on_pointer(PointerEvent::Move(ON_TORSO + Vec2::new(30.0, 40.0)));
		controller.on_pointer(PointerEvent::Up);
		controller.on_pinch(PinchEvent::Begin {
			focus: ON_RIGHT_UPPER_LEG + Vec2::new(30.0, 40.0),
		});
		controller.on_pinch(PinchEvent::Step { factor: 1.5 });
		assert!(
			(controller.figure().segment_named("right_upper_leg").unwrap().offset.scale - 1.5).abs() < 1e-5
		);

		controller.reset();

		let figure = controller.figure();
		let torso = figure.segment_named("torso").unwrap();
		assert!(torso.offset.translation.abs_diff_eq(Vec2::new(400.0, 400.0), 1e-4));
		for segment in figure.iter() {
			if segment.name != "torso" {
				assert_eq!(segment.offset.rotation, 0.0, "{} rotated after reset", segment.name);
			}
			assert_eq!(segment.offset.scale, 1.0, "{} scaled after reset", segment.name);
			assert_eq!(segment.mode, InteractionMode::Idle);
		}

		// the old gesture references died with the old tree
		assert!(!controller.on_pointer(PointerEvent::Move(ON_TORSO)));
		assert!(!controller.on_pinch(PinchEvent::Step { factor: 1.5 }));
	}

	#[test]
	fn viewport_resize_recenters_without_touching_the_pose() {
		let mut controller = controller();

		controller.on_pointer(PointerEvent::Down(ON_HEAD));
		controller.on_pointer(PointerEvent::Move(ON_HEAD + Vec2::new(10.0, 0.0)));
		let rotation = controller.figure().segment_named("head").unwrap().offset.rotation;

		controller.set_viewport(Vec2::new(1000.0, 600.0));

		let figure = controller.figure();
		let torso = figure.segment_named("torso").unwrap();
		assert!(torso.offset.translation.abs_diff_eq(Vec2::new(500.0, 300.0), 1e-4));
		let head = figure.segment_named("head").unwrap();
		assert_eq!(head.offset.rotation, rotation);
		assert!(head.anchor.point.abs_diff_eq(Vec2::new(500.0, 300.0), 1e-4));
	}
}
