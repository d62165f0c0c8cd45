use glam::Vec2;

/// One row of a figure description.
///
/// The pivot fraction places the rotation axis inside the segment's bounds: the
/// local frame origin is the pivot, so the sprite bounds and the default hit
/// outline are shifted by `size * pivot` and the attachment translation
/// compensates by the same amount.
#[derive(Debug, Clone)]
pub struct JointDef {
	pub name: &'static str,
	/// Visual payload identifier, opaque to the core.
	pub sprite: &'static str,
	/// `None` marks the root.
	pub parent: Option<&'static str>,
	/// Intrinsic sprite size; sizes both the render bounds and the default hit outline.
	pub size: Vec2,
	/// Attachment offset from the parent's frame.
	pub attach: Vec2,
	/// Rotation pivot as a fraction of the bounds, relative to their center.
	pub pivot: Vec2,
	/// Degrees.
	pub max_rotation: f32,
	pub scalable: bool,
	/// Hand-authored hit outline overriding the default rectangle.
	pub outline: Option<&'static [Vec2]>,
}

const TORSO_OUTLINE: [Vec2; 6] = [
	Vec2::new(-83.0, -57.0),
	Vec2::new(-40.0, 80.0),
	Vec2::new(-83.0, 191.0),
	Vec2::new(62.0, 191.0),
	Vec2::new(40.0, 80.0),
	Vec2::new(62.0, -57.0),
];

const HEAD_OUTLINE: [Vec2; 12] = [
	Vec2::new(0.0, -150.0),
	Vec2::new(30.0, -100.0),
	Vec2::new(125.0, -100.0),
	Vec2::new(75.0, -25.0),
	Vec2::new(100.0, 25.0),
	Vec2::new(75.0, 25.0),
	Vec2::new(0.0, 100.0),
	Vec2::new(-75.0, 25.0),
	Vec2::new(-100.0, 25.0),
	Vec2::new(-75.0, -25.0),
	Vec2::new(-125.0, -100.0),
	Vec2::new(-30.0, -100.0),
];

/// The reference figure: a draggable torso root plus 13 rotatable joints.
/// Rows are ordered parent-first; exactly the upper legs are scalable.
pub const REFERENCE_FIGURE: &[JointDef] = &[
	JointDef {
		name: "torso",
		sprite: "torso",
		parent: None,
		size: Vec2::new(499.0, 574.0),
		attach: Vec2::ZERO,
		pivot: Vec2::new(-0.04, 0.0),
		max_rotation: 180.0,
		scalable: false,
		outline: Some(&TORSO_OUTLINE),
	},
	JointDef {
		name: "left_upper_leg",
		sprite: "left_upper_leg",
		parent: Some("torso"),
		size: Vec2::new(228.0, 312.0),
		attach: Vec2::new(-115.0, 150.0),
		pivot: Vec2::new(-0.3, -0.15),
		max_rotation: 90.0,
		scalable: true,
		outline: None,
	},
	JointDef {
		name: "left_lower_leg",
		sprite: "left_lower_leg",
		parent: Some("left_upper_leg"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(-45.0, 72.0),
		pivot: Vec2::new(0.0, 0.4),
		max_rotation: 90.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "left_foot",
		sprite: "left_foot",
		parent: Some("left_lower_leg"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(-67.0, 155.0),
		pivot: Vec2::new(-0.3, 0.5),
		max_rotation: 35.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "right_upper_leg",
		sprite: "right_upper_leg",
		parent: Some("torso"),
		size: Vec2::new(228.0, 312.0),
		attach: Vec2::new(110.0, 140.0),
		pivot: Vec2::new(0.3, -0.15),
		max_rotation: 90.0,
		scalable: true,
		outline: None,
	},
	JointDef {
		name: "right_lower_leg",
		sprite: "right_lower_leg",
		parent: Some("right_upper_leg"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(28.0, 65.0),
		pivot: Vec2::new(0.0, 0.4),
		max_rotation: 90.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "right_foot",
		sprite: "right_foot",
		parent: Some("right_lower_leg"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(49.0, 135.0),
		pivot: Vec2::new(0.3, 0.5),
		max_rotation: 35.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "left_upper_arm",
		sprite: "left_upper_arm",
		parent: Some("torso"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(-125.0, -45.0),
		pivot: Vec2::new(-0.4, 0.0),
		max_rotation: 180.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "left_lower_arm",
		sprite: "left_lower_arm",
		parent: Some("left_upper_arm"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(-83.0, 80.0),
		pivot: Vec2::new(-0.4, 0.5),
		max_rotation: 135.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "left_hand",
		sprite: "left_hand",
		parent: Some("left_lower_arm"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(-210.0, 260.0),
		pivot: Vec2::new(-0.45, 0.45),
		max_rotation: 35.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "right_upper_arm",
		sprite: "right_upper_arm",
		parent: Some("torso"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(125.0, -45.0),
		pivot: Vec2::new(0.4, 0.0),
		max_rotation: 180.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "right_lower_arm",
		sprite: "right_lower_arm",
		parent: Some("right_upper_arm"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(70.0, 80.0),
		pivot: Vec2::new(0.4, 0.5),
		max_rotation: 135.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "right_hand",
		sprite: "right_hand",
		parent: Some("right_lower_arm"),
		size: Vec2::new(200.0, 200.0),
		attach: Vec2::new(175.0, 280.0),
		pivot: Vec2::new(0.45, 0.45),
		max_rotation: 35.0,
		scalable: false,
		outline: None,
	},
	JointDef {
		name: "head",
		sprite: "head",
		parent: Some("torso"),
		size: Vec2::new(250.0, 250.0),
		attach: Vec2::new(0.0, -173.0),
		pivot: Vec2::new(0.0, -0.2),
		max_rotation: 50.0,
		scalable: false,
		outline: Some(&HEAD_OUTLINE),
	},
];
