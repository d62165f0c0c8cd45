use glam::{Affine2, Vec2};

/// Local transform state of a segment, relative to its parent's frame.
///
/// `scale` deliberately lives apart from the rotation/translation pair: descendants
/// inherit a segment's rotation and translation but never its scale, so the matrix
/// used for ancestry composition and the matrix used to draw the segment's own
/// payload differ by exactly the scale factor.
#[derive(Debug, Clone)]
pub struct SegmentOffset {
	pub translation: Vec2,
	/// Degrees.
	pub rotation: f32,
	/// Multiplicative stretch along the local long (y) axis.
	pub scale: f32,
}

impl Default for SegmentOffset {
	fn default() -> Self {
		Self {
			translation: Vec2::ZERO,
			rotation: 0.0,
			scale: 1.0,
		}
	}
}

impl SegmentOffset {
	pub fn translation_matrix(&self) -> Affine2 {
		Affine2::from_translation(self.translation)
	}

	pub fn rotation_matrix(&self) -> Affine2 {
		rotation_about_origin(self.rotation)
	}

	/// Non-uniform: the long axis stretches, the cross axis keeps its width.
	pub fn scale_matrix(&self) -> Affine2 {
		Affine2::from_scale(Vec2::new(1.0, self.scale))
	}
}

/// Rotation by `angle` degrees about the frame origin.
pub fn rotation_about_origin(angle: f32) -> Affine2 {
	Affine2::from_angle(angle.to_radians())
}

/// Stretch by `factor` along the local long axis rotated `axis` degrees from +y.
///
/// Rotate backward, scale the long axis, rotate forward: a limb's descendants slide
/// along the limb's own axis as it lengthens or shortens, not along the world axis.
pub fn stretch_along_axis(factor: f32, axis: f32) -> Affine2 {
	rotation_about_origin(axis) * Affine2::from_scale(Vec2::new(1.0, factor)) * rotation_about_origin(-axis)
}

/// Invert a transform composed of rotations, translations and bounded positive scale.
///
/// Such a matrix is never singular. Encountering one anyway means the scene's
/// transform state is corrupted, and mapping points through a garbage inverse would
/// silently mis-resolve every later hit-test, so this is a hard failure.
pub fn checked_inverse(transform: Affine2) -> Affine2 {
	let det = transform.matrix2.determinant();
	assert!(
		det.abs() > f32::EPSILON,
		"cannot invert singular transform (determinant {det})"
	);
	transform.inverse()
}
