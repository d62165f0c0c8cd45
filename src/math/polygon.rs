use glam::Vec2;

/// Closed outline in a segment's local space, used for hit-testing.
#[derive(Debug, Clone)]
pub struct Polygon {
	points: Vec<Vec2>,
}

impl Polygon {
	/// `points` must describe a closed outline of at least 3 vertices.
	/// Callers assembling outlines from untrusted input validate the count first.
	pub fn new(points: Vec<Vec2>) -> Self {
		debug_assert!(points.len() >= 3);
		Self { points }
	}

	/// Axis-aligned rectangle of `size` centered on the origin, shifted by `offset`.
	///
	/// The default hit outline for segments without a hand-authored one.
	pub fn rect(size: Vec2, offset: Vec2) -> Self {
		let half = size / 2.0;
		Self::new(vec![
			Vec2::new(-half.x, -half.y) + offset,
			Vec2::new(half.x, -half.y) + offset,
			Vec2::new(half.x, half.y) + offset,
			Vec2::new(-half.x, half.y) + offset,
		])
	}

	pub fn points(&self) -> &[Vec2] {
		&self.points
	}

	/// Even-odd ray cast against the outline.
	///
	/// Undefined if the point is exactly on an edge. Due to floating point precision
	/// it is hard for a pointer position to land exactly on an edge, and for points
	/// that close to the outline either answer is an acceptable pick.
	pub fn contains(&self, p: Vec2) -> bool {
		let mut inside = false;
		let mut j = self.points.len() - 1;
		for i in 0..self.points.len() {
			let a = self.points[i];
			let b = self.points[j];
			if (a.y > p.y) != (b.y > p.y) {
				let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
				if p.x < x_cross {
					inside = !inside;
				}
			}
			j = i;
		}
		inside
	}
}
