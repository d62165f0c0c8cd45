use glam::Affine2;

use crate::figure::Figure;
use crate::node::{RenderPayload, SegmentUuid};

/// Bring-your-own-backend drawing boundary.
///
/// The core establishes each segment's fully composed draw transform and hands it
/// over together with the segment's opaque payload; painting pixels under that
/// transform is entirely the implementation's business. An implementation may
/// rasterize, record draw calls for batching, or just collect them for debugging.
pub trait DrawFigure {
	fn draw_segment(&mut self, transform: Affine2, payload: &RenderPayload, id: SegmentUuid);
}

/// Dispatch one draw call per segment, parents before the children drawn over
/// them, each under its ancestor chain concatenated with the segment's own
/// scale-inclusive local transform.
pub fn draw<T: DrawFigure>(renderer: &mut T, figure: &Figure) {
	for segment in figure.iter() {
		renderer.draw_segment(figure.draw_transform(segment.uuid), &segment.payload, segment.uuid);
	}
}
