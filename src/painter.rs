use crate::data::{Outline, Point};

/// Stroke width of the traced outline, in canvas pixels.
pub const STROKE_WIDTH: f64 = 2.0;

/// One drawing command of a repaint.
///
/// A repaint is a display list rather than direct context calls so that it is
/// a pure function of widget state: equal state yields an identical list, and
/// the browser side is a straight fold over it. `Backdrop` is interpreted as
/// a no-op while the background image is still decoding, leaving the surface
/// blank until the load callback fires.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp<T> {
  /// Overwrite the whole surface.
  Clear,
  /// Composite the background image, scaled to the surface size.
  Backdrop,
  BeginPath,
  MoveTo(Point<T, 2>),
  LineTo(Point<T, 2>),
  /// Reconnect to the first vertex. Emitted only for three or more vertices.
  ClosePath,
  Stroke { width: f64 },
}

/// Computes the full repaint for the current outline: background first, then
/// the stroked path. Runs after every mutation of the outline.
pub fn plan<T: Clone>(outline: &Outline<T>) -> Vec<PaintOp<T>> {
  let mut ops = vec![PaintOp::Clear, PaintOp::Backdrop];
  if let Some((origin, rest)) = outline.points().split_first() {
    ops.push(PaintOp::BeginPath);
    ops.push(PaintOp::MoveTo(origin.clone()));
    for point in rest {
      ops.push(PaintOp::LineTo(point.clone()));
    }
    if outline.closes() {
      ops.push(PaintOp::ClosePath);
    }
    ops.push(PaintOp::Stroke {
      width: STROKE_WIDTH,
    });
  }
  ops
}
