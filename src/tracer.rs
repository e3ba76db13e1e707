use crate::data::{Outline, Point};
use crate::painter::{self, PaintOp};
use crate::CanvasScalar;

/// How pointer movement contributes vertices while the button is held.
///
/// The widget's instruction copy asks the user to "select the corners", which
/// `Corners` implements: one vertex per click. `Freehand` appends a point for
/// every move event while the button is held, with no drag-vs-click
/// distinction, tracing the pointer path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
  Corners,
  Freehand,
}

/// The point-selection state machine.
///
/// Two states only: idle and drawing. Pointer-down transitions to drawing
/// and appends a vertex; pointer-up transitions back to idle. All mutation
/// happens on the single UI thread; a repaint is a pure read of the current
/// state, so callers invoke [`Tracer::repaint`] at the end of every mutating
/// handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracer<T> {
  outline: Outline<T>,
  drawing: bool,
  mode: TraceMode,
}

impl<T> Tracer<T> {
  pub fn new(mode: TraceMode) -> Tracer<T> {
    Tracer {
      outline: Outline::new(),
      drawing: false,
      mode,
    }
  }

  pub fn mode(&self) -> TraceMode {
    self.mode
  }

  pub fn is_drawing(&self) -> bool {
    self.drawing
  }

  pub fn outline(&self) -> &Outline<T> {
    &self.outline
  }

  /// Starts a gesture and places a vertex. Callers repaint afterwards.
  pub fn pointer_down(&mut self, point: Point<T, 2>) {
    self.drawing = true;
    self.outline.push(point);
  }

  /// No-op while idle. Returns whether the outline changed, so callers can
  /// skip the repaint when it did not.
  pub fn pointer_move(&mut self, point: Point<T, 2>) -> bool {
    if !self.drawing {
      return false;
    }
    match self.mode {
      TraceMode::Corners => false,
      TraceMode::Freehand => {
        self.outline.push(point);
        true
      }
    }
  }

  /// Ends the gesture. No other effect.
  pub fn pointer_up(&mut self) {
    self.drawing = false;
  }

  /// Discards the selection and returns to idle, regardless of prior state.
  /// Callers repaint explicitly afterwards (background only).
  pub fn reset(&mut self) {
    self.outline.clear();
    self.drawing = false;
  }

  pub fn repaint(&self) -> Vec<PaintOp<T>>
  where
    T: Clone,
  {
    painter::plan(&self.outline)
  }
}

impl<T> Default for Tracer<T> {
  fn default() -> Tracer<T> {
    Tracer::new(TraceMode::Corners)
  }
}

/// Maps a pointer event's client position to canvas-local coordinates:
/// the event position minus the canvas bounding rectangle's top-left corner.
///
/// Assumes the canvas is displayed at its declared pixel size; a CSS scaling
/// transform would skew the mapping.
pub fn canvas_position<T: CanvasScalar>(client: &Point<T, 2>, origin: &Point<T, 2>) -> Point<T, 2> {
  client - origin.as_vec()
}
