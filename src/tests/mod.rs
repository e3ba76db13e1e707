use crate::data::{Outline, Point};
use crate::painter::{plan, PaintOp};
use crate::{canvas_position, TraceMode, Tracer};

use proptest::prelude::*;
use rand::distributions::Standard;
use rand::Rng;
use test_strategy::proptest;

use claims::assert_some_eq;

/// One pointer event, as delivered by the UI event loop.
#[derive(Debug, Clone, Copy)]
enum Gesture {
  Down(i32, i32),
  Move(i32, i32),
  Up,
}

impl Arbitrary for Gesture {
  type Parameters = ();
  type Strategy = BoxedStrategy<Gesture>;
  fn arbitrary_with(_params: ()) -> Self::Strategy {
    prop_oneof![
      (0..2000i32, 0..2000i32).prop_map(|(x, y)| Gesture::Down(x, y)),
      (0..2000i32, 0..2000i32).prop_map(|(x, y)| Gesture::Move(x, y)),
      Just(Gesture::Up),
    ]
    .boxed()
  }
}

// Reference model: replay a gesture sequence and count the appends the
// data-model contract promises (downs always, moves only while the flag is
// set and only in freehand mode).
fn replay(mode: TraceMode, events: &[Gesture]) -> (Tracer<i32>, usize) {
  let mut tracer = Tracer::new(mode);
  let mut expected = 0;
  for &event in events {
    match event {
      Gesture::Down(x, y) => {
        tracer.pointer_down(Point::new([x, y]));
        expected += 1;
      }
      Gesture::Move(x, y) => {
        let active = tracer.is_drawing();
        tracer.pointer_move(Point::new([x, y]));
        if active && mode == TraceMode::Freehand {
          expected += 1;
        }
      }
      Gesture::Up => tracer.pointer_up(),
    }
  }
  (tracer, expected)
}

fn random_outline(len: usize) -> Outline<i32> {
  rand::thread_rng()
    .sample_iter::<Point<i32, 2>, _>(Standard)
    .take(len)
    .collect()
}

#[proptest]
fn freehand_appends_every_active_event(events: Vec<Gesture>) {
  let (tracer, expected) = replay(TraceMode::Freehand, &events);
  prop_assert_eq!(tracer.outline().len(), expected);
}

#[proptest]
fn corners_appends_one_vertex_per_click(events: Vec<Gesture>) {
  let (tracer, _) = replay(TraceMode::Corners, &events);
  let downs = events
    .iter()
    .filter(|event| matches!(event, Gesture::Down(_, _)))
    .count();
  prop_assert_eq!(tracer.outline().len(), downs);
}

#[proptest]
fn idle_moves_never_mutate(#[strategy(0..64usize)] moves: usize) {
  for &mode in &[TraceMode::Corners, TraceMode::Freehand] {
    let mut tracer: Tracer<i32> = Tracer::new(mode);
    for nth in 0..moves {
      tracer.pointer_move(Point::new([nth as i32, nth as i32]));
    }
    prop_assert!(tracer.outline().is_empty());
    prop_assert!(!tracer.is_drawing());
  }
}

#[proptest]
fn reset_always_returns_to_idle(events: Vec<Gesture>) {
  let (mut tracer, _) = replay(TraceMode::Freehand, &events);
  tracer.reset();
  prop_assert!(tracer.outline().is_empty());
  prop_assert!(!tracer.is_drawing());
  prop_assert_eq!(tracer.repaint(), vec![PaintOp::Clear, PaintOp::Backdrop]);
}

#[proptest]
fn repaint_is_a_pure_function_of_state(#[strategy(0..32usize)] len: usize) {
  let outline = random_outline(len);
  prop_assert_eq!(plan(&outline), plan(&outline));
}

#[proptest]
fn closing_edge_needs_three_vertices(#[strategy(0..32usize)] len: usize) {
  let outline = random_outline(len);
  let closed = plan(&outline).contains(&PaintOp::ClosePath);
  prop_assert_eq!(closed, len >= 3);
  prop_assert_eq!(outline.iter_edges().count(), match len {
    0 | 1 => 0,
    2 => 1,
    n => n,
  });
}

#[proptest]
fn client_coordinates_map_by_offset(
  #[strategy(0..10_000i32)] px: i32,
  #[strategy(0..10_000i32)] py: i32,
  #[strategy(0..10_000i32)] rx: i32,
  #[strategy(0..10_000i32)] ry: i32,
) {
  let mapped = canvas_position(&Point::new([px, py]), &Point::new([rx, ry]));
  prop_assert_eq!(mapped, Point::new([px - rx, py - ry]));
}

// The end-to-end walkthrough: three corner clicks form a closed triangle over
// the backdrop, and a reset reverts to the backdrop alone.
#[test]
fn three_clicks_trace_a_closed_triangle() {
  let mut tracer: Tracer<i32> = Tracer::new(TraceMode::Corners);
  for &corner in &[(100, 100), (200, 100), (200, 200)] {
    tracer.pointer_down(Point::from(corner));
    tracer.pointer_up();
  }

  assert_eq!(
    tracer.outline().points(),
    &[
      Point::new([100, 100]),
      Point::new([200, 100]),
      Point::new([200, 200]),
    ]
  );
  assert_some_eq!(tracer.outline().first(), &Point::new([100, 100]));

  let frame = tracer.repaint();
  assert_eq!(
    frame,
    vec![
      PaintOp::Clear,
      PaintOp::Backdrop,
      PaintOp::BeginPath,
      PaintOp::MoveTo(Point::new([100, 100])),
      PaintOp::LineTo(Point::new([200, 100])),
      PaintOp::LineTo(Point::new([200, 200])),
      PaintOp::ClosePath,
      PaintOp::Stroke { width: 2.0 },
    ]
  );
  // The exported PNG is a pixel copy of the last frame; repainting without a
  // state change must describe the same pixels.
  assert_eq!(tracer.repaint(), frame);

  tracer.reset();
  assert_eq!(tracer.repaint(), vec![PaintOp::Clear, PaintOp::Backdrop]);
}
