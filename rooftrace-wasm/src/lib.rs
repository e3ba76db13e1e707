use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::*;

// The backdrop image decodes asynchronously; until the load callback fires,
// repaints leave the background blank.
static BACKDROP_READY: AtomicBool = AtomicBool::new(false);

fn backdrop_ready() -> bool {
  BACKDROP_READY.load(Relaxed)
}

fn set_backdrop_ready() {
  BACKDROP_READY.store(true, Relaxed)
}

pub mod widget {
  use once_cell::sync::Lazy;
  use std::sync::Mutex;
  use wasm_bindgen::JsCast;
  use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

  use rooftrace::data::Point;
  use rooftrace::{canvas_position, PaintOp, TraceMode, Tracer};

  /// One surface size end-to-end, for the visible canvas and the compositing
  /// buffer alike.
  pub const SURFACE_WIDTH: u32 = 900;
  pub const SURFACE_HEIGHT: u32 = 550;

  /// Background resource, fetched once per session with cross-origin access
  /// so the canvas stays exportable.
  pub const BACKDROP_URL: &str = "/sample.webp";

  pub const EXPORT_FILENAME: &str = "roof-drawing.png";

  static TRACER: Lazy<Mutex<Tracer<f64>>> =
    Lazy::new(|| Mutex::new(Tracer::new(TraceMode::Corners)));

  /// Everything that can go wrong between the widget and the DOM. Each case
  /// is an explicit state reported to the console, never an assertion.
  #[derive(Debug, Clone, PartialEq, Eq)]
  pub enum Error {
    WindowMissing,
    DocumentMissing,
    ElementMissing(&'static str),
    NotACanvas,
    ContextUnavailable,
    ContextMissing,
    ImageUnavailable,
    /// The export call was rejected, typically because the canvas was
    /// tainted by a cross-origin backdrop served without permission.
    ExportBlocked(String),
    Paint(String),
  }

  impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
      match self {
        Error::WindowMissing => write!(f, "No window object"),
        Error::DocumentMissing => write!(f, "No document object"),
        Error::ElementMissing(id) => write!(f, "No element with id '{}'", id),
        Error::NotACanvas => write!(f, "Element is not a canvas"),
        Error::ContextUnavailable => write!(f, "2d context unavailable"),
        Error::ContextMissing => write!(f, "2d context missing"),
        Error::ImageUnavailable => write!(f, "Cannot create backdrop image"),
        Error::ExportBlocked(detail) => write!(f, "Export blocked: {}", detail),
        Error::Paint(detail) => write!(f, "Paint failure: {}", detail),
      }
    }
  }

  pub(crate) fn window() -> Result<web_sys::Window, Error> {
    web_sys::window().ok_or(Error::WindowMissing)
  }

  pub(crate) fn document() -> Result<web_sys::Document, Error> {
    window()?.document().ok_or(Error::DocumentMissing)
  }

  pub fn element(id: &'static str) -> Result<web_sys::Element, Error> {
    document()?
      .get_element_by_id(id)
      .ok_or(Error::ElementMissing(id))
  }

  pub fn canvas() -> Result<HtmlCanvasElement, Error> {
    element("canvas")?
      .dyn_into::<HtmlCanvasElement>()
      .map_err(|_| Error::NotACanvas)
  }

  pub fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, Error> {
    canvas
      .get_context("2d")
      .map_err(|_| Error::ContextUnavailable)?
      .ok_or(Error::ContextMissing)?
      .dyn_into::<CanvasRenderingContext2d>()
      .map_err(|_| Error::ContextUnavailable)
  }

  /// Whether the background is cached in an intermediate buffer. The two
  /// strategies paint identical pixels; `Buffered` merely avoids re-scaling
  /// the decoded image on every repaint.
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub enum Compositing {
    Direct,
    Buffered,
  }

  /// Where repaints read the background from.
  #[derive(Clone)]
  pub enum Backdrop {
    /// Draw the decoded image, scaled, on every repaint.
    Direct(HtmlImageElement),
    /// Blit a pre-scaled intermediate canvas.
    Buffered(HtmlCanvasElement),
  }

  impl Backdrop {
    pub fn new(compositing: Compositing, image: &HtmlImageElement) -> Result<Backdrop, Error> {
      match compositing {
        Compositing::Direct => Ok(Backdrop::Direct(image.clone())),
        Compositing::Buffered => {
          let buffer = document()?
            .create_element("canvas")
            .map_err(|_| Error::ContextUnavailable)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::NotACanvas)?;
          buffer.set_width(SURFACE_WIDTH);
          buffer.set_height(SURFACE_HEIGHT);
          Ok(Backdrop::Buffered(buffer))
        }
      }
    }

    /// Runs once, from the image load callback. Scales the decoded image to
    /// the surface size, irrespective of its native aspect ratio.
    pub fn absorb(&self, image: &HtmlImageElement) -> Result<(), Error> {
      match self {
        Backdrop::Direct(_) => Ok(()),
        Backdrop::Buffered(buffer) => context(buffer)?
          .draw_image_with_html_image_element_and_dw_and_dh(
            image,
            0.,
            0.,
            f64::from(SURFACE_WIDTH),
            f64::from(SURFACE_HEIGHT),
          )
          .map_err(|err| Error::Paint(format!("{:?}", err))),
      }
    }

    fn composite(&self, context: &CanvasRenderingContext2d) -> Result<(), Error> {
      match self {
        Backdrop::Direct(image) => context
          .draw_image_with_html_image_element_and_dw_and_dh(
            image,
            0.,
            0.,
            f64::from(SURFACE_WIDTH),
            f64::from(SURFACE_HEIGHT),
          )
          .map_err(|err| Error::Paint(format!("{:?}", err))),
        Backdrop::Buffered(buffer) => context
          .draw_image_with_html_canvas_element(buffer, 0., 0.)
          .map_err(|err| Error::Paint(format!("{:?}", err))),
      }
    }
  }

  /// Full redraw from current state: background, then the stroked outline.
  pub fn repaint(backdrop: &Backdrop) -> Result<(), Error> {
    let ops = TRACER.lock().unwrap().repaint();
    apply(&ops, backdrop)
  }

  fn apply(ops: &[PaintOp<f64>], backdrop: &Backdrop) -> Result<(), Error> {
    let canvas = canvas()?;
    let context = context(&canvas)?;
    for op in ops {
      match op {
        PaintOp::Clear => {
          context.clear_rect(0., 0., f64::from(canvas.width()), f64::from(canvas.height()))
        }
        PaintOp::Backdrop => {
          if super::backdrop_ready() {
            backdrop.composite(&context)?;
          }
        }
        PaintOp::BeginPath => context.begin_path(),
        PaintOp::MoveTo(point) => {
          let [x, y] = point.to_pixels();
          context.move_to(x, y)
        }
        PaintOp::LineTo(point) => {
          let [x, y] = point.to_pixels();
          context.line_to(x, y)
        }
        PaintOp::ClosePath => context.close_path(),
        PaintOp::Stroke { width } => {
          context.set_line_width(*width);
          context.stroke()
        }
      }
    }
    Ok(())
  }

  fn event_position(event: &web_sys::MouseEvent) -> Result<Point<f64, 2>, Error> {
    let rect = canvas()?.get_bounding_client_rect();
    let client = Point::new([f64::from(event.client_x()), f64::from(event.client_y())]);
    let origin = Point::new([rect.left(), rect.top()]);
    Ok(canvas_position(&client, &origin))
  }

  pub fn pointer_down(event: &web_sys::MouseEvent) -> Result<(), Error> {
    let point = event_position(event)?;
    TRACER.lock().unwrap().pointer_down(point);
    Ok(())
  }

  /// Returns whether the outline changed, so the caller can skip the repaint
  /// when the pointer was merely hovering.
  pub fn pointer_move(event: &web_sys::MouseEvent) -> Result<bool, Error> {
    let point = event_position(event)?;
    Ok(TRACER.lock().unwrap().pointer_move(point))
  }

  pub fn pointer_up() {
    TRACER.lock().unwrap().pointer_up()
  }

  pub fn reset() {
    TRACER.lock().unwrap().reset()
  }

  /// Serializes the visible canvas to a PNG data URI and triggers a
  /// client-side download.
  pub fn export() -> Result<(), Error> {
    let canvas = canvas()?;
    let url = canvas
      .to_data_url_with_type("image/png")
      .map_err(|err| Error::ExportBlocked(format!("{:?}", err)))?;
    let anchor = document()?
      .create_element("a")
      .map_err(|err| Error::ExportBlocked(format!("{:?}", err)))?
      .dyn_into::<web_sys::HtmlAnchorElement>()
      .map_err(|_| Error::ExportBlocked("anchor creation failed".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILENAME);
    anchor.click();
    Ok(())
  }
}

pub mod runner {
  use gloo_events::EventListener;
  use wasm_bindgen::{JsCast, UnwrapThrowExt};
  use web_sys::HtmlImageElement;

  use super::widget::{self, Backdrop, Compositing, Error};

  pub fn report(err: &Error) {
    web_sys::console::error_1(&err.to_string().into())
  }

  /// Wires the widget to the DOM: loads the backdrop, hooks the pointer
  /// events and the Reset / Export Image buttons.
  pub fn mount(compositing: Compositing) -> Result<(), Error> {
    let canvas = widget::canvas()?;

    let image = HtmlImageElement::new().map_err(|_| Error::ImageUnavailable)?;
    // Without this the canvas is tainted and export is refused.
    image.set_cross_origin(Some("anonymous"));
    let backdrop = Backdrop::new(compositing, &image)?;

    {
      let backdrop = backdrop.clone();
      let loaded = image.clone();
      let listener = EventListener::new(&image, "load", move |_event| {
        let outcome = backdrop.absorb(&loaded).and_then(|()| {
          super::set_backdrop_ready();
          widget::repaint(&backdrop)
        });
        if let Err(err) = outcome {
          report(&err);
        }
      });
      listener.forget();
    }
    {
      // A failed or slow load leaves the background unpainted; report it
      // rather than retrying.
      let listener = EventListener::new(&image, "error", move |_event| {
        report(&Error::Paint(format!("backdrop failed to load: {}", widget::BACKDROP_URL)));
      });
      listener.forget();
    }
    // The src assignment starts the fetch; listeners are registered first.
    image.set_src(widget::BACKDROP_URL);

    {
      let backdrop = backdrop.clone();
      let listener = EventListener::new(&canvas, "mousedown", move |event| {
        let event = event.dyn_ref::<web_sys::MouseEvent>().unwrap_throw();
        let outcome = widget::pointer_down(event).and_then(|()| widget::repaint(&backdrop));
        if let Err(err) = outcome {
          report(&err);
        }
      });
      listener.forget();
    }
    {
      let backdrop = backdrop.clone();
      let listener = EventListener::new(&canvas, "mousemove", move |event| {
        let event = event.dyn_ref::<web_sys::MouseEvent>().unwrap_throw();
        let outcome = widget::pointer_move(event).and_then(|changed| {
          if changed {
            widget::repaint(&backdrop)
          } else {
            Ok(())
          }
        });
        if let Err(err) = outcome {
          report(&err);
        }
      });
      listener.forget();
    }
    {
      let listener = EventListener::new(&canvas, "mouseup", move |_event| widget::pointer_up());
      listener.forget();
    }

    {
      let backdrop = backdrop.clone();
      let reset = widget::element("reset")?;
      let listener = EventListener::new(&reset, "click", move |_event| {
        widget::reset();
        // Explicit repaint: the canvas reverts to the background alone.
        if let Err(err) = widget::repaint(&backdrop) {
          report(&err);
        }
      });
      listener.forget();
    }
    {
      let export = widget::element("export")?;
      let listener = EventListener::new(&export, "click", move |_event| {
        if let Err(err) = widget::export() {
          report(&err);
        }
      });
      listener.forget();
    }

    Ok(())
  }
}

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn run() {
  std::panic::set_hook(Box::new(console_error_panic_hook::hook));

  if let Err(err) = runner::mount(widget::Compositing::Buffered) {
    runner::report(&err);
  }
}
