// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
use num_traits::*;
use ordered_float::{NotNan, OrderedFloat};

pub mod data;
mod painter;
mod tracer;

pub use painter::{plan, PaintOp, STROKE_WIDTH};
pub use tracer::{canvas_position, TraceMode, Tracer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// A pixel input was NaN or infinite and cannot name a canvas location.
  InvalidCoordinate,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InvalidCoordinate => write!(f, "Invalid coordinate"),
    }
  }
}

/// Scalars that can act as canvas-space coordinates.
///
/// The browser hands out raw `f64` pixel offsets; `from_pixel`/`to_pixel`
/// move values across that boundary. Fixed-precision scalars are supported so
/// tests can assert on exact coordinates.
pub trait CanvasScalar:
  std::fmt::Debug + NumOps<Self, Self> + PartialEq + PartialOrd + Clone
{
  fn from_pixel(pixel: f64) -> Result<Self, Error>;
  fn to_pixel(&self) -> f64;
}

macro_rules! fixed_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl CanvasScalar for $ty {
        fn from_pixel(pixel: f64) -> Result<Self, Error> {
          if !pixel.is_finite() {
            return Err(Error::InvalidCoordinate);
          }
          Ok(pixel as $ty)
        }
        fn to_pixel(&self) -> f64 {
          *self as f64
        }
      }
    )*
  };
}

macro_rules! floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl CanvasScalar for $ty {
        fn from_pixel(pixel: f64) -> Result<Self, Error> {
          if !pixel.is_finite() {
            return Err(Error::InvalidCoordinate);
          }
          Ok(pixel as $ty)
        }
        fn to_pixel(&self) -> f64 {
          <f64 as From<$ty>>::from(*self)
        }
      }
    )*
  };
}

macro_rules! wrapped_floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl CanvasScalar for NotNan<$ty> {
        fn from_pixel(pixel: f64) -> Result<Self, Error> {
          if !pixel.is_finite() {
            return Err(Error::InvalidCoordinate);
          }
          NotNan::new(pixel as $ty).map_err(|_| Error::InvalidCoordinate)
        }
        fn to_pixel(&self) -> f64 {
          <f64 as From<$ty>>::from(self.into_inner())
        }
      }

      impl CanvasScalar for OrderedFloat<$ty> {
        fn from_pixel(pixel: f64) -> Result<Self, Error> {
          if !pixel.is_finite() {
            return Err(Error::InvalidCoordinate);
          }
          Ok(OrderedFloat(pixel as $ty))
        }
        fn to_pixel(&self) -> f64 {
          <f64 as From<$ty>>::from(self.into_inner())
        }
      }
    )*
  };
}

fixed_precision!(i16, i32, i64, isize);
floating_precision!(f32, f64);
wrapped_floating_precision!(f32, f64);

#[cfg(test)]
mod tests;
