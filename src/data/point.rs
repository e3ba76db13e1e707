use array_init::{array_init, try_array_init};
use num_traits::Zero;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::ops::Index;
use std::ops::Sub;

use crate::{CanvasScalar, Error};

/// A location on the drawing surface, in canvas-space pixel coordinates.
///
/// Points are immutable once created; the widget orders them by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)] // Required for correctness!
pub struct Point<T, const N: usize> {
  pub array: [T; N],
}

/// Difference between two points. Used for bounding-box offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>(pub [T; N]);

// Random sampling.
impl<T, const N: usize> Distribution<Point<T, N>> for Standard
where
  Standard: Distribution<T>,
{
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<T, N> {
    Point {
      array: array_init(|_| rng.gen()),
    }
  }
}

impl<T, const N: usize> Point<T, N> {
  pub const fn new(array: [T; N]) -> Point<T, N> {
    Point { array }
  }

  // Similar to num_traits::identities::Zero but doesn't require an Add impl.
  pub fn zero() -> Self
  where
    T: Zero,
  {
    Point {
      array: array_init(|_| Zero::zero()),
    }
  }

  pub fn as_vec(&self) -> &Vector<T, N> {
    self.into()
  }

  pub fn cast<U, F>(&self, f: F) -> Point<U, N>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: array_init(|i| f(self.array[i].clone())),
    }
  }
}

impl<T: CanvasScalar, const N: usize> Point<T, N> {
  /// Lifts raw browser pixel offsets into the widget's scalar space.
  pub fn from_pixels(pixels: [f64; N]) -> Result<Point<T, N>, Error> {
    Ok(Point {
      array: try_array_init(|i| T::from_pixel(pixels[i]))?,
    })
  }

  pub fn to_pixels(&self) -> [f64; N] {
    array_init(|i| self.array[i].to_pixel())
  }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T> From<(T, T)> for Point<T, 2> {
  fn from(point: (T, T)) -> Point<T, 2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl<T, const N: usize> From<[T; N]> for Point<T, N> {
  fn from(array: [T; N]) -> Point<T, N> {
    Point { array }
  }
}

impl<'a, T, const N: usize> From<&'a Point<T, N>> for &'a Vector<T, N> {
  fn from(point: &Point<T, N>) -> &Vector<T, N> {
    unsafe { &*(point as *const Point<T, N> as *const Vector<T, N>) }
  }
}

// point - point = vector
impl<'a, 'b, T, const N: usize> Sub<&'a Point<T, N>> for &'b Point<T, N>
where
  T: Sub<T, Output = T> + Clone,
{
  type Output = Vector<T, N>;

  fn sub(self: &'b Point<T, N>, other: &'a Point<T, N>) -> Self::Output {
    Vector(array_init(|i| {
      self.array.index(i).clone() - other.array.index(i).clone()
    }))
  }
}

// point - vector = point
impl<'a, 'b, T, const N: usize> Sub<&'a Vector<T, N>> for &'b Point<T, N>
where
  T: Sub<T, Output = T> + Clone,
{
  type Output = Point<T, N>;

  fn sub(self: &'b Point<T, N>, other: &'a Vector<T, N>) -> Self::Output {
    Point {
      array: array_init(|i| self.array.index(i).clone() - other.0.index(i).clone()),
    }
  }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
  type Output = T;
  fn index(&self, index: usize) -> &T {
    self.0.index(index)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use claims::assert_ok_eq;

  #[test]
  fn point_algebra() {
    let p = Point::new([200, 150]);
    let q = Point::new([10, 20]);
    assert_eq!(&p - &q, Vector([190, 130]));
    assert_eq!(&p - q.as_vec(), Point::new([190, 130]));
  }

  #[test]
  fn pixel_round_trip() {
    let p: Point<f64, 2> = Point::from_pixels([100.5, 7.0]).unwrap();
    assert_eq!(p.to_pixels(), [100.5, 7.0]);
    assert_ok_eq!(Point::<i32, 2>::from_pixels([100.0, 7.0]), Point::new([100, 7]));
  }

  #[test]
  fn casting_between_scalar_spaces() {
    assert_eq!(Point::<i32, 2>::zero(), Point::new([0, 0]));
    assert_eq!(Point::new([1i32, 2]).cast(f64::from), Point::new([1.0, 2.0]));
  }

  #[test]
  fn non_finite_pixels_are_rejected() {
    assert_eq!(
      Point::<f64, 2>::from_pixels([f64::NAN, 0.0]),
      Err(crate::Error::InvalidCoordinate)
    );
    assert_eq!(
      Point::<i32, 2>::from_pixels([0.0, f64::INFINITY]),
      Err(crate::Error::InvalidCoordinate)
    );
  }
}
