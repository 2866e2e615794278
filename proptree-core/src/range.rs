//! Size-parameterised bounds (C4): `(origin, size -> (lo, hi))`.
//!
//! `origin` is always the shrink target a generator built on this range
//! aims for; `bounds` is consulted fresh on every draw, so the "size" a
//! generator runs at directly controls how wide a net it casts.

use crate::size::Size;
use std::rc::Rc;

/// Bridges a primitive integer type into the `i128` arithmetic `Range`'s
/// `linear`/`exponential` families use internally, so the scaling formulas
/// only need to be written once.
pub trait Integral: Copy + PartialOrd + 'static {
    const MIN_VALUE: Self;
    const MAX_VALUE: Self;
    fn to_i128(self) -> i128;
    fn from_i128(v: i128) -> Self;
}

macro_rules! impl_integral {
    ($($t:ty),* $(,)?) => {
        $(
            impl Integral for $t {
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;
                fn to_i128(self) -> i128 { self as i128 }
                fn from_i128(v: i128) -> Self { v as Self }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

fn clamp_i128(lo: i128, hi: i128, v: i128) -> i128 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    v.max(lo).min(hi)
}

fn linear_scale(origin: i128, bound: i128, lo: i128, hi: i128, size: Size) -> i128 {
    let s = size.clamped().get().min(99) as i128;
    clamp_i128(lo, hi, origin + (bound - origin) * s / 99)
}

fn exponential_scale(origin: i128, bound: i128, lo: i128, hi: i128, size: Size) -> i128 {
    if bound == origin {
        return origin;
    }
    let s = size.clamped().get().min(99) as f64;
    let diff = bound - origin;
    let magnitude = diff.unsigned_abs() as f64;
    let sign = if diff < 0 { -1.0 } else { 1.0 };
    let scaled = ((magnitude + 1.0).powf(s / 99.0) - 1.0) * sign;
    clamp_i128(lo, hi, origin + scaled.round() as i128)
}

/// `(origin, size -> (lo, hi))` over an integer type `T`.
#[derive(Clone)]
pub struct Range<T> {
    origin: T,
    bounds: Rc<dyn Fn(Size) -> (T, T)>,
}

impl<T: Integral> Range<T> {
    pub fn origin(&self) -> T {
        self.origin
    }

    pub fn bounds(&self, size: Size) -> (T, T) {
        (self.bounds)(size)
    }

    pub fn lower_bound(&self, size: Size) -> T {
        self.bounds(size).0
    }

    pub fn upper_bound(&self, size: Size) -> T {
        self.bounds(size).1
    }

    /// A range that only ever produces `x`.
    pub fn singleton(x: T) -> Self {
        Range {
            origin: x,
            bounds: Rc::new(move |_| (x, x)),
        }
    }

    /// Bounds independent of size; origin defaults to `lo`.
    pub fn constant(lo: T, hi: T) -> Self {
        Range {
            origin: lo,
            bounds: Rc::new(move |_| (lo, hi)),
        }
    }

    /// Bounds independent of size, with an explicit origin.
    pub fn constant_from(origin: T, lo: T, hi: T) -> Self {
        Range {
            origin,
            bounds: Rc::new(move |_| (lo, hi)),
        }
    }

    pub fn constant_bounded() -> Self {
        Range::constant_from(T::from_i128(0), T::MIN_VALUE, T::MAX_VALUE)
    }

    /// Bounds grow linearly with size, reaching `lo`/`hi` exactly at size 99.
    pub fn linear(lo: T, hi: T) -> Self {
        Range::linear_from(lo, lo, hi)
    }

    pub fn linear_from(origin: T, lo: T, hi: T) -> Self {
        let (o, l, h) = (origin.to_i128(), lo.to_i128(), hi.to_i128());
        Range {
            origin,
            bounds: Rc::new(move |size| {
                (
                    T::from_i128(linear_scale(o, l, l, h, size)),
                    T::from_i128(linear_scale(o, h, l, h, size)),
                )
            }),
        }
    }

    pub fn linear_bounded() -> Self {
        Range::linear_from(T::from_i128(0), T::MIN_VALUE, T::MAX_VALUE)
    }

    /// Bounds grow exponentially with size, reaching `lo`/`hi` exactly at size 99.
    pub fn exponential(lo: T, hi: T) -> Self {
        Range::exponential_from(lo, lo, hi)
    }

    pub fn exponential_from(origin: T, lo: T, hi: T) -> Self {
        let (o, l, h) = (origin.to_i128(), lo.to_i128(), hi.to_i128());
        Range {
            origin,
            bounds: Rc::new(move |size| {
                (
                    T::from_i128(exponential_scale(o, l, l, h, size)),
                    T::from_i128(exponential_scale(o, h, l, h, size)),
                )
            }),
        }
    }

    pub fn exponential_bounded() -> Self {
        Range::exponential_from(T::from_i128(0), T::MIN_VALUE, T::MAX_VALUE)
    }
}

/// Float-specific range: the linear/exponential integer formulas don't apply
/// cleanly to floats, so `f64` gets its own scale functions mirroring the
/// integer family's shape.
#[derive(Clone)]
pub struct FloatRange {
    origin: f64,
    bounds: Rc<dyn Fn(Size) -> (f64, f64)>,
}

impl FloatRange {
    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn bounds(&self, size: Size) -> (f64, f64) {
        (self.bounds)(size)
    }

    pub fn lower_bound(&self, size: Size) -> f64 {
        self.bounds(size).0
    }

    pub fn upper_bound(&self, size: Size) -> f64 {
        self.bounds(size).1
    }

    pub fn singleton(x: f64) -> Self {
        FloatRange {
            origin: x,
            bounds: Rc::new(move |_| (x, x)),
        }
    }

    pub fn constant(lo: f64, hi: f64) -> Self {
        FloatRange::constant_from(lo, lo, hi)
    }

    pub fn constant_from(origin: f64, lo: f64, hi: f64) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        FloatRange {
            origin,
            bounds: Rc::new(move |_| (lo, hi)),
        }
    }

    pub fn linear(lo: f64, hi: f64) -> Self {
        FloatRange::linear_from(lo, lo, hi)
    }

    pub fn linear_from(origin: f64, lo: f64, hi: f64) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        FloatRange {
            origin,
            bounds: Rc::new(move |size| {
                let s = size.clamped().get().min(99) as f64;
                let scale = |bound: f64| (origin + (bound - origin) * s / 99.0).clamp(lo, hi);
                (scale(lo), scale(hi))
            }),
        }
    }
}
