use core::fmt::Debug;
use num_traits::float::FloatConst;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by the decompositions and norms, which need `sqrt`, `hypot`,
/// `copysign`, `acos`, and the binary exponent of a value
/// (`Float::integer_decode`). Implemented for `f32` and `f64`.
pub trait FloatScalar: Scalar + Float + FloatConst {
    /// Inject an `f64` constant into `Self`.
    ///
    /// Used for the fixed algorithm coefficients (1/2, 2, 3, ...); for
    /// `f32` the value rounds to nearest.
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline]
                fn from_f64(v: f64) -> $t {
                    v as $t
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
