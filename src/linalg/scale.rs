use crate::traits::FloatScalar;

/// Power-of-two factor `mult` such that `d_max / mult` lies in `[0.5, 1)`.
///
/// The decompositions divide every matrix entry by `mult` before forming
/// sums of squares, which keeps intermediates within a safe exponent range;
/// eigenvalues and singular values scale linearly with the matrix, so the
/// results are multiplied back by `mult` on return.
///
/// `d_max` must be finite and non-negative. Returns 1 when `d_max` is zero.
pub(crate) fn scaling_factor<T: FloatScalar>(d_max: T) -> T {
    if d_max <= T::zero() {
        return T::one();
    }

    // d_max = m * 2^exp with m != 0. Normalizing the integer mantissa by
    // its own bit length gives the fraction f = d_max / 2^e in [0.5, 1),
    // and mult = d_max / f is then the exact power of two 2^e. Dividing
    // out the mantissa never leaves the representable range, which a
    // direct 2^e would for subnormal input.
    let (m, _exp, _sign) = d_max.integer_decode();
    let bits = (64 - m.leading_zeros()) as i32;
    let two = T::one() + T::one();
    let frac = T::from_f64(m as f64) / two.powi(bits);

    let mult = d_max / frac;
    if mult.is_finite() {
        mult
    } else {
        // 2^e overflows only when d_max sits in the topmost binade; one
        // halving keeps the quotient in [1, 2) instead of [0.5, 1).
        d_max / (frac + frac)
    }
}
