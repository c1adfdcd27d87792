//! A module for evaluating the multiplicative persistence of large numbers.
//!
//! Each step of the digit-product map is computed from a histogram of the
//! decimal digits rather than by multiplying the digits one at a time. The
//! composite digits are split into their prime factors (4 = 2^2, 6 = 2*3,
//! 8 = 2^3, 9 = 3^2) so the whole product becomes `2^a * 3^b * 5^c * 7^d`,
//! which is four calls to `pow` and at most three multiplications no matter
//! how many hundreds of digits the number has.

use log::trace;
use malachite::base::num::arithmetic::traits::Pow;
use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::Digits;
use malachite::natural::Natural;

/// The primes that can divide a nonzero digit product, in the order used by
/// [`prime_exponents`].
pub const DIGIT_PRIMES: [u32; 4] = [2, 3, 5, 7];

/// Count how many times each decimal digit appears in `n`.
/// Returns None as soon as a zero digit is seen, since the product is then zero.
#[must_use]
pub fn digit_histogram(n: &Natural) -> Option<[u64; 10]> {
    if *n == 0u32 {
        return None;
    }

    let mut histogram = [0u64; 10];
    for digit in n.to_digits_asc(&10u8) {
        if digit == 0 {
            return None;
        }
        histogram[usize::from(digit)] += 1;
    }
    Some(histogram)
}

/// Regroup a digit histogram into the exponents of 2, 3, 5 and 7.
#[must_use]
pub fn prime_exponents(histogram: &[u64; 10]) -> [u64; 4] {
    let twos = histogram[2] + 2 * histogram[4] + histogram[6] + 3 * histogram[8];
    let threes = histogram[3] + histogram[6] + 2 * histogram[9];
    [twos, threes, histogram[5], histogram[7]]
}

/// Multiply out `2^e0 * 3^e1 * 5^e2 * 7^e3`, skipping empty factors.
#[must_use]
pub fn from_prime_exponents(exponents: &[u64; 4]) -> Natural {
    let mut product = Natural::from(1u32);
    for (prime, &exponent) in DIGIT_PRIMES.iter().zip(exponents) {
        if exponent > 0 {
            product *= Natural::from(*prime).pow(exponent);
        }
    }
    product
}

/// The product of the decimal digits of `n`. Zero if any digit is zero.
#[must_use]
pub fn digit_product(n: &Natural) -> Natural {
    match digit_histogram(n) {
        Some(histogram) => from_prime_exponents(&prime_exponents(&histogram)),
        None => Natural::ZERO,
    }
}

/// Calculate the multiplicative persistence of a number: how many times the
/// digit-product map has to be applied before the value drops below 10.
#[must_use]
pub fn persistence(mut n: Natural) -> u32 {
    // 🔥🔥🔥 HOT LOOP 🔥🔥🔥
    let mut steps = 0;
    while n >= 10u32 {
        n = digit_product(&n);
        steps += 1;
    }
    steps
}

/// Every value visited on the way to a single digit, starting with `n` itself.
/// The persistence of `n` is one less than the length of the result.
#[must_use]
pub fn persistence_trajectory(n: Natural) -> Vec<Natural> {
    let mut trajectory = vec![n];
    while let Some(last) = trajectory.last()
        && *last >= 10u32
    {
        let next = digit_product(last);
        trace!("{last} -> {next}");
        trajectory.push(next);
    }
    trajectory
}
