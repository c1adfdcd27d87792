//! A module for enumerating the canonical forms of each digit count.
//!
//! The digit product of a number only depends on the multiset of prime
//! factors of its digits, so the digits can be shuffled and recombined
//! without changing the product. Recombining as greedily as possible into
//! 5s, 7s, 8s and 9s leaves one of six small prefixes on the left, which
//! means every distinct digit product of length D is reached by some number
//! shaped like `<prefix>555777888999` (Matt Parker's reduction).
//!
//! Two more observations shrink the space:
//!  1. A 5 next to any factor of 2 makes the product a multiple of 10, which
//!     reaches 0 on the following step. So 5s only appear when the prefix
//!     product is odd, and never together with an 8.
//!  2. We never need the decimal digits of a candidate to evaluate it. The
//!     candidate's digit product is assembled directly from the exponents,
//!     which is already the first step of the persistence chain.

use crate::digit_product::from_prime_exponents;
use log::trace;
use malachite::natural::Natural;

/// A fixed leading-digit residue of a canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix {
    pub text: &'static str,
    pub digit_count: u32,
    pub product: u32,
}

/// Every prefix a canonical form can start with, in enumeration order.
/// 26 sorts first because any other two-digit start is a 2 followed by
/// at least a 7. This is not numeric order overall: forms with the empty
/// prefix start with a 5 or 7 and still come after the forms led by 6.
pub static PREFIXES: [Prefix; 6] = [
    Prefix {
        text: "26",
        digit_count: 2,
        product: 12,
    },
    Prefix {
        text: "2",
        digit_count: 1,
        product: 2,
    },
    Prefix {
        text: "3",
        digit_count: 1,
        product: 3,
    },
    Prefix {
        text: "4",
        digit_count: 1,
        product: 4,
    },
    Prefix {
        text: "6",
        digit_count: 1,
        product: 6,
    },
    Prefix {
        text: "",
        digit_count: 0,
        product: 1,
    },
];

impl Prefix {
    /// Whether this prefix can be followed by 5s without forcing a zero product.
    #[must_use]
    pub fn allows_fives(&self) -> bool {
        self.product % 2 == 1
    }
}

/// One candidate: a prefix followed by runs of 5s, 7s, 8s and 9s.
/// Fives and eights never appear together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalForm {
    pub prefix: &'static Prefix,
    pub fives: u32,
    pub sevens: u32,
    pub eights: u32,
    pub nines: u32,
}

impl CanonicalForm {
    /// Total number of decimal digits in this form.
    #[must_use]
    pub fn digit_count(&self) -> u32 {
        self.prefix.digit_count + self.fives + self.sevens + self.eights + self.nines
    }

    /// The digit product of this form, built directly from its exponents.
    #[must_use]
    pub fn value(&self) -> Natural {
        let mut value = from_prime_exponents(&[
            3 * u64::from(self.eights),
            2 * u64::from(self.nines),
            u64::from(self.fives),
            u64::from(self.sevens),
        ]);
        value *= Natural::from(self.prefix.product);
        value
    }

    /// Materialize the decimal representation. Only needed for records.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        let mut decimal = String::with_capacity(self.digit_count() as usize);
        decimal.push_str(self.prefix.text);
        for (digit, count) in [
            ('5', self.fives),
            ('7', self.sevens),
            ('8', self.eights),
            ('9', self.nines),
        ] {
            decimal.extend(std::iter::repeat_n(digit, count as usize));
        }
        decimal
    }
}

/// Iterate over every canonical form with exactly `digits` digits.
///
/// For each prefix that fits, the forms containing a 5 are yielded first
/// (only for odd prefixes), then the forms made of 7s, 8s and 9s. Forms
/// sharing a prefix come out in increasing numeric order, but the empty
/// prefix is last even though its forms can be smaller than those led by
/// 6, so the sequence as a whole is not sorted.
pub fn canonical_forms(digits: u32) -> impl Iterator<Item = CanonicalForm> {
    PREFIXES
        .iter()
        .filter(move |prefix| prefix.digit_count <= digits)
        .flat_map(move |prefix| {
            let remaining = digits - prefix.digit_count;
            trace!(
                "Enumerating prefix {:?} with {} trailing digits",
                prefix.text, remaining
            );
            with_fives(prefix, remaining).chain(without_fives(prefix, remaining))
        })
}

/// Forms with at least one 5, any mix of 7s and 9s, and no 8s.
fn with_fives(prefix: &'static Prefix, remaining: u32) -> impl Iterator<Item = CanonicalForm> {
    let max_sevens_and_nines = if prefix.allows_fives() { remaining } else { 0 };
    (0..max_sevens_and_nines).flat_map(move |sevens_and_nines| {
        (0..=sevens_and_nines).map(move |nines| CanonicalForm {
            prefix,
            fives: remaining - sevens_and_nines,
            sevens: sevens_and_nines - nines,
            eights: 0,
            nines,
        })
    })
}

/// Forms made only of 7s, 8s and 9s.
fn without_fives(prefix: &'static Prefix, remaining: u32) -> impl Iterator<Item = CanonicalForm> {
    (0..=remaining).flat_map(move |eights_and_nines| {
        (0..=eights_and_nines).map(move |nines| CanonicalForm {
            prefix,
            fives: 0,
            sevens: remaining - eights_and_nines,
            eights: eights_and_nines - nines,
            nines,
        })
    })
}

/// The number of canonical forms with exactly `digits` digits.
#[must_use]
pub fn candidate_count(digits: u32) -> u64 {
    PREFIXES
        .iter()
        .filter(|prefix| prefix.digit_count <= digits)
        .map(|prefix| {
            let remaining = u64::from(digits - prefix.digit_count);
            let without_fives = (remaining + 1) * (remaining + 2) / 2;
            let with_fives = if prefix.allows_fives() {
                remaining * (remaining + 1) / 2
            } else {
                0
            };
            without_fives + with_fives
        })
        .sum()
}
