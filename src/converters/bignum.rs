use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use super::{check_radixes, BaseConverter, Result};
use crate::models::Alphabet;

/// Exact conversion over unbounded integers; handles hash-sized inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigUintConverter;

impl BaseConverter for BigUintConverter {
    fn name(&self) -> &'static str {
        "bignum"
    }

    fn convert(&self, digits: &str, from: &Alphabet, to: &Alphabet) -> Result<String> {
        check_radixes(from, to)?;
        let values = from.digits_of(digits)?;

        if from == to {
            return Ok(digits.to_string());
        }

        // 1: Accumulate the magnitude in the source radix
        let from_radix = BigUint::from(from.radix());
        let mut value = BigUint::zero();
        for digit in values {
            value = value * &from_radix + BigUint::from(digit);
        }

        // 2: Peel off destination digits, least significant first
        if value.is_zero() {
            return Ok(to.symbol(0).to_string());
        }

        let to_radix = BigUint::from(to.radix());
        let mut reversed = Vec::new();
        while !value.is_zero() {
            let (quotient, remainder) = value.div_rem(&to_radix);
            // remainder < radix, so it is a single (possibly absent for zero) u32 digit
            let digit = remainder.iter_u32_digits().next().unwrap_or(0) as usize;
            reversed.push(to.symbol(digit));
            value = quotient;
        }

        Ok(reversed.into_iter().rev().collect())
    }
}
