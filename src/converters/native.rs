use super::{check_radixes, BaseConverter, Result};
use crate::errors::ConverterError;
use crate::models::Alphabet;

/// Largest source radix the native backend accepts.
const MAX_SOURCE_RADIX: usize = 10;

/// Fixed-width fallback over `u64`. Refuses, rather than truncates, anything it cannot hold.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeConverter;

impl BaseConverter for NativeConverter {
    fn name(&self) -> &'static str {
        "native"
    }

    fn convert(&self, digits: &str, from: &Alphabet, to: &Alphabet) -> Result<String> {
        check_radixes(from, to)?;
        if from.radix() > MAX_SOURCE_RADIX {
            return Err(ConverterError::Capability(format!(
                "native converter does not support source bases greater than {} (got {}), \
                 enable the `bignum` feature",
                MAX_SOURCE_RADIX,
                from.radix()
            )));
        }

        let values = from.digits_of(digits)?;
        if from == to {
            return Ok(digits.to_string());
        }

        let from_radix = from.radix() as u64;
        let mut value: u64 = 0;
        for digit in values {
            value = value
                .checked_mul(from_radix)
                .and_then(|v| v.checked_add(digit as u64))
                .ok_or_else(|| {
                    ConverterError::Capability(format!(
                        "`{}` exceeds the native integer capacity ({}), \
                         enable the `bignum` feature",
                        digits,
                        u64::MAX
                    ))
                })?;
        }

        let to_radix = to.radix() as u64;
        let mut reversed = Vec::new();
        loop {
            reversed.push(to.symbol((value % to_radix) as usize));
            value /= to_radix;
            if value == 0 {
                break;
            }
        }

        Ok(reversed.into_iter().rev().collect())
    }
}
