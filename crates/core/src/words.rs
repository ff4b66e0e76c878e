//! Amount-in-words rendering for financial documents.
//!
//! Produces the Spanish legal form printed on receipts and vouchers:
//! `10520.93` becomes `"DIEZ MIL QUINIENTOS VEINTE CON 93/100"`.
//!
//! Every irregular form lives in a lookup table. In this system `BILLON`
//! names 10^9; larger magnitudes are rejected.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors raised while rendering an amount in words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordsError {
    /// The integer part exceeds the naming table.
    #[error("Amount {0} is out of the supported range")]
    NumberOutOfRange(Decimal),

    /// Negative amounts have no written form on documents.
    #[error("Amount {0} is negative")]
    NegativeAmount(Decimal),
}

impl WordsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NumberOutOfRange(_) => "NUMBER_OUT_OF_RANGE",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
        }
    }
}

/// Names for 0..=29; 11–29 are irregular single words.
const UNITS: [&str; 30] = [
    "",
    "UN",
    "DOS",
    "TRES",
    "CUATRO",
    "CINCO",
    "SEIS",
    "SIETE",
    "OCHO",
    "NUEVE",
    "DIEZ",
    "ONCE",
    "DOCE",
    "TRECE",
    "CATORCE",
    "QUINCE",
    "DIECISEIS",
    "DIECISIETE",
    "DIECIOCHO",
    "DIECINUEVE",
    "VEINTE",
    "VEINTIUN",
    "VEINTIDOS",
    "VEINTITRES",
    "VEINTICUATRO",
    "VEINTICINCO",
    "VEINTISEIS",
    "VEINTISIETE",
    "VEINTIOCHO",
    "VEINTINUEVE",
];

/// Tens from 30 upward; joined to units with `Y`.
const TENS: [&str; 10] = [
    "", "", "", "TREINTA", "CUARENTA", "CINCUENTA", "SESENTA", "SETENTA", "OCHENTA", "NOVENTA",
];

/// Hundreds prefixes. Exactly 100 is `CIEN`, see [`EXACT_HUNDRED`].
const HUNDREDS: [&str; 10] = [
    "",
    "CIENTO",
    "DOSCIENTOS",
    "TRESCIENTOS",
    "CUATROCIENTOS",
    "QUINIENTOS",
    "SEISCIENTOS",
    "SETECIENTOS",
    "OCHOCIENTOS",
    "NOVECIENTOS",
];

const EXACT_HUNDRED: &str = "CIEN";

const ZERO: &str = "CERO";

/// A named magnitude. `singular` is the full phrase for a count of one.
struct Scale {
    value: u64,
    singular: &'static str,
    plural: &'static str,
}

/// Largest first.
const SCALES: [Scale; 3] = [
    Scale {
        value: 1_000_000_000,
        singular: "UN BILLON",
        plural: "BILLONES",
    },
    Scale {
        value: 1_000_000,
        singular: "UN MILLON",
        plural: "MILLONES",
    },
    Scale {
        value: 1_000,
        singular: "MIL",
        plural: "MIL",
    },
];

/// Largest integer part with a name.
const MAX_SUPPORTED: u64 = 999_999_999_999;

/// Converts amounts to their written form.
///
/// Stateless; safe to call from any number of threads.
pub struct NumberToWords;

impl NumberToWords {
    /// Renders `amount` as `"<WORDS> CON <cc>/100"`.
    ///
    /// Cents are rounded to two places with banker's rounding before the split,
    /// so `0.995` reads as `"UN CON 00/100"`.
    ///
    /// # Errors
    ///
    /// - [`WordsError::NegativeAmount`] for amounts below zero
    /// - [`WordsError::NumberOutOfRange`] when the integer part exceeds 999,999,999,999
    pub fn convert(amount: Decimal) -> Result<String, WordsError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(WordsError::NegativeAmount(amount));
        }

        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        let whole = rounded
            .trunc()
            .to_u64()
            .filter(|w| *w <= MAX_SUPPORTED)
            .ok_or(WordsError::NumberOutOfRange(amount))?;
        let cents = (rounded.fract() * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u64()
            .unwrap_or_default();

        Ok(format!("{} CON {cents:02}/100", Self::integer_words(whole)))
    }

    /// Words for an integer in `0..=MAX_SUPPORTED`.
    fn integer_words(n: u64) -> String {
        if n == 0 {
            return ZERO.to_string();
        }

        let mut parts: Vec<String> = Vec::new();
        let mut rest = n;
        for scale in &SCALES {
            let count = rest / scale.value;
            rest %= scale.value;
            match count {
                0 => {}
                1 => parts.push(scale.singular.to_string()),
                _ => parts.push(format!("{} {}", Self::group_words(count), scale.plural)),
            }
        }
        if rest > 0 {
            parts.push(Self::group_words(rest));
        }
        parts.join(" ")
    }

    /// Words for a group in `1..=999`.
    fn group_words(n: u64) -> String {
        if n == 100 {
            return EXACT_HUNDRED.to_string();
        }

        let hundreds = usize::try_from(n / 100).unwrap_or_default();
        let rest = usize::try_from(n % 100).unwrap_or_default();

        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if hundreds > 0 {
            parts.push(HUNDREDS[hundreds]);
        }
        if rest >= 30 {
            parts.push(TENS[rest / 10]);
            if rest % 10 > 0 {
                parts.push("Y");
                parts.push(UNITS[rest % 10]);
            }
        } else if rest > 0 {
            parts.push(UNITS[rest]);
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10520.93), "DIEZ MIL QUINIENTOS VEINTE CON 93/100")]
    #[case(dec!(9), "NUEVE CON 00/100")]
    #[case(dec!(100), "CIEN CON 00/100")]
    #[case(dec!(0), "CERO CON 00/100")]
    #[case(dec!(1000000000), "UN BILLON CON 00/100")]
    fn test_document_literals(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(NumberToWords::convert(amount).unwrap(), expected);
    }

    #[rstest]
    #[case(dec!(1), "UN")]
    #[case(dec!(15), "QUINCE")]
    #[case(dec!(16), "DIECISEIS")]
    #[case(dec!(20), "VEINTE")]
    #[case(dec!(21), "VEINTIUN")]
    #[case(dec!(29), "VEINTINUEVE")]
    #[case(dec!(30), "TREINTA")]
    #[case(dec!(31), "TREINTA Y UN")]
    #[case(dec!(99), "NOVENTA Y NUEVE")]
    #[case(dec!(101), "CIENTO UN")]
    #[case(dec!(110), "CIENTO DIEZ")]
    #[case(dec!(200), "DOSCIENTOS")]
    #[case(dec!(555), "QUINIENTOS CINCUENTA Y CINCO")]
    #[case(dec!(1000), "MIL")]
    #[case(dec!(1001), "MIL UN")]
    #[case(dec!(2000), "DOS MIL")]
    #[case(dec!(21000), "VEINTIUN MIL")]
    #[case(dec!(100000), "CIEN MIL")]
    #[case(dec!(1000000), "UN MILLON")]
    #[case(dec!(2500000), "DOS MILLONES QUINIENTOS MIL")]
    #[case(dec!(21000000), "VEINTIUN MILLONES")]
    #[case(dec!(1000001000), "UN BILLON MIL")]
    #[case(dec!(3000000000), "TRES BILLONES")]
    fn test_integer_words(#[case] amount: Decimal, #[case] words: &str) {
        assert_eq!(
            NumberToWords::convert(amount).unwrap(),
            format!("{words} CON 00/100")
        );
    }

    #[test]
    fn test_largest_supported_amount() {
        assert_eq!(
            NumberToWords::convert(dec!(999999999999.99)).unwrap(),
            "NOVECIENTOS NOVENTA Y NUEVE BILLONES NOVECIENTOS NOVENTA Y NUEVE MILLONES \
             NOVECIENTOS NOVENTA Y NUEVE MIL NOVECIENTOS NOVENTA Y NUEVE CON 99/100"
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            NumberToWords::convert(dec!(1000000000000)),
            Err(WordsError::NumberOutOfRange(dec!(1000000000000)))
        );
    }

    #[test]
    fn test_negative_rejected() {
        let err = NumberToWords::convert(dec!(-5)).unwrap_err();
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
    }

    #[rstest]
    #[case(dec!(0.5), "CERO CON 50/100")]
    #[case(dec!(0.07), "CERO CON 07/100")]
    #[case(dec!(12.345), "DOCE CON 34/100")]
    #[case(dec!(0.995), "UN CON 00/100")]
    #[case(dec!(250.10), "DOSCIENTOS CINCUENTA CON 10/100")]
    fn test_cents(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(NumberToWords::convert(amount).unwrap(), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any supported amount renders as uppercase words followed by its cents.
        #[test]
        fn prop_shape_of_output(cents in 0i64..100_000_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let words = NumberToWords::convert(amount).unwrap();
            let expected_suffix = format!(" CON {:02}/100", cents % 100);

            prop_assert!(words.ends_with(&expected_suffix));
            prop_assert!(!words.contains("  "));
            prop_assert!(words.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ' || c == '/'));
        }

        /// Conversion is a pure function of its input.
        #[test]
        fn prop_deterministic(cents in 0i64..100_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            prop_assert_eq!(NumberToWords::convert(amount), NumberToWords::convert(amount));
        }
    }
}
