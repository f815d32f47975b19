//! Binary, octal and hexadecimal digit expansion, and roman numerals.

use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

/// Largest magnitude a roman numeral can express.
pub const ROMAN_LIMIT: i64 = 4999;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub fn prefix(base: u32) -> &'static str {
    match base {
        2 => "0b",
        8 => "0o",
        _ => "0x",
    }
}

fn integer_digits(n: &BigInt, base: u32) -> String {
    n.to_str_radix(base).to_ascii_uppercase()
}

/// `n` in `base` with its prefix: `-0x1F`.
pub fn integer(n: &BigInt, base: u32) -> String {
    let sign = if n.is_negative() { "-" } else { "" };
    format!("{}{}{}", sign, prefix(base), integer_digits(&n.abs(), base))
}

/// `value` in `base` with up to `digits` fractional digits.
///
/// One digit more than requested is extracted and rounds the last kept digit
/// up when it is at least half the base.
pub fn fraction(value: &BigRational, base: u32, digits: u32) -> String {
    let sign = if value.is_negative() { "-" } else { "" };
    let value = value.abs();
    let (mut numer, denom) = (value.numer().clone(), value.denom().clone());
    let b = BigInt::from(base);

    let int_part = numer.div_floor(&denom);
    numer = numer.mod_floor(&denom) * &b;
    let mut places: Vec<u32> = Vec::new();
    while !numer.is_zero() && places.len() <= digits as usize {
        let (digit, rest) = numer.div_mod_floor(&denom);
        places.push(digit.to_u32().unwrap_or(0));
        numer = rest * &b;
    }

    let mut int_part = int_part;
    if places.len() > digits as usize {
        let extra = places.pop().unwrap_or(0);
        if extra >= base.div_ceil(2) {
            // Carry through the kept digits into the integer part.
            let mut carry = true;
            for place in places.iter_mut().rev() {
                *place += 1;
                if *place < base {
                    carry = false;
                    break;
                }
                *place = 0;
            }
            if carry {
                int_part += 1;
            }
        }
    }
    while places.last() == Some(&0) {
        places.pop();
    }

    let mut out = format!("{}{}{}", sign, prefix(base), integer_digits(&int_part, base));
    if !places.is_empty() {
        out.push('.');
        out.extend(places.iter().map(|&d| HEX_DIGITS[d as usize] as char));
    }
    out
}

// Canonical spellings of 1-9 for ones, tens and hundreds.
const ONES: [&str; 10] = ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];
const TENS: [&str; 10] = ["", "X", "XX", "XXX", "XL", "L", "LX", "LXX", "LXXX", "XC"];
const HUNDREDS: [&str; 10] = ["", "C", "CC", "CCC", "CD", "D", "DC", "DCC", "DCCC", "CM"];

/// Roman numeral for an integer in [−4999, 4999]; zero is `N`.
pub fn to_roman(n: &BigInt) -> Result<String> {
    let value = n
        .to_i64()
        .filter(|v| v.abs() <= ROMAN_LIMIT)
        .ok_or_else(|| {
            Error::Format(format!(
                "roman numerals are only supported in [-{0}, {0}], got {1}",
                ROMAN_LIMIT, n
            ))
        })?;
    if value == 0 {
        return Ok("N".into());
    }
    let mut out = String::new();
    if value < 0 {
        out.push('-');
    }
    let v = value.unsigned_abs() as usize;
    out.push_str(&"M".repeat(v / 1000));
    out.push_str(HUNDREDS[v / 100 % 10]);
    out.push_str(TENS[v / 10 % 10]);
    out.push_str(ONES[v % 10]);
    Ok(out)
}

/// Read a canonical roman numeral, digit group by digit group.
pub fn parse_roman(text: &str) -> Option<i64> {
    if text == "N" {
        return Some(0);
    }
    let thousands = text.len() - text.trim_start_matches('M').len();
    if text.is_empty() || thousands > 4 {
        return None;
    }
    let mut rest = &text[thousands..];
    let mut value = thousands as i64 * 1000;
    for (table, scale) in [(&HUNDREDS, 100), (&TENS, 10), (&ONES, 1)] {
        // Longest spelling first so `VIII` wins over `V`.
        let matched = (1..10)
            .filter(|&d| rest.starts_with(table[d]))
            .max_by_key(|&d| table[d].len());
        if let Some(d) = matched {
            rest = &rest[table[d].len()..];
            value += d as i64 * scale;
        }
    }
    rest.is_empty().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn integers_in_other_bases() {
        assert_eq!(integer(&BigInt::from(255), 16), "0xFF");
        assert_eq!(integer(&BigInt::from(-5), 2), "-0b101");
        assert_eq!(integer(&BigInt::from(8), 8), "0o10");
    }

    #[test]
    fn exact_fractions() {
        assert_eq!(fraction(&r(21, 2), 16, 8), "0xA.8");
        assert_eq!(fraction(&r(5, 4), 2, 8), "0b1.01");
        assert_eq!(fraction(&r(-1, 2), 8, 8), "-0o0.4");
    }

    #[test]
    fn repeating_fractions_round() {
        // 1/3 = 0.010101… in binary; the ninth digit is 0
        assert_eq!(fraction(&r(1, 3), 2, 8), "0b0.01010101");
        // 2/3 = 0.101010…; the third digit rounds up the second
        assert_eq!(fraction(&r(2, 3), 2, 2), "0b0.11");
        // 0.FFFF… carries into the integer part
        assert_eq!(fraction(&r(65535, 65536), 16, 3), "0x1");
    }

    #[test]
    fn roman_numerals() {
        assert_eq!(to_roman(&BigInt::from(14)).unwrap(), "XIV");
        assert_eq!(to_roman(&BigInt::from(1994)).unwrap(), "MCMXCIV");
        assert_eq!(to_roman(&BigInt::from(4999)).unwrap(), "MMMMCMXCIX");
        assert_eq!(to_roman(&BigInt::from(-9)).unwrap(), "-IX");
        assert_eq!(to_roman(&BigInt::from(0)).unwrap(), "N");
        assert!(matches!(to_roman(&BigInt::from(5000)), Err(Error::Format(_))));
    }

    #[test]
    fn reading_roman_numerals() {
        assert_eq!(parse_roman("XIV"), Some(14));
        assert_eq!(parse_roman("MMMMCMXCIX"), Some(4999));
        assert_eq!(parse_roman("VIII"), Some(8));
        assert_eq!(parse_roman("IIII"), None);
        assert_eq!(parse_roman("IC"), None);
        assert_eq!(parse_roman("MMMMM"), None);
        assert_eq!(parse_roman(""), None);
    }
}
