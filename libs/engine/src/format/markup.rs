//! Output markup: plain text or HTML.

use super::decimal::Decimal;
use scical_units::Unit;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How rich output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// `^` for powers, `e` for scientific notation, `p/q` for fractions
    #[default]
    Plain,
    /// `<sup>` for powers and scientific notation, stacked fractions
    Html,
}

impl Markup {
    pub fn is_rich(self) -> bool {
        self == Markup::Html
    }

    pub fn escape(self, text: &str) -> Cow<'_, str> {
        match self {
            Markup::Plain => Cow::Borrowed(text),
            Markup::Html => html_escape::encode_text(text),
        }
    }

    /// `base` raised to an already rendered exponent, as a superscript
    /// when `superscript` is set.
    pub fn power(self, base: &str, exponent: &str, superscript: bool) -> String {
        if superscript && self.is_rich() {
            format!("{}<sup>{}</sup>", base, exponent)
        } else {
            format!("{}^{}", base, exponent)
        }
    }

    /// A rounded decimal, with scientific notation as `·10<sup>n</sup>`
    /// when `rich` and as `en` otherwise.
    pub fn decimal(self, value: &Decimal, rich: bool) -> String {
        let sign = if value.negative { "-" } else { "" };
        match value.exponent {
            None => format!("{}{}", sign, value.mantissa),
            Some(exp) if rich && self.is_rich() => {
                format!("{}{}·10<sup>{}</sup>", sign, value.mantissa, exp)
            }
            Some(exp) => format!("{}{}e{}", sign, value.mantissa, exp),
        }
    }

    /// A numerator over a denominator, both already rendered.
    pub fn fraction(self, numer: &str, denom: &str, rich: bool) -> String {
        if rich && self.is_rich() {
            format!("<sup>{}</sup>&frasl;<sub>{}</sub>", numer, denom)
        } else {
            format!("{}/{}", numer, denom)
        }
    }

    pub fn line_break(self) -> &'static str {
        match self {
            Markup::Plain => "\n",
            Markup::Html => "<br>",
        }
    }

    /// A unit without positive exponents written with negative ones
    /// (`m^-1`, `s<sup>-2</sup>`), for use after a magnitude.
    pub fn reciprocal_unit(self, unit: &Unit, rich: bool) -> String {
        unit.denominator()
            .map(|(symbol, exp)| {
                self.power(&self.escape(symbol), &format!("-{}", exp), rich)
            })
            .collect::<Vec<_>>()
            .join("·")
    }

    /// A unit such as `m/s^2` or `m/s<sup>2</sup>`.
    pub fn unit(self, unit: &Unit) -> String {
        if !self.is_rich() {
            return unit.to_string();
        }
        let term = |(symbol, exp): (&str, i32)| {
            let symbol = self.escape(symbol);
            if exp == 1 {
                symbol.into_owned()
            } else {
                self.power(&symbol, &exp.to_string(), true)
            }
        };
        let numer: Vec<String> = unit.numerator().map(term).collect();
        let denom: Vec<String> = unit.denominator().map(term).collect();
        let numer = if numer.is_empty() {
            "1".to_string()
        } else {
            numer.join("·")
        };
        match denom.len() {
            0 => numer,
            1 => format!("{}/{}", numer, denom[0]),
            _ => format!("{}/({})", numer, denom.join("·")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scical_units::UnitRegistry;

    #[test]
    fn powers() {
        assert_eq!(Markup::Plain.power("x", "2", true), "x^2");
        assert_eq!(Markup::Html.power("x", "2", true), "x<sup>2</sup>");
        assert_eq!(Markup::Html.power("x", "2", false), "x^2");
    }

    #[test]
    fn scientific_notation() {
        let d = Decimal {
            negative: true,
            mantissa: "1.5".into(),
            exponent: Some(-7),
        };
        assert_eq!(Markup::Plain.decimal(&d, true), "-1.5e-7");
        assert_eq!(Markup::Html.decimal(&d, true), "-1.5·10<sup>-7</sup>");
        assert_eq!(Markup::Html.decimal(&d, false), "-1.5e-7");
    }

    #[test]
    fn html_units() {
        let units = UnitRegistry::builtin().unwrap();
        let unit = units.resolve("m").unwrap().div(&units.resolve("s").unwrap().powi(2));
        assert_eq!(Markup::Html.unit(&unit), "m/s<sup>2</sup>");
        assert_eq!(Markup::Html.escape("a<b"), "a&lt;b");
    }

    #[test]
    fn reciprocal_units() {
        let units = UnitRegistry::builtin().unwrap();
        let unit = units.resolve("s").unwrap().powi(-2);
        assert_eq!(Markup::Plain.reciprocal_unit(&unit, true), "s^-2");
        assert_eq!(Markup::Html.reciprocal_unit(&unit, true), "s<sup>-2</sup>");
        assert_eq!(Markup::Html.reciprocal_unit(&unit, false), "s^-2");
    }
}
