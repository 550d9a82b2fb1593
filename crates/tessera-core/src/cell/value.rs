//! Typed reads and writes over a cell's text

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::locale::ParsingLocale;

/// An enumeration that can be stored in a cell by variant name.
///
/// The variant table replaces runtime discovery of enum members: each
/// implementor lists its names once and the cell accessors look them up.
///
/// ```rust
/// use tessera_core::CellEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Status {
///     Active,
///     Retired,
/// }
///
/// impl CellEnum for Status {
///     const VARIANTS: &'static [(&'static str, Self)] =
///         &[("Active", Status::Active), ("Retired", Status::Retired)];
/// }
/// ```
pub trait CellEnum: Sized + Copy + PartialEq + fmt::Debug + 'static {
    /// Variant names paired with their values, in declaration order
    const VARIANTS: &'static [(&'static str, Self)];

    /// Look up a variant by name
    fn from_name(name: &str, ignore_case: bool) -> Option<Self> {
        let name = name.trim();
        Self::VARIANTS
            .iter()
            .find(|(candidate, _)| {
                if ignore_case {
                    candidate.eq_ignore_ascii_case(name)
                } else {
                    *candidate == name
                }
            })
            .map(|(_, value)| *value)
    }

    /// The registered name of a variant
    fn name(self) -> Option<&'static str> {
        Self::VARIANTS
            .iter()
            .find(|(_, value)| *value == self)
            .map(|(name, _)| *name)
    }
}

/// Read-only typed view over a piece of cell text
#[derive(Clone, Copy)]
pub(crate) struct TypedText<'a> {
    pub(crate) text: &'a str,
    pub(crate) locale: &'a ParsingLocale,
}

impl<'a> TypedText<'a> {
    pub(crate) fn int(self) -> Result<i32> {
        self.locale.parse_integer(self.text, "int")
    }

    pub(crate) fn long(self) -> Result<i64> {
        self.locale.parse_integer(self.text, "long")
    }

    pub(crate) fn float(self) -> Result<f32> {
        self.locale.parse_float(self.text, "float")
    }

    pub(crate) fn double(self) -> Result<f64> {
        self.locale.parse_float(self.text, "double")
    }

    pub(crate) fn date_time(self) -> Result<NaiveDateTime> {
        self.locale.parse_date_time(self.text)
    }

    pub(crate) fn enumeration<E: CellEnum>(self, ignore_case: bool) -> Result<E> {
        E::from_name(self.text, ignore_case)
            .ok_or_else(|| Error::invalid_value(std::any::type_name::<E>(), self.text))
    }
}

pub(crate) fn enum_text<E: CellEnum>(value: E) -> Result<&'static str> {
    value
        .name()
        .ok_or_else(|| Error::invalid_value("registered enum variant", format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Shape {
        Circle,
        Square,
        Unlisted,
    }

    impl CellEnum for Shape {
        const VARIANTS: &'static [(&'static str, Self)] =
            &[("Circle", Shape::Circle), ("Square", Shape::Square)];
    }

    #[test]
    fn test_enum_lookup() {
        assert_eq!(Shape::from_name("circle", true), Some(Shape::Circle));
        assert_eq!(Shape::from_name("circle", false), None);
        assert_eq!(Shape::from_name("Square", false), Some(Shape::Square));
        assert_eq!(Shape::Square.name(), Some("Square"));
        assert!(enum_text(Shape::Unlisted).is_err());
    }

    #[test]
    fn test_typed_text() {
        let locale = ParsingLocale::invariant();
        let text = TypedText {
            text: "12",
            locale: &locale,
        };
        assert_eq!(text.int().unwrap(), 12);
        assert_eq!(text.long().unwrap(), 12);
        assert_eq!(text.double().unwrap(), 12.0);
        assert!(text.date_time().is_err());
        assert!(text.enumeration::<Shape>(true).is_err());
    }
}
