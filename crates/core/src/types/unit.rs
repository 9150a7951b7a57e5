//! Purchase units and per-family conversion tables.
//!
//! Every [`Unit`] belongs to exactly one [`UnitFamily`]. Prices are only ever
//! converted between units of the same family, using that family's
//! [`ConversionTable`]. Discrete units (`piece`, `loaf`) form families of their
//! own, so a loaf can never be re-priced as pieces.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised by unit parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The input does not name a known unit.
    #[error("unknown unit: {0}")]
    Unknown(String),
    /// The two units measure different things (e.g. `ml` for a product sold by `kg`).
    #[error("cannot convert {from} to {to}: units belong to different families")]
    CrossFamily {
        /// Unit the price is denominated in.
        from: Unit,
        /// Unit that was requested.
        to: Unit,
    },
    /// Arithmetic overflowed while converting.
    #[error("price conversion overflowed")]
    Overflow,
}

/// A unit a product can be priced or purchased in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "gram")]
    Gram,
    #[serde(rename = "L")]
    Litre,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "loaf")]
    Loaf,
}

impl Unit {
    /// All known units, in display order.
    pub const ALL: [Self; 6] = [
        Self::Kilogram,
        Self::Gram,
        Self::Litre,
        Self::Millilitre,
        Self::Piece,
        Self::Loaf,
    ];

    /// Name used in rendered prices, forms and order messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "gram",
            Self::Litre => "L",
            Self::Millilitre => "ml",
            Self::Piece => "piece",
            Self::Loaf => "loaf",
        }
    }

    /// The family this unit measures.
    #[must_use]
    pub const fn family(&self) -> UnitFamily {
        match self {
            Self::Kilogram | Self::Gram => UnitFamily::Mass,
            Self::Litre | Self::Millilitre => UnitFamily::Volume,
            Self::Piece => UnitFamily::Piece,
            Self::Loaf => UnitFamily::Loaf,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kg" | "Kg" | "KG" => Ok(Self::Kilogram),
            "gram" | "g" | "grams" => Ok(Self::Gram),
            "L" | "l" | "litre" | "liter" => Ok(Self::Litre),
            "ml" | "mL" => Ok(Self::Millilitre),
            "piece" | "pc" | "pieces" => Ok(Self::Piece),
            "loaf" | "loaves" => Ok(Self::Loaf),
            other => Err(UnitError::Unknown(other.to_string())),
        }
    }
}

/// A group of mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Mass,
    Volume,
    Piece,
    Loaf,
}

impl UnitFamily {
    /// The conversion table attached to this family.
    #[must_use]
    pub const fn table(self) -> ConversionTable {
        ConversionTable { family: self }
    }
}

/// Conversion factors for one unit family.
///
/// A factor is the count of that unit per family reference (1 kg = 1000
/// gram, so `gram` has factor 1000 in the mass table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionTable {
    family: UnitFamily,
}

impl ConversionTable {
    /// The family this table converts within.
    #[must_use]
    pub const fn family(&self) -> UnitFamily {
        self.family
    }

    /// Factor for `unit`, or `None` when the unit is not part of this family.
    #[must_use]
    pub const fn factor(&self, unit: Unit) -> Option<Decimal> {
        match (self.family, unit) {
            (UnitFamily::Mass, Unit::Kilogram)
            | (UnitFamily::Volume, Unit::Litre)
            | (UnitFamily::Piece, Unit::Piece)
            | (UnitFamily::Loaf, Unit::Loaf) => Some(Decimal::ONE),
            (UnitFamily::Mass, Unit::Gram) | (UnitFamily::Volume, Unit::Millilitre) => {
                Some(Decimal::ONE_THOUSAND)
            }
            _ => None,
        }
    }

    /// Units listed in this table.
    #[must_use]
    pub fn units(&self) -> Vec<Unit> {
        Unit::ALL
            .into_iter()
            .filter(|unit| self.factor(*unit).is_some())
            .collect()
    }

    /// Re-denominate a price per `from` into a price per `to`.
    ///
    /// Applies `price / (factor[to] / factor[from])`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::CrossFamily`] if either unit is missing from this
    /// table, and [`UnitError::Overflow`] if the arithmetic overflows.
    pub fn convert_price(&self, price: Decimal, from: Unit, to: Unit) -> Result<Decimal, UnitError> {
        let cross = || UnitError::CrossFamily { from, to };
        let from_factor = self.factor(from).ok_or_else(cross)?;
        let to_factor = self.factor(to).ok_or_else(cross)?;

        if from == to {
            return Ok(price);
        }

        let ratio = to_factor
            .checked_div(from_factor)
            .ok_or(UnitError::Overflow)?;
        price.checked_div(ratio).ok_or(UnitError::Overflow)
    }
}
