use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::DomainError;

/// Conversion factor between a recipe's measurement unit and the stock-keeping
/// unit of an inventory item (e.g. 1000 when recipes use grams and stock is
/// kept in kilograms).
///
/// Always strictly positive, so dividing by it cannot fault.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct UnitMultiplier(Decimal);

impl UnitMultiplier {
    pub const ONE: Self = Self(Decimal::ONE);

    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "unit multiplier must be positive (got {value})"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Default for UnitMultiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<Decimal> for UnitMultiplier {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitMultiplier> for Decimal {
    fn from(value: UnitMultiplier) -> Self {
        value.0
    }
}
