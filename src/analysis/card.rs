//! Credit card result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card expiry date as printed on the card (`MM/YY`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpireDate {
    /// Month (1 - 12)
    pub month: u8,
    /// Year as read from the card (two digits)
    pub year: u16,
}

impl ExpireDate {
    /// Create an expiry date, returning `None` if the month is out of range
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { month, year })
        } else {
            None
        }
    }

    /// Four-digit year, assuming two-digit years belong to the 2000s
    pub fn full_year(&self) -> u16 {
        if self.year < 100 {
            2000 + self.year
        } else {
            self.year
        }
    }
}

impl fmt::Display for ExpireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Fields extracted from a scanned card
///
/// Fields are filled in as they reach consensus and are never replaced once set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    /// Primary account number, groups separated by single spaces
    pub number: Option<String>,
    /// Card holder name
    pub name: Option<String>,
    /// Expiry date
    pub expire_date: Option<ExpireDate>,
}

impl CreditCard {
    /// Whether every field has been decided
    pub fn is_complete(&self) -> bool {
        self.number.is_some() && self.name.is_some() && self.expire_date.is_some()
    }
}
