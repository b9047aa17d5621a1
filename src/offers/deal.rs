//! Multi-buy deals

use std::{fmt, str::FromStr};

use crate::offers::OfferError;

/// "Buy N, pay for M" multi-buy deal, written `N-for-M`.
///
/// For every complete group of `buy` units only `pay` are charged, so each
/// group earns `buy - pay` free units. Always satisfies `buy > pay >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deal {
    buy: u32,
    pay: u32,
}

impl Deal {
    /// Create a new deal.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::InvalidDealTerms`] unless `buy > pay >= 1`.
    pub fn new(buy: u32, pay: u32) -> Result<Self, OfferError> {
        if pay == 0 || pay >= buy {
            return Err(OfferError::InvalidDealTerms { buy, pay });
        }

        Ok(Self { buy, pay })
    }

    /// Units in one deal group.
    pub fn buy(&self) -> u32 {
        self.buy
    }

    /// Units charged per deal group.
    pub fn pay(&self) -> u32 {
        self.pay
    }

    /// Whether `quantity` reaches at least one full group.
    pub fn applies_to(&self, quantity: u32) -> bool {
        quantity >= self.buy
    }

    /// Number of units given away for free at `quantity`.
    pub fn free_units(&self, quantity: u32) -> u64 {
        let groups = u64::from(quantity / self.buy);

        groups * u64::from(self.buy - self.pay)
    }
}

impl FromStr for Deal {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || OfferError::MalformedDeal(s.to_string());

        let (buy, pay) = s.trim().split_once("-for-").ok_or_else(malformed)?;

        let buy = buy.parse::<u32>().map_err(|_err| malformed())?;
        let pay = pay.parse::<u32>().map_err(|_err| malformed())?;

        Self::new(buy, pay)
    }
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-for-{}", self.buy, self.pay)
    }
}
