//! Decimal odds, held exactly as quoted, and the [OddsTable] that maps tickets to them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::ticket::Ticket;

/// Decimal odds: the payout multiplier, inclusive of the stake. Any positive, finite value is
/// accepted and kept as given; stake arithmetic goes through [Payout], which is exact.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Odds(f64);

impl Odds {
    pub fn decimal(&self) -> f64 {
        self.0
    }

    /// The return on `stake`, rounded to the nearest `f64`.
    pub fn payout_f64(&self, stake: u64) -> f64 {
        stake as f64 * self.0
    }

    /// The exact return on `stake`.
    pub fn payout(&self, stake: u64) -> Payout {
        let (mantissa, exponent) = self.decompose();
        Payout {
            significand: stake as u128 * mantissa as u128,
            exponent,
        }
    }

    /// Splits the odds into `(mantissa, exponent)` such that `odds = mantissa × 2^exponent`.
    fn decompose(&self) -> (u64, i32) {
        let bits = self.0.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1 << 52) - 1);
        if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | 1 << 52, biased - 1075)
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("odds must be a positive, finite decimal, got {0}")]
pub struct InvalidOdds(pub f64);

impl TryFrom<f64> for Odds {
    type Error = InvalidOdds;

    fn try_from(decimal: f64) -> Result<Self, Self::Error> {
        if !decimal.is_finite() || decimal <= 0.0 {
            return Err(InvalidOdds(decimal));
        }
        Ok(Self(decimal))
    }
}

impl From<Odds> for f64 {
    fn from(odds: Odds) -> Self {
        odds.0
    }
}

/// An exact monetary return, `significand × 2^exponent`. Comparisons between payouts (and
/// against whole amounts, via `From<u64>`) are free of rounding.
#[derive(Debug, Clone, Copy)]
pub struct Payout {
    significand: u128,
    exponent: i32,
}
impl Payout {
    /// One past the position of the most significant bit, or `None` for a zero payout.
    fn magnitude(&self) -> Option<i64> {
        if self.significand == 0 {
            None
        } else {
            Some((u128::BITS - self.significand.leading_zeros()) as i64 + self.exponent as i64)
        }
    }
}

impl From<u64> for Payout {
    fn from(amount: u64) -> Self {
        Self {
            significand: amount as u128,
            exponent: 0,
        }
    }
}

impl Ord for Payout {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.magnitude(), other.magnitude()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(lhs), Some(rhs)) if lhs != rhs => lhs.cmp(&rhs),
            _ => {
                // equal magnitudes, so aligning the exponents cannot overflow
                if self.exponent >= other.exponent {
                    let shift = (self.exponent - other.exponent) as u32;
                    (self.significand << shift).cmp(&other.significand)
                } else {
                    let shift = (other.exponent - self.exponent) as u32;
                    self.significand.cmp(&(other.significand << shift))
                }
            }
        }
    }
}

impl PartialOrd for Payout {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Payout {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Payout {}

impl FromStr for Odds {
    type Err = InvalidOdds;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = s.trim().parse::<f64>().map_err(|_| InvalidOdds(f64::NAN))?;
        Self::try_from(decimal)
    }
}

impl Display for Odds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.decimal())
    }
}

/// An odds quote as it arrives from an external source: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl TryFrom<&RawPrice> for Odds {
    type Error = InvalidOdds;

    fn try_from(raw: &RawPrice) -> Result<Self, Self::Error> {
        match raw {
            RawPrice::Number(decimal) => Odds::try_from(*decimal),
            RawPrice::Text(text) => Odds::from_str(text),
        }
    }
}

/// Externally sourced odds, keyed by ticket identifier.
pub type RawOdds = BTreeMap<String, RawPrice>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OddsTable {
    odds: FxHashMap<Ticket, Odds>,
}
impl OddsTable {
    pub fn insert(&mut self, ticket: Ticket, odds: Odds) -> Option<Odds> {
        self.odds.insert(ticket, odds)
    }

    pub fn get(&self, ticket: &Ticket) -> Option<Odds> {
        self.odds.get(ticket).copied()
    }

    pub fn contains(&self, ticket: &Ticket) -> bool {
        self.odds.contains_key(ticket)
    }

    pub fn len(&self) -> usize {
        self.odds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.odds.is_empty()
    }

    /// Overlays the entries of `other` onto this table, replacing any existing quotes.
    pub fn merge(&mut self, other: OddsTable) {
        self.odds.extend(other.odds);
    }

    /// Entries in ascending ticket order.
    pub fn sorted(&self) -> Vec<(Ticket, Odds)> {
        let mut entries: Vec<_> = self.odds.iter().map(|(&ticket, &odds)| (ticket, odds)).collect();
        entries.sort_unstable_by_key(|&(ticket, _)| ticket);
        entries
    }
}

impl FromIterator<(Ticket, Odds)> for OddsTable {
    fn from_iter<T: IntoIterator<Item = (Ticket, Odds)>>(iter: T) -> Self {
        Self {
            odds: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid odds for ticket {key}: {source}")]
pub struct InvalidQuote {
    pub key: String,
    #[source]
    pub source: InvalidOdds,
}

impl TryFrom<&RawOdds> for OddsTable {
    type Error = InvalidQuote;

    /// Keys that do not name a ticket are skipped, since they can never be looked up; a price
    /// that does not parse as odds fails the entire table.
    fn try_from(raw: &RawOdds) -> Result<Self, Self::Error> {
        let mut table = OddsTable::default();
        for (key, price) in raw {
            let odds = Odds::try_from(price).map_err(|source| InvalidQuote {
                key: key.clone(),
                source,
            })?;
            match Ticket::from_str(key) {
                Ok(ticket) => {
                    table.insert(ticket, odds);
                }
                Err(err) => warn!("skipping quote: {err}"),
            }
        }
        Ok(table)
    }
}

impl From<&OddsTable> for RawOdds {
    fn from(table: &OddsTable) -> Self {
        table
            .odds
            .iter()
            .map(|(ticket, odds)| (ticket.to_string(), RawPrice::Number(odds.decimal())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str) -> Ticket {
        Ticket::from_str(id).unwrap()
    }

    #[test]
    fn odds_kept_as_quoted() {
        assert_eq!(5.4, Odds::try_from(5.4).unwrap().decimal());
        assert_eq!(2.49996, Odds::try_from(2.49996).unwrap().decimal());
        assert_eq!(0.00001, Odds::try_from(0.00001).unwrap().decimal());
        assert_eq!(1e9, Odds::try_from(1e9).unwrap().decimal());
        assert_eq!(f64::MIN_POSITIVE / 4.0, Odds::try_from(f64::MIN_POSITIVE / 4.0).unwrap().decimal());
    }

    #[test]
    fn odds_invalid() {
        for invalid in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Odds::try_from(invalid).is_err(), "for {invalid}");
        }
        assert!(Odds::from_str("fast").is_err());
    }

    #[test]
    fn payout_exact() {
        let odds = Odds::try_from(2.5).unwrap();
        assert_eq!(Payout::from(2500), odds.payout(1000));
        assert!(odds.payout(999) < Payout::from(2500));
        assert!(odds.payout(1001) > Payout::from(2500));

        // more decimal places than a typical quote; 1000 returns only 2499.96
        let odds = Odds::try_from(2.49996).unwrap();
        assert!(odds.payout(1000) < Payout::from(2500));
        assert!(odds.payout(1100) > Payout::from(2500));

        // 1.15 is held as 1.1499999999999999..., marginally short of 1.15
        let odds = Odds::try_from(1.15).unwrap();
        assert!(odds.payout(2000) < Payout::from(2300));
        assert_eq!(2300.0, odds.payout_f64(2000));
    }

    #[test]
    fn payout_ordering_across_exponents() {
        let half = Odds::try_from(0.5).unwrap();
        let quarter = Odds::try_from(0.25).unwrap();
        let large = Odds::try_from(1e300).unwrap();
        let tiny = Odds::try_from(f64::MIN_POSITIVE / 4.0).unwrap();
        assert_eq!(half.payout(2), quarter.payout(4));
        assert_eq!(Payout::from(1), half.payout(2));
        assert!(half.payout(3) > quarter.payout(5));
        assert!(large.payout(1) > Payout::from(u64::MAX));
        assert!(tiny.payout(u64::MAX) < Payout::from(1));
        assert!(Payout::from(0) < tiny.payout(1));
        assert_eq!(Payout::from(0), half.payout(0));
    }

    #[test]
    fn odds_from_str() {
        assert_eq!(Odds::try_from(12.5).unwrap(), Odds::from_str(" 12.5 ").unwrap());
    }

    #[test]
    fn table_from_raw() {
        let raw: RawOdds = serde_json::from_str(r#"{"235": 5.4, "237": "12.5", "bogus": 3.0}"#).unwrap();
        let table = OddsTable::try_from(&raw).unwrap();
        assert_eq!(2, table.len());
        assert_eq!(Some(Odds::try_from(5.4).unwrap()), table.get(&ticket("235")));
        assert_eq!(Some(Odds::try_from(12.5).unwrap()), table.get(&ticket("237")));
        assert!(!table.contains(&ticket("234")));
    }

    #[test]
    fn table_from_raw_invalid_price() {
        let raw: RawOdds = serde_json::from_str(r#"{"235": 5.4, "237": "n/a"}"#).unwrap();
        let err = OddsTable::try_from(&raw).unwrap_err();
        assert_eq!("237", err.key);
    }

    #[test]
    fn merge_overrides() {
        let mut table: OddsTable = [
            (ticket("123"), Odds::try_from(2.0).unwrap()),
            (ticket("124"), Odds::try_from(3.0).unwrap()),
        ]
        .into_iter()
        .collect();
        table.merge([(ticket("124"), Odds::try_from(4.0).unwrap())].into_iter().collect());
        assert_eq!(
            vec![
                (ticket("123"), Odds::try_from(2.0).unwrap()),
                (ticket("124"), Odds::try_from(4.0).unwrap())
            ],
            table.sorted()
        );
    }

    #[test]
    fn raw_from_table() {
        let table: OddsTable = [(ticket("789"), Odds::try_from(101.5).unwrap())].into_iter().collect();
        let raw = RawOdds::from(&table);
        assert_eq!(Some(&RawPrice::Number(101.5)), raw.get("789"));
    }
}
