//! Exact-decimal value objects for prices and material quantities.
//!
//! Stock and money are compared, multiplied and subtracted repeatedly while planning,
//! so nothing in the domain touches binary floating point. Both types wrap
//! `rust_decimal::Decimal` and are normalized to a fixed scale on construction, which
//! mirrors fixed-scale column storage (`NUMBER(15,2)` for prices, `NUMBER(15,3)` for
//! quantities).

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Fractional digits kept for monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Fractional digits kept for material quantities.
pub const QUANTITY_SCALE: u32 = 3;

/// Total significant digits of a stored price or quantity.
const STORED_PRECISION: u32 = 15;

fn normalize(value: Decimal, scale: u32) -> Decimal {
    let mut v = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    if v.is_zero() {
        v.set_sign_positive(true);
    }
    v.rescale(scale);
    v
}

fn ensure_fits(value: Decimal, scale: u32, field: &str) -> DomainResult<()> {
    let limit = Decimal::from(10u64.pow(STORED_PRECISION - scale));
    if value.abs() >= limit {
        return Err(DomainError::validation(format!(
            "{field} must have at most {} integer digits",
            STORED_PRECISION - scale
        )));
    }
    Ok(())
}

/// Monetary amount with exactly two fractional digits.
///
/// Arithmetic is checked: every computed amount is exact at scale 2 or the
/// operation returns `None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, MONEY_SCALE));

    /// Largest amount whose cents fit the 96-bit decimal mantissa.
    pub const MAX: Money = Money(Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, MONEY_SCALE));

    /// Normalize a decimal to a two-digit amount (half away from zero).
    ///
    /// Amounts above [`Money::MAX`] cannot keep two digits; use [`Money::try_new`]
    /// for caller-supplied values.
    pub fn new(value: Decimal) -> Self {
        Self(normalize(value, MONEY_SCALE))
    }

    /// Validate a price supplied by a caller: non-negative and storable.
    pub fn try_new(value: Decimal, field: &str) -> DomainResult<Self> {
        let money = Self::new(value);
        if money.0.is_sign_negative() && !money.0.is_zero() {
            return Err(DomainError::validation(format!("{field} cannot be negative")));
        }
        ensure_fits(money.0, MONEY_SCALE, field)?;
        Ok(money)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount in hundredths; `None` only for values built by `new` beyond `MAX`.
    fn cents(self) -> Option<i128> {
        (self.0.scale() == MONEY_SCALE).then(|| self.0.mantissa())
    }

    fn from_cents(cents: i128) -> Option<Self> {
        Decimal::try_from_i128_with_scale(cents, MONEY_SCALE)
            .ok()
            .map(Self)
    }

    /// Line value: this unit price times a whole number of units, if representable.
    pub fn checked_times(self, units: u64) -> Option<Self> {
        Self::from_cents(self.cents()?.checked_mul(i128::from(units))?)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Self::from_cents(self.cents()?.checked_add(rhs.cents()?)?)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Self::from_cents(self.cents()?.checked_sub(rhs.cents()?)?)
    }

    /// How many whole units at this price fit in `budget`.
    ///
    /// A zero price fits without limit. A negative budget fits nothing.
    pub fn units_within(self, budget: Money) -> u64 {
        let (Some(price), Some(budget)) = (self.cents(), budget.cents()) else {
            return 0;
        };
        if price <= 0 {
            return u64::MAX;
        }
        if budget <= 0 {
            return 0;
        }
        u64::try_from(budget / price).unwrap_or(u64::MAX)
    }
}

impl ValueObject for Money {}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::try_new(value, "amount").map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// Material quantity with exactly three fractional digits.
///
/// Unlike [`Money`], a quantity may be zero or negative: a requirement edge can carry
/// a non-positive quantity, which planning treats as unsatisfiable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::from_parts(0, 0, 0, false, QUANTITY_SCALE));

    pub fn new(value: Decimal) -> Self {
        Self(normalize(value, QUANTITY_SCALE))
    }

    /// Validate a caller-supplied quantity against the stored precision.
    ///
    /// Sign rules are left to the owning entity.
    pub fn try_new(value: Decimal, field: &str) -> DomainResult<Self> {
        let quantity = Self::new(value);
        ensure_fits(quantity.0, QUANTITY_SCALE, field)?;
        Ok(quantity)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl ValueObject for Quantity {}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Quantity::try_new(value, "quantity").map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// Exact `floor(dividend / divisor)` as a unit count.
///
/// Returns `None` when `divisor` is not positive or the quotient does not fit in a
/// `u64`. A non-positive dividend yields `Some(0)`.
///
/// Decimal division rounds at 28 significant digits, so the truncated quotient is
/// corrected with exact multiplications until `units * divisor <= dividend <
/// (units + 1) * divisor` holds.
pub fn floor_div(dividend: Decimal, divisor: Decimal) -> Option<u64> {
    if divisor <= Decimal::ZERO {
        return None;
    }
    if dividend <= Decimal::ZERO {
        return Some(0);
    }

    let mut units = dividend.checked_div(divisor)?.trunc().to_u64()?;

    while units > 0 && divisor.checked_mul(Decimal::from(units))? > dividend {
        units -= 1;
    }
    while let Some(next) = units.checked_add(1) {
        match divisor.checked_mul(Decimal::from(next)) {
            Some(consumed) if consumed <= dividend => units = next,
            _ => break,
        }
    }

    Some(units)
}
