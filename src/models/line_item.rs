use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Stable handle for a line item. Assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub(crate) struct ItemId(pub(crate) i64);

impl ItemId {
    /// Coerce an identifier coming from user input. `"5"`, `" 5 "` and
    /// `"5.0"` all give `ItemId(5)`.
    pub(crate) fn sanitize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Self(n));
        }
        let f: f64 = trimmed.parse().ok()?;
        integral(f).map(Self)
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

struct ItemIdVisitor;

impl Visitor<'_> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an integer id, as a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        i64::try_from(v)
            .map(ItemId)
            .map_err(|_| E::custom(format!("id {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ItemId, E> {
        integral(v)
            .map(ItemId)
            .ok_or_else(|| E::custom(format!("id {v} is not an integer")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        ItemId::sanitize(v).ok_or_else(|| E::custom(format!("id '{v}' is not numeric")))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// Hands out timestamp-derived ids that never repeat within the process,
/// even when two items are created in the same millisecond.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next(&self) -> ItemId {
        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return ItemId(candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Amounts are written as JSON numbers; numeric strings are still read.
mod amount {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        if value.fract().is_zero() {
            if let Some(n) = value.to_i64() {
                return s.serialize_i64(n);
            }
        }
        match value.to_f64() {
            Some(f) => s.serialize_f64(f),
            None => Err(serde::ser::Error::custom(format!("amount {value} has no float form"))),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IncomeItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    #[serde(with = "amount")]
    pub(crate) amount: Decimal,
}

impl IncomeItem {
    pub(crate) fn new(id: ItemId, name: String, amount: Decimal) -> Self {
        Self { id, name, amount }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExpenseItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    #[serde(with = "amount")]
    pub(crate) projected: Decimal,
    #[serde(default, with = "amount")]
    pub(crate) actual: Decimal,
}

impl ExpenseItem {
    /// New expense lines start with nothing spent.
    pub(crate) fn new(id: ItemId, name: String, projected: Decimal) -> Self {
        Self {
            id,
            name,
            projected,
            actual: Decimal::ZERO,
        }
    }
}
