//! Session-side owner of the month cache.
//!
//! Reads always come from memory. Writes update memory first and then
//! queue a background save of the whole month; a failed save is reported
//! through the notification channel and never undoes the edit.

mod persister;

use rust_decimal::Decimal;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::models::{
    BudgetDatabase, ExpenseCategory, ExpenseItem, IdGenerator, IncomeItem, IncomeKind, ItemId,
    MonthKey, MonthRecord,
};
use crate::store::{BudgetStore, StoreError};

pub(crate) use persister::PersistOutcome;
use persister::{Persister, SharedStore};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ServiceError {
    #[error("No month selected")]
    NoActiveMonth,

    #[error("Could not load {month}: {source}")]
    Store {
        month: MonthKey,
        #[source]
        source: StoreError,
    },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(Decimal),

    #[error("Amount {0} is above the limit of {MAX_AMOUNT}")]
    AmountTooLarge(Decimal),

    #[error("Could not start background saver: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Largest amount a single line item may hold (10^15).
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

pub(crate) type Result<T> = std::result::Result<T, ServiceError>;

pub(crate) struct BudgetService {
    active: Option<MonthKey>,
    cache: BudgetDatabase,
    store: SharedStore,
    store_label: &'static str,
    ids: IdGenerator,
    persister: Persister,
    notifications: Option<Receiver<PersistOutcome>>,
}

impl BudgetService {
    pub(crate) fn new(store: Box<dyn BudgetStore>) -> Result<Self> {
        let store_label = store.label();
        let store: SharedStore = Arc::new(Mutex::new(store));
        let (outcomes, notifications) = mpsc::channel();
        let persister = Persister::spawn(Arc::clone(&store), outcomes)?;
        Ok(Self {
            active: None,
            cache: BudgetDatabase::new(),
            store,
            store_label,
            ids: IdGenerator::new(),
            persister,
            notifications: Some(notifications),
        })
    }

    pub(crate) fn store_label(&self) -> &'static str {
        self.store_label
    }

    pub(crate) fn active_month(&self) -> Option<MonthKey> {
        self.active
    }

    /// Make `key` the active month, loading it on first visit.
    ///
    /// A month with no stored record gets the default record, which is
    /// saved straight away. A failed load leaves the active month as it was.
    pub(crate) fn select_month(&mut self, key: MonthKey) -> Result<()> {
        if !self.cache.contains_key(&key) {
            let fetched = persister::lock(&self.store).fetch(&key);
            match fetched {
                Ok(Some(record)) => {
                    debug!(month = %key, "Loaded month");
                    self.cache.insert(key, record);
                }
                Ok(None) => {
                    info!(month = %key, "New month, creating default record");
                    let record = MonthRecord::default();
                    self.persister.schedule(key, record.clone());
                    self.cache.insert(key, record);
                }
                Err(source) => {
                    warn!(month = %key, error = %source, "Load failed");
                    return Err(ServiceError::Store { month: key, source });
                }
            }
        }
        self.active = Some(key);
        Ok(())
    }

    pub(crate) fn current(&self) -> Result<&MonthRecord> {
        self.active
            .and_then(|key| self.cache.get(&key))
            .ok_or(ServiceError::NoActiveMonth)
    }

    /// Apply `f` to the active month, then queue a save of the result.
    pub(crate) fn mutate<R>(&mut self, f: impl FnOnce(&mut MonthRecord) -> R) -> Result<R> {
        let key = self.active.ok_or(ServiceError::NoActiveMonth)?;
        let record = self
            .cache
            .get_mut(&key)
            .ok_or(ServiceError::NoActiveMonth)?;
        let out = f(record);
        self.persister.schedule(key, record.clone());
        Ok(out)
    }

    /// Hand the persist-outcome stream to a single subscriber.
    pub(crate) fn subscribe(&mut self) -> Option<Receiver<PersistOutcome>> {
        self.notifications.take()
    }

    /// Collect outcomes that have arrived so far, without waiting.
    pub(crate) fn drain_notifications(&self) -> Vec<PersistOutcome> {
        self.notifications
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default()
    }

    /// Wait for every queued save to finish.
    pub(crate) fn flush(&self) {
        self.persister.flush();
    }

    // ── Income ────────────────────────────────────────────────

    pub(crate) fn add_income(
        &mut self,
        kind: IncomeKind,
        name: &str,
        amount: Decimal,
    ) -> Result<ItemId> {
        let name = clean_name(name)?;
        check_amount(amount)?;
        let id = self.ids.next();
        self.mutate(|r| {
            r.income
                .list_mut(kind)
                .push(IncomeItem::new(id, name, amount))
        })?;
        Ok(id)
    }

    /// Returns false when no item has `id`.
    pub(crate) fn edit_income(
        &mut self,
        kind: IncomeKind,
        id: ItemId,
        name: &str,
        amount: Decimal,
    ) -> Result<bool> {
        let name = clean_name(name)?;
        check_amount(amount)?;
        self.mutate(|r| {
            match r.income.list_mut(kind).iter_mut().find(|i| i.id == id) {
                Some(item) => {
                    item.name = name;
                    item.amount = amount;
                    true
                }
                None => false,
            }
        })
    }

    pub(crate) fn delete_income(&mut self, kind: IncomeKind, id: ItemId) -> Result<bool> {
        self.mutate(|r| {
            let list = r.income.list_mut(kind);
            let before = list.len();
            list.retain(|i| i.id != id);
            list.len() != before
        })
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Returns `None` when the category does not exist.
    pub(crate) fn add_expense_item(
        &mut self,
        category_id: &str,
        name: &str,
        projected: Decimal,
    ) -> Result<Option<ItemId>> {
        let name = clean_name(name)?;
        check_amount(projected)?;
        let id = self.ids.next();
        self.mutate(|r| {
            r.category_mut(category_id).map(|cat| {
                cat.items.push(ExpenseItem::new(id, name, projected));
                id
            })
        })
    }

    /// `actual: None` keeps the recorded spend.
    pub(crate) fn edit_expense_item(
        &mut self,
        category_id: &str,
        id: ItemId,
        name: &str,
        projected: Decimal,
        actual: Option<Decimal>,
    ) -> Result<bool> {
        let name = clean_name(name)?;
        check_amount(projected)?;
        if let Some(actual) = actual {
            check_amount(actual)?;
        }
        self.mutate(|r| {
            let Some(item) = r
                .category_mut(category_id)
                .and_then(|cat| cat.find_item_mut(id))
            else {
                return false;
            };
            item.name = name;
            item.projected = projected;
            if let Some(actual) = actual {
                item.actual = actual;
            }
            true
        })
    }

    pub(crate) fn delete_expense_item(&mut self, category_id: &str, id: ItemId) -> Result<bool> {
        self.mutate(|r| {
            r.category_mut(category_id).is_some_and(|cat| {
                let before = cat.items.len();
                cat.items.retain(|i| i.id != id);
                cat.items.len() != before
            })
        })
    }

    /// Returns the new category's id.
    pub(crate) fn add_category(&mut self, name: &str) -> Result<String> {
        let name = clean_name(name)?;
        let id = format!("cat_{}", self.ids.next());
        let cat = ExpenseCategory::new(id.clone(), name);
        self.mutate(|r| r.expenses.push(cat))?;
        Ok(id)
    }
}

fn clean_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ServiceError::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ServiceError::AmountTooLarge(amount));
    }
    Ok(())
}
