//! Validated construction of currency audit entries.
//!
//! Provides an [`EntryBuilder`] that enforces the audit invariants: every
//! entry names an account, a currency, a direction, a strictly positive
//! amount, and a non-empty reason. The engine appends one entry per balance
//! mutation inside the same transaction as the mutation itself.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use warren_types::{Currency, CurrencyEntry, CurrencyEntryId, EntryDirection, UserId};

use crate::error::LedgerError;

/// Builder for validated [`CurrencyEntry`] values.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use warren_ledger::EntryBuilder;
/// use warren_types::{Currency, EntryDirection, UserId};
///
/// let entry = EntryBuilder::new(UserId::new(), Currency::Gold, EntryDirection::Credit)
///     .amount(10)
///     .reason("HABIT_REWARD".to_owned())
///     .build(Utc::now());
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct EntryBuilder {
    user_id: UserId,
    currency: Currency,
    direction: EntryDirection,
    amount: Option<i64>,
    reason: Option<String>,
    reference_id: Option<Uuid>,
}

impl EntryBuilder {
    /// Start building an entry for the given account, currency, and
    /// direction.
    pub const fn new(user_id: UserId, currency: Currency, direction: EntryDirection) -> Self {
        Self {
            user_id,
            currency,
            direction,
            amount: None,
            reason: None,
            reference_id: None,
        }
    }

    /// Set the magnitude of the balance change.
    #[must_use]
    pub const fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the human-readable reason (e.g. "`SHOP_PURCHASE`").
    #[must_use]
    pub fn reason(mut self, reason: String) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Set an optional reference to the entity that caused the change.
    #[must_use]
    pub const fn reference_id(mut self, id: Uuid) -> Self {
        self.reference_id = Some(id);
        self
    }

    /// Validate inputs and produce a [`CurrencyEntry`] stamped at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if amount or reason is unset,
    /// [`LedgerError::NonPositiveAmount`] if the amount is not strictly
    /// positive, or [`LedgerError::EmptyReason`] if the reason is blank.
    pub fn build(self, now: DateTime<Utc>) -> Result<CurrencyEntry, LedgerError> {
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        let reason = self.reason.ok_or(LedgerError::MissingField("reason"))?;

        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount { amount });
        }
        if reason.trim().is_empty() {
            return Err(LedgerError::EmptyReason);
        }

        Ok(CurrencyEntry {
            id: CurrencyEntryId::new(),
            user_id: self.user_id,
            currency: self.currency,
            direction: self.direction,
            amount,
            reason,
            reference_id: self.reference_id,
            created_at: now,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn builder() -> EntryBuilder {
        EntryBuilder::new(UserId::new(), Currency::Gold, EntryDirection::Debit)
    }

    #[test]
    fn builds_valid_entry() {
        let now = Utc::now();
        let entry = builder()
            .amount(150)
            .reason("GROUP_CREATION".to_owned())
            .build(now)
            .unwrap();
        assert_eq!(entry.amount, 150);
        assert_eq!(entry.direction, EntryDirection::Debit);
        assert_eq!(entry.created_at, now);
        assert!(entry.reference_id.is_none());
    }

    #[test]
    fn reference_id_is_carried() {
        let reference = Uuid::now_v7();
        let entry = builder()
            .amount(5)
            .reason("SHOP_PURCHASE".to_owned())
            .reference_id(reference)
            .build(Utc::now())
            .unwrap();
        assert_eq!(entry.reference_id, Some(reference));
    }

    #[test]
    fn missing_amount_rejected() {
        let result = builder().reason("X".to_owned()).build(Utc::now());
        assert!(matches!(result, Err(LedgerError::MissingField("amount"))));
    }

    #[test]
    fn missing_reason_rejected() {
        let result = builder().amount(1).build(Utc::now());
        assert!(matches!(result, Err(LedgerError::MissingField("reason"))));
    }

    #[test]
    fn zero_amount_rejected() {
        let result = builder().amount(0).reason("X".to_owned()).build(Utc::now());
        assert!(matches!(result, Err(LedgerError::NonPositiveAmount { amount: 0 })));
    }

    #[test]
    fn negative_amount_rejected() {
        let result = builder().amount(-5).reason("X".to_owned()).build(Utc::now());
        assert!(matches!(result, Err(LedgerError::NonPositiveAmount { amount: -5 })));
    }

    #[test]
    fn blank_reason_rejected() {
        let result = builder().amount(5).reason("   ".to_owned()).build(Utc::now());
        assert!(matches!(result, Err(LedgerError::EmptyReason)));
    }
}
