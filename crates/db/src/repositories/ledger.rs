//! Ledger engine: atomic balance mutation plus transaction-log append.
//!
//! Every balance change flows through `apply_delta`: read the balance under
//! an exclusive row lock, validate through the pure core rules, write the new
//! balance, and append the matching transaction row, all inside one database
//! transaction. Either both writes persist or neither does.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ferrum_core::ledger::{next_balance, LedgerError, TransactionKind};

use crate::entities::{accounts, sea_orm_active_enums::AccountStatus, transactions};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerStoreError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// A core ledger rule rejected the delta.
    #[error(transparent)]
    Rule(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by transaction kind.
    pub kind: Option<crate::entities::sea_orm_active_enums::TransactionKind>,
    /// Filter by creation time range start (inclusive).
    pub from: Option<DateTime<Utc>>,
    /// Filter by creation time range end (inclusive).
    pub to: Option<DateTime<Utc>>,
}

/// Ledger repository exposing the atomic balance+log mutator.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Credits an account with a deposit.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or inactive, the amount is
    /// not strictly positive, or the database operation fails.
    pub async fn deposit(
        &self,
        account_id: Uuid,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<transactions::Model, LedgerStoreError> {
        self.apply_delta(account_id, TransactionKind::Deposit, amount, description)
            .await
    }

    /// Debits an account with an immediate withdrawal.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` (via the core rule) when the debit would
    /// overdraw the account; the account and log are left untouched.
    pub async fn withdraw(
        &self,
        account_id: Uuid,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<transactions::Model, LedgerStoreError> {
        self.apply_delta(account_id, TransactionKind::Withdrawal, amount, description)
            .await
    }

    /// Applies a single balance delta as one atomic unit.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole unit: no partial balance update, no orphan
    /// transaction row.
    pub async fn apply_delta(
        &self,
        account_id: Uuid,
        kind: TransactionKind,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<transactions::Model, LedgerStoreError> {
        let txn = self.db.begin().await?;
        let row = apply_delta_in(&txn, account_id, kind, amount, description, None).await?;
        txn.commit().await?;
        Ok(row)
    }

    /// Reads the current balance of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the query fails.
    pub async fn get_balance(&self, account_id: Uuid) -> Result<Decimal, LedgerStoreError> {
        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerStoreError::AccountNotFound(account_id))?;

        Ok(account.balance)
    }

    /// Lists transactions for an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        account_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, LedgerStoreError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id));

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }

        if let Some(from) = filter.from {
            query = query.filter(transactions::Column::CreatedAt.gte(from));
        }

        if let Some(to) = filter.to {
            query = query.filter(transactions::Column::CreatedAt.lte(to));
        }

        let rows = query
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}

/// Applies a balance delta inside an already-open database transaction.
///
/// The workflows (transfer, withdrawal approval, loan disbursement) call this
/// so their status flips commit in the same unit as the ledger writes.
///
/// Locks the account row exclusively: concurrent deltas on the same account
/// serialize here, deltas on different accounts proceed independently.
///
/// # Errors
///
/// Returns an error if the account is missing or not active, the core rules
/// reject the delta, or a write fails. No partial state is left behind as
/// long as the caller aborts the transaction on error.
pub async fn apply_delta_in(
    txn: &DatabaseTransaction,
    account_id: Uuid,
    kind: TransactionKind,
    amount: Decimal,
    description: Option<String>,
    counterpart_account_id: Option<Uuid>,
) -> Result<transactions::Model, LedgerStoreError> {
    let account = accounts::Entity::find_by_id(account_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(LedgerStoreError::AccountNotFound(account_id))?;

    if account.status != AccountStatus::Active {
        return Err(LedgerError::AccountInactive(account_id).into());
    }

    let new_balance = next_balance(account.balance, kind, amount)?;

    let now = Utc::now();
    let mut active: accounts::ActiveModel = account.into();
    active.balance = Set(new_balance);
    active.updated_at = Set(now.into());
    active.update(txn).await?;

    let row = transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account_id),
        kind: Set(kind.into()),
        amount: Set(amount),
        balance_after: Set(new_balance),
        counterpart_account_id: Set(counterpart_account_id),
        description: Set(description),
        created_at: Set(now.into()),
    };

    let inserted = row.insert(txn).await?;
    Ok(inserted)
}
