//! Withdrawal request repository for the admin-reviewed withdrawal workflow.
//!
//! A request reserves nothing: funds stay available until the assigned admin
//! approves it, at which point the balance is re-validated under lock and the
//! debit commits in the same unit as the status flip. A failed approval
//! leaves the request pending for the admin to retry or reject.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ferrum_core::ledger::{next_balance, LedgerError, TransactionKind};
use ferrum_core::review::ReviewStatus as CoreReviewStatus;
use ferrum_core::withdrawal::{ensure_assigned_admin, ensure_pending, Decision, WithdrawalError};

use crate::entities::{
    accounts,
    sea_orm_active_enums::{AccountStatus, ReviewStatus},
    withdrawal_requests,
};
use crate::repositories::ledger::{apply_delta_in, LedgerStoreError};

/// Error types for withdrawal request operations.
#[derive(Debug, thiserror::Error)]
pub enum WithdrawalStoreError {
    /// Withdrawal request not found.
    #[error("Withdrawal request not found: {0}")]
    RequestNotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account does not belong to the requesting customer.
    #[error("Account {0} does not belong to the requesting customer")]
    NotAccountOwner(Uuid),

    /// A core withdrawal rule rejected the operation.
    #[error(transparent)]
    Rule(#[from] WithdrawalError),

    /// A core ledger rule rejected the operation.
    #[error(transparent)]
    LedgerRule(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerStoreError> for WithdrawalStoreError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::AccountNotFound(id) => Self::AccountNotFound(id),
            LedgerStoreError::Rule(rule) => Self::LedgerRule(rule),
            LedgerStoreError::Database(db) => Self::Database(db),
        }
    }
}

/// Input for creating a withdrawal request.
#[derive(Debug, Clone)]
pub struct CreateWithdrawalInput {
    /// Customer submitting the request; must own the account.
    pub owner_id: Uuid,
    /// Account to withdraw from.
    pub account_id: Uuid,
    /// Admin assigned to review the request.
    pub admin_id: Uuid,
    /// Amount to withdraw.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Withdrawal request repository.
#[derive(Debug, Clone)]
pub struct WithdrawalRepository {
    db: DatabaseConnection,
}

impl WithdrawalRepository {
    /// Creates a new withdrawal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a pending withdrawal request.
    ///
    /// The amount is checked against the current balance so obviously bad
    /// requests are rejected early, but nothing is reserved; the decisive
    /// check happens under lock at approval time.
    ///
    /// # Errors
    ///
    /// Returns ownership and existence errors for bad account references,
    /// and the core ledger errors for non-positive or oversized amounts.
    pub async fn create_request(
        &self,
        input: CreateWithdrawalInput,
    ) -> Result<withdrawal_requests::Model, WithdrawalStoreError> {
        let account = accounts::Entity::find_by_id(input.account_id)
            .one(&self.db)
            .await?
            .ok_or(WithdrawalStoreError::AccountNotFound(input.account_id))?;

        if account.owner_id != input.owner_id {
            return Err(WithdrawalStoreError::NotAccountOwner(input.account_id));
        }

        if account.status != AccountStatus::Active {
            return Err(LedgerError::AccountInactive(account.id).into());
        }

        next_balance(account.balance, TransactionKind::Withdrawal, input.amount)?;

        let request = withdrawal_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(input.account_id),
            admin_id: Set(input.admin_id),
            amount: Set(input.amount),
            description: Set(input.description),
            status: Set(ReviewStatus::Pending),
            created_at: Set(Utc::now().into()),
            processed_at: Set(None),
        };

        let request = request.insert(&self.db).await?;
        Ok(request)
    }

    /// Resolves a pending request with the assigned admin's decision.
    ///
    /// Approval debits the account and flips the status in one atomic unit;
    /// when the debit is rejected (insufficient funds at approval time, or
    /// the account went inactive) the request stays pending and the error
    /// is returned. Rejection flips the status without touching funds.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyProcessed` for a terminal request, `UnauthorizedAdmin`
    /// when a different admin than the assigned one decides, and the ledger
    /// errors when an approval debit fails.
    pub async fn resolve_request(
        &self,
        request_id: Uuid,
        admin_id: Uuid,
        decision: Decision,
    ) -> Result<withdrawal_requests::Model, WithdrawalStoreError> {
        let txn = self.db.begin().await?;

        // Lock the request row so concurrent resolutions serialize; the
        // second one then sees the terminal status.
        let request = withdrawal_requests::Entity::find_by_id(request_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(WithdrawalStoreError::RequestNotFound(request_id))?;

        let gate = ensure_pending(request.status.into())
            .and_then(|()| ensure_assigned_admin(request.admin_id, admin_id));
        if let Err(err) = gate {
            txn.rollback().await?;
            return Err(err.into());
        }

        let resolved = match decision {
            Decision::Approve => Self::approve(&txn, request).await,
            Decision::Reject => Self::finish(&txn, request, CoreReviewStatus::Rejected).await,
        };

        match resolved {
            Ok(model) => {
                txn.commit().await?;
                Ok(model)
            }
            Err(err) => {
                // The request stays pending; the admin can retry or reject.
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Finds a withdrawal request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_request_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<withdrawal_requests::Model>, WithdrawalStoreError> {
        let request = withdrawal_requests::Entity::find_by_id(id).one(&self.db).await?;
        Ok(request)
    }

    /// Lists requests assigned to an admin, optionally narrowed to a status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_requests_for_admin(
        &self,
        admin_id: Uuid,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<withdrawal_requests::Model>, WithdrawalStoreError> {
        let mut query = withdrawal_requests::Entity::find()
            .filter(withdrawal_requests::Column::AdminId.eq(admin_id));

        if let Some(status) = status {
            query = query.filter(withdrawal_requests::Column::Status.eq(status));
        }

        let rows = query
            .order_by_asc(withdrawal_requests::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Lists requests raised against an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_requests_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<withdrawal_requests::Model>, WithdrawalStoreError> {
        let rows = withdrawal_requests::Entity::find()
            .filter(withdrawal_requests::Column::AccountId.eq(account_id))
            .order_by_desc(withdrawal_requests::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Debits the account and marks the request approved in the caller's
    /// transaction.
    async fn approve(
        txn: &DatabaseTransaction,
        request: withdrawal_requests::Model,
    ) -> Result<withdrawal_requests::Model, WithdrawalStoreError> {
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| format!("Withdrawal request {}", request.id));

        apply_delta_in(
            txn,
            request.account_id,
            TransactionKind::Withdrawal,
            request.amount,
            Some(description),
            None,
        )
        .await?;

        let mut active: withdrawal_requests::ActiveModel = request.into();
        active.status = Set(ReviewStatus::Approved);
        active.processed_at = Set(Some(Utc::now().into()));
        let approved = active.update(txn).await?;
        Ok(approved)
    }

    /// Flips the request to a terminal status without moving funds.
    async fn finish(
        txn: &DatabaseTransaction,
        request: withdrawal_requests::Model,
        status: CoreReviewStatus,
    ) -> Result<withdrawal_requests::Model, WithdrawalStoreError> {
        let mut active: withdrawal_requests::ActiveModel = request.into();
        active.status = Set(status.into());
        active.processed_at = Set(Some(Utc::now().into()));

        let updated = active.update(txn).await?;
        Ok(updated)
    }
}
