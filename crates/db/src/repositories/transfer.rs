//! Transfer repository for OTP-gated two-step transfers.
//!
//! A transfer lives through two calls: `initiate` records a pending row and
//! issues a one-time code, `confirm` verifies the code and moves the money.
//! Both ledger legs and the status flip to completed commit as one database
//! transaction; verification failures leave the row pending so the customer
//! can retry until the code expires.

use chrono::{TimeDelta, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ferrum_core::ledger::{next_balance, LedgerError, TransactionKind};
use ferrum_core::transfer::{verify_otp, TransferError, DEFAULT_OTP_TTL_SECS, OTP_DIGITS};

use crate::entities::{
    accounts,
    sea_orm_active_enums::{AccountStatus, TransferStatus},
    transfers,
};
use crate::repositories::ledger::{apply_delta_in, LedgerStoreError};

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferStoreError {
    /// Transfer not found.
    #[error("Transfer not found: {0}")]
    TransferNotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Destination account number did not resolve.
    #[error("No account with number '{0}'")]
    UnknownAccountNumber(String),

    /// Account does not belong to the requesting customer.
    #[error("Account {0} does not belong to the requesting customer")]
    NotAccountOwner(Uuid),

    /// A core transfer rule rejected the operation.
    #[error(transparent)]
    Rule(#[from] TransferError),

    /// A core ledger rule rejected the operation.
    #[error(transparent)]
    LedgerRule(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerStoreError> for TransferStoreError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::AccountNotFound(id) => Self::AccountNotFound(id),
            LedgerStoreError::Rule(rule) => Self::LedgerRule(rule),
            LedgerStoreError::Database(db) => Self::Database(db),
        }
    }
}

/// Input for initiating a transfer.
#[derive(Debug, Clone)]
pub struct InitiateTransferInput {
    /// Customer initiating the transfer; must own the source account.
    pub owner_id: Uuid,
    /// Source account ID.
    pub from_account_id: Uuid,
    /// Destination account number.
    pub to_account_number: String,
    /// Amount to move.
    pub amount: Decimal,
}

/// Transfer repository driving the two-step OTP workflow.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
    otp_ttl: TimeDelta,
}

impl TransferRepository {
    /// Creates a new transfer repository with the default OTP lifetime.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            otp_ttl: TimeDelta::seconds(DEFAULT_OTP_TTL_SECS),
        }
    }

    /// Overrides the OTP lifetime.
    #[must_use]
    pub const fn with_otp_ttl(mut self, ttl: TimeDelta) -> Self {
        self.otp_ttl = ttl;
        self
    }

    /// Records a pending transfer and issues its one-time code.
    ///
    /// Validates up front that both accounts exist and are active, the
    /// customer owns the source account, and the source balance covers the
    /// amount. No funds move yet.
    ///
    /// # Errors
    ///
    /// Returns `SameAccount` when source and destination match, ownership and
    /// existence errors for bad account references, and the core ledger
    /// errors for non-positive amounts or insufficient funds.
    pub async fn initiate(
        &self,
        input: InitiateTransferInput,
    ) -> Result<transfers::Model, TransferStoreError> {
        let source = accounts::Entity::find_by_id(input.from_account_id)
            .one(&self.db)
            .await?
            .ok_or(TransferStoreError::AccountNotFound(input.from_account_id))?;

        if source.owner_id != input.owner_id {
            return Err(TransferStoreError::NotAccountOwner(input.from_account_id));
        }

        if source.status != AccountStatus::Active {
            return Err(LedgerError::AccountInactive(source.id).into());
        }

        let destination = accounts::Entity::find()
            .filter(accounts::Column::Number.eq(&input.to_account_number))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                TransferStoreError::UnknownAccountNumber(input.to_account_number.clone())
            })?;

        if destination.id == source.id {
            return Err(TransferError::SameAccount.into());
        }

        if destination.status != AccountStatus::Active {
            return Err(LedgerError::AccountInactive(destination.id).into());
        }

        // Early rejection only; the balance is re-checked under lock at
        // confirm time.
        next_balance(source.balance, TransactionKind::TransferOut, input.amount)?;

        let now = Utc::now();
        let transfer = transfers::ActiveModel {
            id: Set(Uuid::new_v4()),
            from_account_id: Set(input.from_account_id),
            to_account_id: Set(destination.id),
            amount: Set(input.amount),
            otp_code: Set(generate_otp()),
            otp_expires_at: Set((now + self.otp_ttl).into()),
            status: Set(TransferStatus::Pending),
            created_at: Set(now.into()),
            processed_at: Set(None),
        };

        let transfer = transfer.insert(&self.db).await?;
        Ok(transfer)
    }

    /// Verifies the one-time code and executes both ledger legs.
    ///
    /// The debit, the credit, and the flip to completed commit together.
    /// A wrong or expired code leaves the row pending; insufficient funds or
    /// an inactive destination mark the transfer failed, with no money moved
    /// in either case.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyProcessed` when the transfer is no longer pending,
    /// `InvalidOtp` / `OtpExpired` on verification failure, and the ledger
    /// errors when the funds movement is rejected.
    pub async fn confirm(
        &self,
        transfer_id: Uuid,
        submitted_otp: &str,
    ) -> Result<transfers::Model, TransferStoreError> {
        let txn = self.db.begin().await?;

        // Lock the transfer row first; a concurrent confirm waits here and
        // then sees the terminal status.
        let transfer = transfers::Entity::find_by_id(transfer_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(TransferStoreError::TransferNotFound(transfer_id))?;

        if transfer.status != TransferStatus::Pending {
            txn.rollback().await?;
            return Err(TransferError::AlreadyProcessed(transfer.status.into()).into());
        }

        if let Err(err) = verify_otp(
            &transfer.otp_code,
            transfer.otp_expires_at.with_timezone(&Utc),
            submitted_otp,
            Utc::now(),
        ) {
            txn.rollback().await?;
            return Err(err.into());
        }

        // Lock both account rows in ascending id order so two confirms
        // touching the same pair cannot deadlock.
        let (first, second) = if transfer.from_account_id < transfer.to_account_id {
            (transfer.from_account_id, transfer.to_account_id)
        } else {
            (transfer.to_account_id, transfer.from_account_id)
        };
        for id in [first, second] {
            accounts::Entity::find_by_id(id)
                .lock_exclusive()
                .one(&txn)
                .await?
                .ok_or(TransferStoreError::AccountNotFound(id))?;
        }

        let debit = apply_delta_in(
            &txn,
            transfer.from_account_id,
            TransactionKind::TransferOut,
            transfer.amount,
            Some(format!("Transfer {transfer_id} out")),
            Some(transfer.to_account_id),
        )
        .await;

        if let Err(err) = debit {
            txn.rollback().await?;
            // Rule violations are terminal; a transient database failure
            // leaves the row pending so the customer can retry.
            if !matches!(err, LedgerStoreError::Database(_)) {
                self.mark_failed(transfer_id).await?;
            }
            return Err(err.into());
        }

        let credit = apply_delta_in(
            &txn,
            transfer.to_account_id,
            TransactionKind::TransferIn,
            transfer.amount,
            Some(format!("Transfer {transfer_id} in")),
            Some(transfer.from_account_id),
        )
        .await;

        if let Err(err) = credit {
            txn.rollback().await?;
            if !matches!(err, LedgerStoreError::Database(_)) {
                self.mark_failed(transfer_id).await?;
            }
            return Err(err.into());
        }

        let mut active: transfers::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::Completed);
        active.processed_at = Set(Some(Utc::now().into()));
        let completed = active.update(&txn).await?;

        txn.commit().await?;
        Ok(completed)
    }

    /// Finds a transfer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_transfer_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<transfers::Model>, TransferStoreError> {
        let transfer = transfers::Entity::find_by_id(id).one(&self.db).await?;
        Ok(transfer)
    }

    /// Lists transfers touching an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transfers_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<transfers::Model>, TransferStoreError> {
        let rows = transfers::Entity::find()
            .filter(
                transfers::Column::FromAccountId
                    .eq(account_id)
                    .or(transfers::Column::ToAccountId.eq(account_id)),
            )
            .order_by_desc(transfers::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Flips pending transfers whose codes have expired to failed.
    ///
    /// Returns the number of transfers swept.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn sweep_expired(&self) -> Result<u64, TransferStoreError> {
        let now = Utc::now();

        let result = transfers::Entity::update_many()
            .col_expr(
                transfers::Column::Status,
                TransferStatus::Failed.as_enum(),
            )
            .col_expr(
                transfers::Column::ProcessedAt,
                sea_orm::sea_query::Expr::value(Some(now)),
            )
            .filter(transfers::Column::Status.eq(TransferStatus::Pending))
            .filter(transfers::Column::OtpExpiresAt.lte(now))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks a pending transfer failed.
    async fn mark_failed(&self, transfer_id: Uuid) -> Result<(), TransferStoreError> {
        transfers::Entity::update_many()
            .col_expr(
                transfers::Column::Status,
                TransferStatus::Failed.as_enum(),
            )
            .col_expr(
                transfers::Column::ProcessedAt,
                sea_orm::sea_query::Expr::value(Some(Utc::now())),
            )
            .filter(transfers::Column::Id.eq(transfer_id))
            .filter(transfers::Column::Status.eq(TransferStatus::Pending))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

/// Generates a random zero-padded OTP of [`OTP_DIGITS`] digits.
#[must_use]
pub fn generate_otp() -> String {
    let code: u32 = rand::random_range(0..1_000_000);
    format!("{code:0width$}", width = OTP_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_otps_have_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_DIGITS);
            assert!(otp.bytes().all(|b| b.is_ascii_digit()), "bad otp: {otp}");
        }
    }
}
