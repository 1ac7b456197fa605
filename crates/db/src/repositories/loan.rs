//! Loan repository for application, review, and disbursement.
//!
//! An application is validated (including the amortization math) and stored
//! pending. Approval computes the fixed monthly payment, credits the
//! principal to the linked account, and flips the status in one atomic unit;
//! rejection records the reviewer's remarks without moving funds.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ferrum_core::ledger::{LedgerError, TransactionKind};
use ferrum_core::loan::{ensure_loan_capacity, monthly_payment, LoanError};
use ferrum_core::review::ReviewStatus as CoreReviewStatus;

use crate::entities::{
    accounts, loans,
    sea_orm_active_enums::{AccountStatus, ReviewStatus},
};
use crate::repositories::ledger::{apply_delta_in, LedgerStoreError};

/// Error types for loan operations.
#[derive(Debug, thiserror::Error)]
pub enum LoanStoreError {
    /// Loan not found.
    #[error("Loan not found: {0}")]
    LoanNotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account does not belong to the applicant.
    #[error("Account {0} does not belong to the applicant")]
    NotAccountOwner(Uuid),

    /// A core loan rule rejected the operation.
    #[error(transparent)]
    Rule(#[from] LoanError),

    /// A core ledger rule rejected the operation.
    #[error(transparent)]
    LedgerRule(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerStoreError> for LoanStoreError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::AccountNotFound(id) => Self::AccountNotFound(id),
            LedgerStoreError::Rule(rule) => Self::LedgerRule(rule),
            LedgerStoreError::Database(db) => Self::Database(db),
        }
    }
}

/// Input for a loan application.
#[derive(Debug, Clone)]
pub struct CreateLoanInput {
    /// Applicant ID; must own the disbursement account.
    pub user_id: Uuid,
    /// Account the principal is disbursed into on approval.
    pub account_id: Uuid,
    /// Principal amount.
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Repayment term in months.
    pub term_months: u32,
}

/// Loan repository.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    db: DatabaseConnection,
}

impl LoanRepository {
    /// Creates a new loan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a pending loan application.
    ///
    /// Validates the terms through the amortization math up front so only
    /// computable applications reach the review queue, and enforces the cap
    /// on open applications per user.
    ///
    /// # Errors
    ///
    /// Returns the core loan errors for bad terms or a full application
    /// quota, plus ownership and existence errors for the account.
    pub async fn apply(&self, input: CreateLoanInput) -> Result<loans::Model, LoanStoreError> {
        // Reject terms the amortization formula cannot handle.
        monthly_payment(input.amount, input.interest_rate, input.term_months)?;

        let term_months = i32::try_from(input.term_months)
            .map_err(|_| LoanError::InvalidTerm(input.term_months))?;

        let account = accounts::Entity::find_by_id(input.account_id)
            .one(&self.db)
            .await?
            .ok_or(LoanStoreError::AccountNotFound(input.account_id))?;

        if account.owner_id != input.user_id {
            return Err(LoanStoreError::NotAccountOwner(input.account_id));
        }

        if account.status != AccountStatus::Active {
            return Err(LedgerError::AccountInactive(account.id).into());
        }

        let open_loans = loans::Entity::find()
            .filter(loans::Column::UserId.eq(input.user_id))
            .filter(
                loans::Column::Status
                    .eq(ReviewStatus::Pending)
                    .or(loans::Column::Status.eq(ReviewStatus::Approved)),
            )
            .count(&self.db)
            .await?;
        ensure_loan_capacity(open_loans)?;

        let loan = loans::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            account_id: Set(input.account_id),
            amount: Set(input.amount),
            interest_rate: Set(input.interest_rate),
            term_months: Set(term_months),
            monthly_payment: Set(None),
            status: Set(ReviewStatus::Pending),
            remarks: Set(None),
            created_at: Set(Utc::now().into()),
            processed_at: Set(None),
        };

        let loan = loan.insert(&self.db).await?;
        Ok(loan)
    }

    /// Approves a pending loan and disburses the principal.
    ///
    /// Computes the fixed monthly payment, credits the principal to the
    /// linked account, and flips the status, all in one atomic unit. Any
    /// failure leaves the loan pending with no funds moved.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyProcessed` for a terminal loan, and the ledger errors
    /// when the disbursement credit is rejected.
    pub async fn approve_loan(
        &self,
        loan_id: Uuid,
        remarks: Option<String>,
    ) -> Result<loans::Model, LoanStoreError> {
        let txn = self.db.begin().await?;

        match Self::approve_in(&txn, loan_id, remarks).await {
            Ok(approved) => {
                txn.commit().await?;
                Ok(approved)
            }
            Err(err) => {
                // The loan stays pending; the admin can retry or reject.
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Runs the approval inside the caller's transaction.
    async fn approve_in(
        txn: &DatabaseTransaction,
        loan_id: Uuid,
        remarks: Option<String>,
    ) -> Result<loans::Model, LoanStoreError> {
        let loan = Self::find_pending(txn, loan_id).await?;

        let term = u32::try_from(loan.term_months)
            .map_err(|_| LoanError::InvalidTerm(0))?;
        let payment = monthly_payment(loan.amount, loan.interest_rate, term)?;

        apply_delta_in(
            txn,
            loan.account_id,
            TransactionKind::Loan,
            loan.amount,
            Some(format!("Loan {loan_id} disbursement")),
            None,
        )
        .await?;

        let mut active: loans::ActiveModel = loan.into();
        active.status = Set(ReviewStatus::Approved);
        active.monthly_payment = Set(Some(payment));
        active.remarks = Set(remarks);
        active.processed_at = Set(Some(Utc::now().into()));
        let approved = active.update(txn).await?;
        Ok(approved)
    }

    /// Rejects a pending loan with the reviewer's remarks.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyProcessed` for a terminal loan.
    pub async fn reject_loan(
        &self,
        loan_id: Uuid,
        remarks: Option<String>,
    ) -> Result<loans::Model, LoanStoreError> {
        let txn = self.db.begin().await?;

        let loan = match Self::find_pending(&txn, loan_id).await {
            Ok(loan) => loan,
            Err(err) => {
                txn.rollback().await?;
                return Err(err);
            }
        };

        let mut active: loans::ActiveModel = loan.into();
        active.status = Set(ReviewStatus::Rejected);
        active.remarks = Set(remarks);
        active.processed_at = Set(Some(Utc::now().into()));

        let rejected = active.update(&txn).await?;
        txn.commit().await?;
        Ok(rejected)
    }

    /// Finds a loan by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_loan_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<loans::Model>, LoanStoreError> {
        let loan = loans::Entity::find_by_id(id).one(&self.db).await?;
        Ok(loan)
    }

    /// Lists loans for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_loans_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<loans::Model>, LoanStoreError> {
        let rows = loans::Entity::find()
            .filter(loans::Column::UserId.eq(user_id))
            .order_by_desc(loans::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Lists loans awaiting review, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending_loans(&self) -> Result<Vec<loans::Model>, LoanStoreError> {
        let rows = loans::Entity::find()
            .filter(loans::Column::Status.eq(ReviewStatus::Pending))
            .order_by_asc(loans::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Locks a loan row in the caller's transaction and rejects terminal
    /// states. Concurrent resolutions serialize on the lock; the second one
    /// then sees the terminal status.
    async fn find_pending(
        txn: &DatabaseTransaction,
        loan_id: Uuid,
    ) -> Result<loans::Model, LoanStoreError> {
        let loan = loans::Entity::find_by_id(loan_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(LoanStoreError::LoanNotFound(loan_id))?;

        let status: CoreReviewStatus = loan.status.into();
        if status.is_terminal() {
            return Err(LoanError::AlreadyProcessed(status).into());
        }

        Ok(loan)
    }
}
