//! Account repository for customer account database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    accounts, loans,
    sea_orm_active_enums::{AccountStatus, AccountType},
    transactions, transfers, withdrawal_requests,
};

/// Length of a generated account number.
pub const ACCOUNT_NUMBER_LEN: usize = 12;

/// Attempts made at allocating a unique account number before giving up.
const NUMBER_ALLOCATION_ATTEMPTS: u32 = 5;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Could not allocate a unique account number.
    #[error("Could not allocate a unique account number after {0} attempts")]
    NumberAllocation(u32),

    /// Cannot delete an account that still holds funds.
    #[error("Cannot delete account: balance is {0}")]
    HasBalance(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owner (customer) ID.
    pub owner_id: Uuid,
    /// Account type.
    pub account_type: AccountType,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a new account with a zero balance and a freshly allocated number.
    ///
    /// # Errors
    ///
    /// Returns `NumberAllocation` if every generated number collided with an
    /// existing one, or a database error if the insert fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let number = self.allocate_number().await?;

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(input.owner_id),
            number: Set(number),
            account_type: Set(input.account_type),
            balance: Set(Decimal::ZERO),
            status: Set(AccountStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find_by_id(id).one(&self.db).await?;
        Ok(account)
    }

    /// Finds an account by its human-facing number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account_by_number(
        &self,
        number: &str,
    ) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Number.eq(number))
            .one(&self.db)
            .await?;
        Ok(account)
    }

    /// Lists accounts belonging to an owner, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .order_by_asc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Changes the lifecycle status of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the update fails.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an account together with its dependent records.
    ///
    /// Only allowed when the balance is exactly zero. Dependent loans,
    /// transfers, withdrawal requests, and the transaction history are
    /// removed in the same database transaction as the account row;
    /// transactions on other accounts that referenced this one as a
    /// counterpart keep their rows with the reference cleared.
    ///
    /// # Errors
    ///
    /// Returns `HasBalance` when funds remain.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AccountError> {
        let txn = self.db.begin().await?;

        // The balance check must see the row as it will be deleted, so the
        // lock is taken before reading it.
        let Some(account) = accounts::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Err(AccountError::AccountNotFound(id));
        };

        if account.balance != Decimal::ZERO {
            txn.rollback().await?;
            return Err(AccountError::HasBalance(account.balance));
        }

        loans::Entity::delete_many()
            .filter(loans::Column::AccountId.eq(id))
            .exec(&txn)
            .await?;

        transfers::Entity::delete_many()
            .filter(
                transfers::Column::FromAccountId
                    .eq(id)
                    .or(transfers::Column::ToAccountId.eq(id)),
            )
            .exec(&txn)
            .await?;

        withdrawal_requests::Entity::delete_many()
            .filter(withdrawal_requests::Column::AccountId.eq(id))
            .exec(&txn)
            .await?;

        transactions::Entity::delete_many()
            .filter(transactions::Column::AccountId.eq(id))
            .exec(&txn)
            .await?;

        accounts::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Allocates an account number not already in use.
    async fn allocate_number(&self) -> Result<String, AccountError> {
        for _ in 0..NUMBER_ALLOCATION_ATTEMPTS {
            let candidate = generate_account_number();
            let taken = accounts::Entity::find()
                .filter(accounts::Column::Number.eq(&candidate))
                .count(&self.db)
                .await?;
            if taken == 0 {
                return Ok(candidate);
            }
        }
        Err(AccountError::NumberAllocation(NUMBER_ALLOCATION_ATTEMPTS))
    }
}

/// Generates a random 12-digit account number.
#[must_use]
pub fn generate_account_number() -> String {
    let mut digits = String::with_capacity(ACCOUNT_NUMBER_LEN);
    for _ in 0..ACCOUNT_NUMBER_LEN {
        let d: u32 = rand::random_range(0..10);
        digits.push(char::from_digit(d, 10).unwrap_or('0'));
    }
    digits
}

/// Checks whether a string is a well-formed account number.
#[must_use]
pub fn is_valid_account_number(number: &str) -> bool {
    number.len() == ACCOUNT_NUMBER_LEN && number.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generated_numbers_are_valid() {
        for _ in 0..100 {
            let number = generate_account_number();
            assert!(is_valid_account_number(&number), "bad number: {number}");
        }
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(!is_valid_account_number(""));
        assert!(!is_valid_account_number("12345"));
        assert!(!is_valid_account_number("1234567890123"));
        assert!(!is_valid_account_number("12345678901a"));
        assert!(!is_valid_account_number("12345678 901"));
    }

    proptest! {
        #[test]
        fn prop_twelve_digit_strings_accepted(number in "[0-9]{12}") {
            prop_assert!(is_valid_account_number(&number));
        }

        #[test]
        fn prop_wrong_length_rejected(number in "[0-9]{0,11}|[0-9]{13,20}") {
            prop_assert!(!is_valid_account_number(&number));
        }
    }
}
