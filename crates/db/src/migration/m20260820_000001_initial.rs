//! Initial database migration.
//!
//! Creates the enums, ledger tables, indexes, and constraints.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTS & TRANSACTION LOG
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 3: WORKFLOWS
        // ============================================================
        db.execute_unprepared(TRANSFERS_SQL).await?;
        db.execute_unprepared(WITHDRAWAL_REQUESTS_SQL).await?;
        db.execute_unprepared(LOANS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account product type
CREATE TYPE account_type AS ENUM ('savings', 'current');

-- Account lifecycle status
CREATE TYPE account_status AS ENUM ('active', 'inactive', 'frozen');

-- Kind of a balance-changing event
CREATE TYPE transaction_kind AS ENUM (
    'deposit',
    'withdrawal',
    'transfer_in',
    'transfer_out',
    'loan'
);

-- Two-step transfer status
CREATE TYPE transfer_status AS ENUM ('pending', 'completed', 'failed');

-- Review status for admin-resolved requests
CREATE TYPE review_status AS ENUM ('pending', 'approved', 'rejected');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    number VARCHAR(32) NOT NULL UNIQUE,
    account_type account_type NOT NULL,
    balance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    status account_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- The ledger never leaves a negative balance behind
    CONSTRAINT accounts_balance_non_negative CHECK (balance >= 0)
);

CREATE INDEX idx_accounts_owner ON accounts (owner_id);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts (id),
    kind transaction_kind NOT NULL,
    amount NUMERIC(19, 2) NOT NULL,
    balance_after NUMERIC(19, 2) NOT NULL,
    counterpart_account_id UUID REFERENCES accounts (id) ON DELETE SET NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT transactions_amount_positive CHECK (amount > 0),
    CONSTRAINT transactions_balance_after_non_negative CHECK (balance_after >= 0)
);

CREATE INDEX idx_transactions_account_created
    ON transactions (account_id, created_at DESC);
";

const TRANSFERS_SQL: &str = r"
CREATE TABLE transfers (
    id UUID PRIMARY KEY,
    from_account_id UUID NOT NULL REFERENCES accounts (id),
    to_account_id UUID NOT NULL REFERENCES accounts (id),
    amount NUMERIC(19, 2) NOT NULL,
    otp_code VARCHAR(8) NOT NULL,
    otp_expires_at TIMESTAMPTZ NOT NULL,
    status transfer_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    processed_at TIMESTAMPTZ,

    CONSTRAINT transfers_amount_positive CHECK (amount > 0),
    CONSTRAINT transfers_distinct_accounts CHECK (from_account_id <> to_account_id)
);

CREATE INDEX idx_transfers_status_expiry ON transfers (status, otp_expires_at);
";

const WITHDRAWAL_REQUESTS_SQL: &str = r"
CREATE TABLE withdrawal_requests (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts (id),
    admin_id UUID NOT NULL,
    amount NUMERIC(19, 2) NOT NULL,
    description TEXT,
    status review_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    processed_at TIMESTAMPTZ,

    CONSTRAINT withdrawal_requests_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_withdrawal_requests_account ON withdrawal_requests (account_id);
CREATE INDEX idx_withdrawal_requests_admin_status ON withdrawal_requests (admin_id, status);
";

const LOANS_SQL: &str = r"
CREATE TABLE loans (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    account_id UUID NOT NULL REFERENCES accounts (id),
    amount NUMERIC(19, 2) NOT NULL,
    interest_rate NUMERIC(7, 4) NOT NULL,
    term_months INTEGER NOT NULL,
    monthly_payment NUMERIC(19, 2),
    status review_status NOT NULL DEFAULT 'pending',
    remarks TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    processed_at TIMESTAMPTZ,

    CONSTRAINT loans_amount_positive CHECK (amount > 0),
    CONSTRAINT loans_rate_non_negative CHECK (interest_rate >= 0),
    CONSTRAINT loans_term_positive CHECK (term_months > 0)
);

CREATE INDEX idx_loans_user_status ON loans (user_id, status);
CREATE INDEX idx_loans_account ON loans (account_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS loans;
DROP TABLE IF EXISTS withdrawal_requests;
DROP TABLE IF EXISTS transfers;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS accounts;

DROP TYPE IF EXISTS review_status;
DROP TYPE IF EXISTS transfer_status;
DROP TYPE IF EXISTS transaction_kind;
DROP TYPE IF EXISTS account_status;
DROP TYPE IF EXISTS account_type;
";
