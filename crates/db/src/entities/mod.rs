//! `SeaORM` entity definitions for the ledger schema.

pub mod accounts;
pub mod loans;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod transfers;
pub mod withdrawal_requests;
