//! Financial receipts. Only the advance-charge family is implemented here;
//! every receipt is a `financial_main` head plus `financial_sub` account rows.

pub mod advance_charge;
