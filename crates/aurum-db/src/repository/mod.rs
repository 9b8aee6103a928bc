//! # Repository Module
//!
//! One repository per relation, each holding a cheap pool clone.
//!
//! - [`customer`] - customer records, upsert-by-email semantics
//! - [`ledger`] - the append-only points ledger and the redemption gate
//! - [`reward`] - the static reward catalog

pub mod customer;
pub mod ledger;
pub mod reward;
