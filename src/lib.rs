//! commitlog - an append-only, length-prefixed record store
//!
//! The store is the lowest layer of a commit log: records go in through
//! `Store::append`, which returns a byte position, and come back out
//! through `Store::read` at that position.

pub mod cli;
pub mod observability;
pub mod store;
