//! # DynamoDB Module
//!
//! [`TableClient`](crate::store::TableClient) implementation backed by Amazon
//! DynamoDB.
//!
//! ## Components
//!
//! - `DynamoDb`: A client wrapper bound to one item table.
//! - `Table`: The table name and its `ItemId` partition key.
//!
//! ## Usage
//!
//! Credentials and region come from the standard AWS environment. Set
//! `AWS_ENDPOINT_URL` to run against DynamoDB Local.

mod client;
mod error;
mod item;
mod table;

pub use client::DynamoDb;
pub use table::Table;
