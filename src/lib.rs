//! Notes, tags and groups persisted in SQLite.
//!
//! [`store::NoteStore`] and [`store::GroupStore`] are the consistency layer; both are built
//! on a shared [`db::Database`] handle and open one transaction per operation. The [`api`]
//! module is a thin axum adapter over the stores.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;
