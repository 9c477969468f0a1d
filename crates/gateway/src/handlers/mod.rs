//! Request handlers for the admin API

pub mod articles;
pub mod categories;
pub mod feeds;
pub mod health;
pub mod producers;
pub mod queue;
