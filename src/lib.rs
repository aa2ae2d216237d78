//! Application-state patterns as a library: a reducer-driven store, scoped
//! context, hook-style primitives, and the side channels that feed them.

pub mod cart;
pub mod channels;
pub mod config;
pub mod context;
pub mod hooks;
pub mod logging;
pub mod mvi;
pub mod shell;
