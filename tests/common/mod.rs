//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use statecraft::cart::{CartAction, CartItem, CartState, ItemId, Price};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Item priced in whole units.
pub fn item(id: u64, name: &str, price: u64) -> CartItem {
    CartItem::new(ItemId(id), name, Price::from_major(price))
}

pub fn add(id: u64, name: &str, price: u64) -> CartAction {
    CartAction::AddItem(item(id, name, price))
}

pub fn remove(id: u64, name: &str, price: u64) -> CartAction {
    CartAction::RemoveItem(item(id, name, price))
}

pub fn empty_cart() -> CartState {
    CartState::default()
}

/// Multi-threaded runtime for tests that block on async work from a plain
/// `#[test]` thread.
pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}
