//! Configuration for store instances and synthetic test data.
//!
//! Configuration arrives as JSON (usually across the FFI boundary) and every
//! field is optional; missing fields fall back to the defaults below.
//!
//! ```rust
//! use customer_store_core::store_config::{StoreConfig, TestDataStrategy};
//!
//! let config = StoreConfig::from_json(r#"{"seed_test_data":true,"test_data":{"count":50}}"#)?;
//! assert!(config.seed_test_data);
//! assert_eq!(config.test_data.count, 50);
//! assert_eq!(config.test_data.strategy, TestDataStrategy::Bulk);
//! # Ok::<(), customer_store_core::app_response::AppResponse>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

pub const DEFAULT_TEST_DATA_COUNT: usize = 1_000_000;
pub const DEFAULT_TEST_DATA_SEED: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestDataStrategy {
    /// One record per entry of the fixed "First Last" name list.
    Names,
    /// `count` records with numbered first names drawn from name pools.
    #[default]
    Bulk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestDataConfig {
    pub strategy: TestDataStrategy,
    /// Number of records for [`TestDataStrategy::Bulk`]; ignored by `Names`.
    pub count: usize,
    pub seed: u64,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        TestDataConfig {
            strategy: TestDataStrategy::Bulk,
            count: DEFAULT_TEST_DATA_COUNT,
            seed: DEFAULT_TEST_DATA_SEED,
        }
    }
}

impl TestDataConfig {
    pub fn from_json(json: &str) -> Result<Self, AppResponse> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Populate the store with synthetic records when it is created.
    pub seed_test_data: bool,
    pub test_data: TestDataConfig,
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, AppResponse> {
        Ok(serde_json::from_str(json)?)
    }
}
