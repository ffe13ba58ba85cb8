//! Seeded synthetic customers for demos and load tests.
//!
//! Nothing here is part of the store contract; it only calls
//! [`CustomerStore::upsert`] like any other client.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::customer_model::{Customer, CustomerStatus};
use crate::customer_store::CustomerStore;
use crate::store_config::{TestDataConfig, TestDataStrategy};

static FULL_NAMES: [&str; 30] = [
    "Gabrielle Patel", "Brian Robinson", "Eduardo Haugen", "Koen Johansen",
    "Alejandro Macdonald", "Angel Karlsson", "Yahir Gustavsson", "Haiden Svensson",
    "Emily Stewart", "Corinne Davis", "Ryann Davis", "Yurem Jackson",
    "Kelly Gustavsson", "Eileen Walker", "Katelyn Martin", "Israel Carlsson",
    "Quinn Hansson", "Makena Smith", "Danielle Watson", "Leland Harris",
    "Gunner Karlsen", "Jamar Olsson", "Lara Martin", "Ann Andersson",
    "Remington Andersson", "Rene Carlsson", "Elvis Olsen", "Solomon Olsen",
    "Jaydan Jackson", "Bernard Nilsen",
];

static FIRST_NAMES: [&str; 30] = [
    "Gabrielle", "Brian", "Eduardo", "Koen", "Alejandro", "Angel", "Yahir", "Haiden",
    "Emily", "Corinne", "Ryann", "Yurem", "Kelly", "Eileen", "Katelyn", "Israel",
    "Quinn", "Makena", "Danielle", "Leland", "Gunner", "Jamar", "Lara", "Ann",
    "Remington", "Rene", "Elvis", "Solomon", "Jaydan", "Bernard",
];

static LAST_NAMES: [&str; 22] = [
    "Patel", "Robinson", "Haugen", "Johansen", "Macdonald", "Karlsson", "Gustavsson",
    "Svensson", "Stewart", "Davis", "Jackson", "Walker", "Martin", "Carlsson", "Hansson",
    "Smith", "Watson", "Harris", "Karlsen", "Olsson", "Andersson", "Nilsen",
];

pub struct TestDataGenerator {
    config: TestDataConfig,
}

impl TestDataGenerator {
    pub fn new(config: TestDataConfig) -> Self {
        TestDataGenerator { config }
    }

    pub fn config(&self) -> &TestDataConfig {
        &self.config
    }

    /// Lazily yields the configured records without touching any store.
    ///
    /// The same config always yields the same customers.
    pub fn records(&self) -> Box<dyn Iterator<Item = Customer> + '_> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        match self.config.strategy {
            TestDataStrategy::Names => Box::new(FULL_NAMES.iter().map(move |&name| {
                let (first, last) = name.split_once(' ').unwrap_or((name, ""));
                Customer::new(first, last, random_status(&mut rng))
            })),
            TestDataStrategy::Bulk => Box::new((1..=self.config.count).map(move |ordinal| {
                let status = random_status(&mut rng);
                let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
                let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
                Customer::new(format!("{first} {ordinal:07}"), last, status)
            })),
        }
    }

    pub fn generate(&self) -> Vec<Customer> {
        self.records().collect()
    }

    /// Upserts every generated customer and returns how many were saved.
    pub fn populate(&self, store: &CustomerStore) -> usize {
        let saved = self
            .records()
            .filter_map(|customer| store.upsert(Some(&customer)))
            .count();
        info!(
            "Generated {} {:?} test customers (seed {})",
            saved, self.config.strategy, self.config.seed
        );
        saved
    }

    /// Populates the store only if it holds no records yet; returns how many were saved.
    pub fn ensure_test_data(&self, store: &CustomerStore) -> usize {
        if store.count() > 0 {
            info!("Store already holds data; skipping test data generation");
            return 0;
        }
        self.populate(store)
    }
}

fn random_status(rng: &mut StdRng) -> CustomerStatus {
    CustomerStatus::ALL[rng.gen_range(0..CustomerStatus::ALL.len())]
}
