use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, info};

use crate::app_response::AppResponse;
use crate::customer_model::{Customer, CustomerId, CustomerMatcher};
use crate::store_config::StoreConfig;
use crate::test_data::TestDataGenerator;

struct StoreState {
    records: HashMap<CustomerId, Customer>,
    next_id: CustomerId,
}

/// In-memory customer store.
///
/// All state sits behind one mutex and every public method locks it once, so
/// each call is atomic. Records go in and come out as owned copies.
///
/// ```rust
/// use customer_store_core::customer_model::{Customer, CustomerStatus};
/// use customer_store_core::customer_store::CustomerStore;
///
/// let store = CustomerStore::new();
/// let id = store.upsert(Some(&Customer::new("Ann", "Smith", CustomerStatus::Customer)));
/// assert_eq!(id, Some(0));
/// assert_eq!(store.find_matching(Some("ANN")).len(), 1);
/// ```
pub struct CustomerStore {
    state: Mutex<StoreState>,
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore {
    pub fn new() -> Self {
        CustomerStore {
            state: Mutex::new(StoreState {
                records: HashMap::new(),
                next_id: 0,
            }),
        }
    }

    /// Builds a store and, if the config asks for it, seeds it with test data.
    pub fn from_config(config: &StoreConfig) -> Self {
        let store = Self::new();
        if config.seed_test_data {
            let saved = TestDataGenerator::new(config.test_data.clone()).ensure_test_data(&store);
            info!("Seeded new store with {} test records", saved);
        }
        store
    }

    // No method panics while holding the lock with state half-written, so a
    // poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces a customer and returns the identifier it is stored under.
    ///
    /// A new customer (no id) gets the next counter value. An absent customer
    /// is logged and ignored, returning `None`; use [`CustomerStore::try_upsert`]
    /// to get that case back as an error. A save that would exhaust the id
    /// range is refused the same way.
    pub fn upsert(&self, customer: Option<&Customer>) -> Option<CustomerId> {
        self.try_upsert(customer).ok()
    }

    /// Like [`CustomerStore::upsert`] but reports a refused save as a
    /// [`AppResponse::ValidationError`].
    pub fn try_upsert(&self, customer: Option<&Customer>) -> Result<CustomerId, AppResponse> {
        self.upsert_returning(customer)
            .map(|saved| saved.id.unwrap_or_default())
    }

    /// Upserts and returns the copy that was stored, taken under the same lock.
    pub(crate) fn upsert_returning(&self, customer: Option<&Customer>) -> Result<Customer, AppResponse> {
        let Some(customer) = customer else {
            error!("Customer is null. Is the edit form connected to the store?");
            return Err(AppResponse::ValidationError("Customer must not be null".to_string()));
        };
        self.save(customer).map_err(|e| {
            error!("Refusing to save customer: {e}");
            e
        })
    }

    fn save(&self, customer: &Customer) -> Result<Customer, AppResponse> {
        let mut state = self.lock();
        let id = match customer.id {
            Some(id) if id < state.next_id => id,
            // Keep generated ids clear of caller-chosen ones.
            Some(id) => {
                state.next_id = id.checked_add(1).ok_or_else(|| id_space_exhausted(id))?;
                id
            }
            None => {
                let id = state.next_id;
                state.next_id = id.checked_add(1).ok_or_else(|| id_space_exhausted(id))?;
                id
            }
        };

        let mut stored = customer.clone();
        stored.id = Some(id);
        state.records.insert(id, stored.clone());
        Ok(stored)
    }

    /// Removes the customer with the same id. Unknown or unsaved customers are a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete(&self, customer: &Customer) -> bool {
        let Some(id) = customer.id else {
            debug!("Ignoring delete of unsaved customer");
            return false;
        };
        self.lock().records.remove(&id).is_some()
    }

    pub fn count(&self) -> usize {
        self.lock().records.len()
    }

    pub fn get_by_id(&self, id: CustomerId) -> Option<Customer> {
        self.lock().records.get(&id).cloned()
    }

    /// Every customer, newest first.
    pub fn find_all(&self) -> Vec<Customer> {
        self.find_matching(None)
    }

    /// Customers whose rendered text contains `filter`, ignoring case, newest first.
    ///
    /// `None` and the empty string match everything.
    pub fn find_matching(&self, filter: Option<&str>) -> Vec<Customer> {
        let state = self.lock();
        let found: Vec<Customer> = Self::matching(&state, filter).into_iter().cloned().collect();
        found
    }

    /// The `[offset, offset + limit)` window of [`CustomerStore::find_matching`].
    ///
    /// The window is clipped to the available results; an offset past the end
    /// yields an empty vector.
    pub fn find_page(&self, filter: Option<&str>, offset: usize, limit: usize) -> Vec<Customer> {
        let state = self.lock();
        let page: Vec<Customer> = Self::matching(&state, filter)
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        page
    }

    /// Removes every record and returns how many were removed.
    ///
    /// The id counter keeps running, so identifiers are not reused.
    pub fn clear_all_records(&self) -> usize {
        let mut state = self.lock();
        let removed = state.records.len();
        state.records.clear();
        info!("Cleared {} customer records", removed);
        removed
    }

    fn matching<'a>(state: &'a StoreState, filter: Option<&str>) -> Vec<&'a Customer> {
        let mut matcher = CustomerMatcher::new(filter);
        let mut matches: Vec<&Customer> = state
            .records
            .values()
            .filter(|customer| matcher.matches(customer))
            .collect();
        matches.sort_unstable_by(|a, b| b.id.cmp(&a.id));
        matches
    }
}

fn id_space_exhausted(id: CustomerId) -> AppResponse {
    AppResponse::ValidationError(format!("Customer id {id} leaves no room for further ids"))
}
