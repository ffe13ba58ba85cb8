//! # Customer Store Core
//!
//! An in-memory customer record store with filtered, paginated queries,
//! designed to sit behind a foreign presentation layer (Flutter, a web view, a
//! desktop shell) through a small C-compatible FFI.
//!
//! ## Features
//!
//! - **Copy-in, copy-out**: callers never hold references into store memory
//! - **Atomic operations**: every call runs under one lock
//! - **Case-insensitive filtering** over first name, last name and status
//! - **Newest-first pagination** by `(offset, limit)` windows that never fail
//! - **Seeded test data** for load testing with up to millions of records
//!
//! ## Quick Start
//!
//! ```no_run
//! use customer_store_core::{create_store, upsert_customer, find_customers_page, free_response};
//! use std::ffi::CString;
//!
//! let store = create_store(std::ptr::null());
//!
//! let json = CString::new(r#"{"firstName":"Ann","lastName":"Smith","status":"Customer"}"#).unwrap();
//! let saved = upsert_customer(store, json.as_ptr());
//! free_response(saved as *mut _);
//!
//! let filter = CString::new("ann").unwrap();
//! let page = find_customers_page(store, filter.as_ptr(), 0, 25);
//! free_response(page as *mut _);
//! ```
//!
//! ## FFI Functions
//!
//! Every function returns a JSON-serialized [`AppResponse`](app_response::AppResponse)
//! which the caller releases with [`free_response`]:
//!
//! - [`create_store`] - Build a store, optionally seeded with test data
//! - [`upsert_customer`] - Insert or update a customer
//! - [`delete_customer`] - Delete a customer by its id
//! - [`count_customers`] - Number of stored customers
//! - [`find_customers`] - All customers matching a filter
//! - [`find_customers_page`] - One page of matching customers
//! - [`get_customer`] - Look up a single customer
//! - [`clear_customers`] - Remove every customer
//! - [`populate_test_data`] - Generate synthetic customers
//! - [`close_store`] - Release the store

pub mod app_response;
pub mod customer_model;
pub mod customer_store;
pub mod store_config;
pub mod test_data;

use crate::app_response::AppResponse;
use crate::customer_model::{Customer, CustomerId};
use crate::customer_store::CustomerStore;
use crate::store_config::{StoreConfig, TestDataConfig};
use crate::test_data::TestDataGenerator;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use log::{info, warn};

/// Creates a new customer store.
///
/// # Parameters
///
/// * `config_json` - Null-terminated JSON [`StoreConfig`], or null for defaults
///
/// # Returns
///
/// A pointer to the store, or null if the configuration is not valid UTF-8 or
/// not valid JSON. Release it with [`close_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use customer_store_core::create_store;
///
/// let config = CString::new(r#"{"seed_test_data":true,"test_data":{"count":1000}}"#).unwrap();
/// let store = create_store(config.as_ptr());
/// assert!(!store.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(config_json: *const c_char) -> *mut CustomerStore {
    let config = if config_json.is_null() {
        StoreConfig::default()
    } else {
        let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
            Ok(s) => s,
            Err(e) => {
                warn!("Invalid UTF-8 in store config: {e}");
                return std::ptr::null_mut();
            }
        };
        match StoreConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!("❌ Rejected store config: {e}");
                return std::ptr::null_mut();
            }
        }
    };

    let store = CustomerStore::from_config(&config);
    info!("✅ Customer store created with {} records", store.count());
    Box::into_raw(Box::new(store))
}

/// Inserts or updates a customer.
///
/// A customer without `id` is new and receives the next identifier. The
/// response carries the saved customer, id included.
///
/// # JSON Format
///
/// ```json
/// { "id": 7, "firstName": "Ann", "lastName": "Smith", "status": "Customer" }
/// ```
///
/// # Errors
///
/// `BadRequest` for a null store, `ValidationError` for a null or JSON `null`
/// customer or an id that leaves no room for further ids, `SerializationError`
/// for malformed JSON.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn upsert_customer(store: *mut CustomerStore, json_ptr: *const c_char) -> *const c_char {
    let store = match store_ref(store, "upsert_customer") {
        Ok(store) => store,
        Err(err) => return err,
    };

    let customer: Option<Customer> = if json_ptr.is_null() {
        None
    } else {
        let json_str = match c_ptr_to_string(json_ptr, "JSON") {
            Ok(json) => json,
            Err(err) => return err,
        };
        match serde_json::from_str(&json_str) {
            Ok(customer) => customer,
            Err(e) => {
                let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
                return response_to_c_string(&error);
            }
        }
    };

    match store.upsert_returning(customer.as_ref()) {
        Ok(saved) => response_to_c_string(&AppResponse::json(&saved)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Deletes the customer carrying the given JSON's `id`.
///
/// Deleting an unknown or unsaved customer succeeds without changing anything.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_customer(store: *mut CustomerStore, json_ptr: *const c_char) -> *const c_char {
    let store = match store_ref(store, "delete_customer") {
        Ok(store) => store,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let customer: Customer = match serde_json::from_str(&json_str) {
        Ok(customer) => customer,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Error deserializing JSON: {e:?}"));
            return response_to_c_string(&error);
        }
    };

    let message = if store.delete(&customer) {
        "Customer deleted successfully"
    } else {
        "No matching customer; nothing deleted"
    };
    response_to_c_string(&AppResponse::success(message))
}

/// Returns the number of stored customers as the `Ok` payload.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn count_customers(store: *mut CustomerStore) -> *const c_char {
    match store_ref(store, "count_customers") {
        Ok(store) => response_to_c_string(&AppResponse::json(&store.count())),
        Err(err) => err,
    }
}

/// Returns every customer whose text contains `filter` (case-insensitive),
/// newest first. A null or empty filter returns everything.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn find_customers(store: *mut CustomerStore, filter: *const c_char) -> *const c_char {
    let store = match store_ref(store, "find_customers") {
        Ok(store) => store,
        Err(err) => return err,
    };

    let filter = match optional_c_string(filter, "filter") {
        Ok(filter) => filter,
        Err(err) => return err,
    };

    let customers = store.find_matching(filter.as_deref());
    response_to_c_string(&AppResponse::json(&customers))
}

/// Returns the `[offset, offset + limit)` window of [`find_customers`].
///
/// Windows past the end come back as an empty array, never as an error.
///
/// # Examples
///
/// ```no_run
/// use customer_store_core::{create_store, find_customers_page};
///
/// let store = create_store(std::ptr::null());
/// let second_page = find_customers_page(store, std::ptr::null(), 50, 50);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn find_customers_page(
    store: *mut CustomerStore,
    filter: *const c_char,
    offset: usize,
    limit: usize,
) -> *const c_char {
    let store = match store_ref(store, "find_customers_page") {
        Ok(store) => store,
        Err(err) => return err,
    };

    let filter = match optional_c_string(filter, "filter") {
        Ok(filter) => filter,
        Err(err) => return err,
    };

    let page = store.find_page(filter.as_deref(), offset, limit);
    response_to_c_string(&AppResponse::json(&page))
}

/// Looks up one customer by identifier.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_customer(store: *mut CustomerStore, id: CustomerId) -> *const c_char {
    let store = match store_ref(store, "get_customer") {
        Ok(store) => store,
        Err(err) => return err,
    };

    match store.get_by_id(id) {
        Some(customer) => response_to_c_string(&AppResponse::json(&customer)),
        None => {
            let error = AppResponse::NotFound(format!("No customer found with id: {id}"));
            response_to_c_string(&error)
        }
    }
}

/// Removes every customer; the `Ok` payload is the number removed.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_customers(store: *mut CustomerStore) -> *const c_char {
    match store_ref(store, "clear_customers") {
        Ok(store) => response_to_c_string(&AppResponse::json(&store.clear_all_records())),
        Err(err) => err,
    }
}

/// Generates synthetic customers into the store.
///
/// `config_json` is a JSON [`TestDataConfig`] or null for the defaults
/// (one million bulk records, seed 0). The `Ok` payload is the number saved.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn populate_test_data(store: *mut CustomerStore, config_json: *const c_char) -> *const c_char {
    let store = match store_ref(store, "populate_test_data") {
        Ok(store) => store,
        Err(err) => return err,
    };

    let config = match optional_c_string(config_json, "config") {
        Ok(None) => TestDataConfig::default(),
        Ok(Some(json)) => match TestDataConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => return response_to_c_string(&e),
        },
        Err(err) => return err,
    };

    let saved = TestDataGenerator::new(config).populate(store);
    response_to_c_string(&AppResponse::json(&saved))
}

/// Releases a store created by [`create_store`].
///
/// The pointer must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(store: *mut CustomerStore) -> *const c_char {
    if store.is_null() {
        let error = AppResponse::BadRequest("Null store pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    let store = unsafe { Box::from_raw(store) };
    info!("Closing customer store holding {} records", store.count());
    drop(store);
    response_to_c_string(&AppResponse::success("Store closed successfully"))
}

/// Releases a string returned by any function of this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr) });
}

fn store_ref<'a>(store: *mut CustomerStore, caller: &str) -> Result<&'a CustomerStore, *const c_char> {
    match unsafe { store.as_ref() } {
        Some(store) => Ok(store),
        None => {
            let error = AppResponse::BadRequest(format!("Null store pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Serializes an [`AppResponse`] into a heap-allocated C string.
///
/// Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// Null pointers and invalid UTF-8 come back as a `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Like [`c_ptr_to_string`], but a null pointer means "not given".
fn optional_c_string(ptr: *const c_char, field_name: &str) -> Result<Option<String>, *const c_char> {
    if ptr.is_null() {
        return Ok(None);
    }
    c_ptr_to_string(ptr, field_name).map(Some)
}
