//! Data model definitions for the customer store.
//!
//! The primary model is [`Customer`], a small record with an optional
//! identifier, a first and last name, and a [`CustomerStatus`]. Records cross
//! every store boundary as owned copies, so mutating a returned value never
//! touches what the store holds.

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

/// Store-assigned customer identifier.
pub type CustomerId = u64;

/// Sales status of a customer.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CustomerStatus {
    #[default]
    ImportedLead,
    NotContacted,
    Contacted,
    Customer,
    ClosedLost,
}

impl CustomerStatus {
    /// Every status, in declaration order.
    pub const ALL: [CustomerStatus; 5] = [
        CustomerStatus::ImportedLead,
        CustomerStatus::NotContacted,
        CustomerStatus::Contacted,
        CustomerStatus::Customer,
        CustomerStatus::ClosedLost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::ImportedLead => "ImportedLead",
            CustomerStatus::NotContacted => "NotContacted",
            CustomerStatus::Contacted => "Contacted",
            CustomerStatus::Customer => "Customer",
            CustomerStatus::ClosedLost => "ClosedLost",
        }
    }
}

impl Display for CustomerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single customer record.
///
/// A customer without an `id` is new; the store assigns one on first save and
/// the identifier never changes afterwards.
///
/// # Examples
///
/// ```rust
/// use customer_store_core::customer_model::{Customer, CustomerStatus};
///
/// let customer = Customer::new("Ann", "Smith", CustomerStatus::Customer);
/// assert!(customer.is_new());
/// assert_eq!(customer.rendered(), "Ann Smith Customer");
/// ```
///
/// # Serialization
///
/// Fields use camelCase on the wire, and `id` may be omitted for a new record:
///
/// ```rust
/// use customer_store_core::customer_model::Customer;
///
/// let customer: Customer =
///     serde_json::from_str(r#"{"firstName":"Bob","lastName":"Jones","status":"ClosedLost"}"#)?;
/// assert_eq!(customer.id, None);
/// assert_eq!(customer.first_name, "Bob");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identifier assigned by the store, `None` until the first save.
    #[serde(default)]
    pub id: Option<CustomerId>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub status: CustomerStatus,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        status: CustomerStatus,
    ) -> Self {
        Customer {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            status,
        }
    }

    /// True until the store has assigned an identifier.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Text representation used for filtering: first name, last name and status.
    pub fn rendered(&self) -> String {
        self.to_string()
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.first_name, self.last_name, self.status)
    }
}

/// Case-insensitive substring matcher over [`Customer::rendered`].
///
/// Holds one scratch buffer that is reused for every customer it checks.
pub(crate) struct CustomerMatcher {
    needle: String,
    folded: String,
}

impl CustomerMatcher {
    /// `None` and the empty string match everything.
    pub(crate) fn new(filter: Option<&str>) -> Self {
        let mut needle = String::new();
        fold_case(filter.unwrap_or_default(), &mut needle);
        CustomerMatcher {
            needle,
            folded: String::new(),
        }
    }

    pub(crate) fn matches(&mut self, customer: &Customer) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.folded.clear();
        write!(CaseFolder(&mut self.folded), "{customer}").is_ok()
            && self.folded.contains(self.needle.as_str())
    }
}

/// Writes lower-cased text into the wrapped buffer.
struct CaseFolder<'a>(&'a mut String);

impl Write for CaseFolder<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        fold_case(s, self.0);
        Ok(())
    }
}

// Needle and haystack go through the same per-char mapping.
fn fold_case(text: &str, out: &mut String) {
    out.extend(text.chars().flat_map(char::to_lowercase));
}
