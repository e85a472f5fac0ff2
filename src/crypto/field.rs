//! Per-column scheme assignments.
//!
//! Relational rows written by the current platform use [`EncryptionScheme::DerivedCbc`];
//! payment events exported to the analytical store were written by the older pipeline and
//! use [`EncryptionScheme::LegacyEcb`]. The assignment is fixed by what is already stored.

use super::EncryptionScheme;

/// Metadata for one encrypted column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PiiField {
    /// Table or dataset the column lives in.
    pub table: &'static str,
    /// Column name.
    pub column: &'static str,
    /// Scheme the stored values were written with.
    pub scheme: EncryptionScheme,
}

impl PiiField {
    const fn new(table: &'static str, column: &'static str, scheme: EncryptionScheme) -> Self {
        Self {
            table,
            column,
            scheme,
        }
    }
}

/// `account.details`
pub const ACCOUNT_DETAILS: PiiField =
    PiiField::new("account", "details", EncryptionScheme::DerivedCbc);
/// `users.name`
pub const USER_NAME: PiiField = PiiField::new("users", "name", EncryptionScheme::DerivedCbc);
/// `users.email`
pub const USER_EMAIL: PiiField = PiiField::new("users", "email", EncryptionScheme::DerivedCbc);
/// `events.payments.user_name`
pub const PAYMENT_USER_NAME: PiiField =
    PiiField::new("events.payments", "user_name", EncryptionScheme::LegacyEcb);
/// `events.payments.billing_email`
pub const PAYMENT_BILLING_EMAIL: PiiField =
    PiiField::new("events.payments", "billing_email", EncryptionScheme::LegacyEcb);
/// `events.payments.billing_address`
pub const PAYMENT_BILLING_ADDRESS: PiiField =
    PiiField::new("events.payments", "billing_address", EncryptionScheme::LegacyEcb);

/// Every encrypted column known to the crate.
pub const ALL: [PiiField; 6] = [
    ACCOUNT_DETAILS,
    USER_NAME,
    USER_EMAIL,
    PAYMENT_USER_NAME,
    PAYMENT_BILLING_EMAIL,
    PAYMENT_BILLING_ADDRESS,
];
