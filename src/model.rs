//! Customer and address records plus the input payloads that create them.
//!
//! Input payload fields use `#[serde(default)]` so a missing JSON key lands
//! as an empty value and is caught by `validate()` instead of failing
//! deserialization. Both update operations are full replacement; every
//! editable field is required every time.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A customer row. The id is assigned by storage and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// An address row owned by exactly one customer. Ownership is fixed at
/// creation; updates never move an address to another customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Payload for creating or replacing a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
}

impl CustomerInput {
    pub fn new(first_name: &str, last_name: &str, phone_number: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: phone_number.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.phone_number.is_empty() {
            return Err(Error::Validation("All fields are required".to_string()));
        }
        Ok(())
    }
}

/// Payload for creating an address under an existing customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub customer_id: i64,
    #[serde(flatten)]
    pub fields: AddressFields,
}

impl AddressInput {
    pub fn validate(&self) -> Result<()> {
        if self.customer_id <= 0 {
            return Err(Error::Validation("All fields are required".to_string()));
        }
        self.fields.validate()
    }
}

/// The four editable address fields, shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressFields {
    #[serde(default)]
    pub address_details: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pin_code: String,
}

impl AddressFields {
    pub fn new(address_details: &str, city: &str, state: &str, pin_code: &str) -> Self {
        Self {
            address_details: address_details.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            pin_code: pin_code.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.address_details.is_empty()
            || self.city.is_empty()
            || self.state.is_empty()
            || self.pin_code.is_empty()
        {
            return Err(Error::Validation("All fields are required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_input_valid() {
        assert!(CustomerInput::new("Jane", "Doe", "555-0100").validate().is_ok());
    }

    #[test]
    fn test_customer_input_rejects_empty_field() {
        let input = CustomerInput::new("Jane", "", "555-0100");
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_customer_input_missing_json_key_fails_validation() {
        let input: CustomerInput =
            serde_json::from_str(r#"{"first_name": "Jane", "last_name": "Doe"}"#).unwrap();
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_address_input_requires_customer_id() {
        let input: AddressInput = serde_json::from_str(
            r#"{"address_details": "12 High St", "city": "Pune", "state": "MH", "pin_code": "411001"}"#,
        )
        .unwrap();
        assert_eq!(input.customer_id, 0);
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_address_fields_reject_empty() {
        let fields = AddressFields::new("12 High St", "Pune", "", "411001");
        assert!(matches!(fields.validate(), Err(Error::Validation(_))));
        assert!(AddressFields::new("12 High St", "Pune", "MH", "411001").validate().is_ok());
    }
}
