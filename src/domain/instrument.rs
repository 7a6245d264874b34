//! Sequencing instrument domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::not_blank;

/// Sequencing instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Instrument {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "SEQ-001")]
    pub code: String,
    #[schema(example = "Gene sequencer")]
    pub name: String,
    #[schema(example = "MGI")]
    pub brand: String,
    #[schema(example = "DNBSEQ-G99")]
    pub specifications_and_model: String,
    #[schema(example = "SN0001")]
    pub serial_number: String,
    #[schema(example = "MGI Tech")]
    pub manufacturer: String,
    pub room_id: Option<i32>,
    pub owner_id: Option<i32>,
    #[schema(example = "sequencing")]
    pub usage_type: Option<String>,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Instrument creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateInstrument {
    #[validate(
        length(max = 255, message = "code must be at most 255 characters"),
        custom(function = "not_blank", message = "code must not be blank")
    )]
    #[schema(example = "SEQ-001", max_length = 255)]
    pub code: String,
    #[validate(
        length(max = 255, message = "name must be at most 255 characters"),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    #[schema(example = "Gene sequencer", max_length = 255)]
    pub name: String,
    #[validate(
        length(max = 255, message = "brand must be at most 255 characters"),
        custom(function = "not_blank", message = "brand must not be blank")
    )]
    #[schema(example = "MGI", max_length = 255)]
    pub brand: String,
    #[validate(
        length(max = 255, message = "specifications_and_model must be at most 255 characters"),
        custom(function = "not_blank", message = "specifications_and_model must not be blank")
    )]
    #[schema(example = "DNBSEQ-G99", max_length = 255)]
    pub specifications_and_model: String,
    #[validate(
        length(max = 255, message = "serial_number must be at most 255 characters"),
        custom(function = "not_blank", message = "serial_number must not be blank")
    )]
    #[schema(example = "SN0001", max_length = 255)]
    pub serial_number: String,
    #[validate(
        length(max = 255, message = "manufacturer must be at most 255 characters"),
        custom(function = "not_blank", message = "manufacturer must not be blank")
    )]
    #[schema(example = "MGI Tech", max_length = 255)]
    pub manufacturer: String,
    pub room_id: Option<i32>,
    pub owner_id: Option<i32>,
    #[validate(length(max = 255, message = "usage_type must be at most 255 characters"))]
    #[schema(example = "sequencing", max_length = 255)]
    pub usage_type: Option<String>,
    pub remark: Option<String>,
}

/// Partial instrument update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInstrument {
    #[validate(
        length(max = 255, message = "name must be at most 255 characters"),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    #[schema(example = "Gene sequencer", max_length = 255)]
    pub name: Option<String>,
    #[validate(
        length(max = 255, message = "brand must be at most 255 characters"),
        custom(function = "not_blank", message = "brand must not be blank")
    )]
    #[schema(example = "MGI", max_length = 255)]
    pub brand: Option<String>,
    #[validate(
        length(max = 255, message = "specifications_and_model must be at most 255 characters"),
        custom(function = "not_blank", message = "specifications_and_model must not be blank")
    )]
    #[schema(example = "DNBSEQ-G99", max_length = 255)]
    pub specifications_and_model: Option<String>,
    #[validate(
        length(max = 255, message = "manufacturer must be at most 255 characters"),
        custom(function = "not_blank", message = "manufacturer must not be blank")
    )]
    #[schema(example = "MGI Tech", max_length = 255)]
    pub manufacturer: Option<String>,
    pub room_id: Option<i32>,
    #[validate(length(max = 255, message = "usage_type must be at most 255 characters"))]
    #[schema(max_length = 255)]
    pub usage_type: Option<String>,
    pub remark: Option<String>,
}

impl UpdateInstrument {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand.is_none()
            && self.specifications_and_model.is_none()
            && self.manufacturer.is_none()
            && self.room_id.is_none()
            && self.usage_type.is_none()
            && self.remark.is_none()
    }
}

/// Owner assignment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignOwner {
    #[schema(example = 1)]
    pub user_id: i32,
}

/// Instrument list filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentFilter {
    pub owner_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CreateInstrument {
        CreateInstrument {
            code: "SEQ-001".to_string(),
            name: "Gene sequencer".to_string(),
            brand: "MGI".to_string(),
            specifications_and_model: "DNBSEQ-G99".to_string(),
            serial_number: "SN0001".to_string(),
            manufacturer: "MGI Tech".to_string(),
            room_id: None,
            owner_id: None,
            usage_type: None,
            remark: None,
        }
    }

    #[test]
    fn test_complete_instrument_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_blank_serial_rejected() {
        let mut input = sample();
        input.serial_number = " ".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("serial_number"));
    }

    #[test]
    fn test_overlong_code_rejected() {
        let mut input = sample();
        input.code = "C".repeat(256);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_rejects_blank_fields() {
        let update = UpdateInstrument {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let update = UpdateInstrument {
            manufacturer: Some("".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateInstrument {
            name: Some("Sequencer II".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateInstrument::default().is_empty());
        let update = UpdateInstrument {
            remark: Some("calibrated".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
