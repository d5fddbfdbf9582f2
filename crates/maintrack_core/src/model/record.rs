//! Per-flat payment record.
//!
//! # Responsibility
//! - Hold the editable fields of one flat for one period.
//! - Separate the durable receipt trace (`receipt_file_name`) from the
//!   in-session file reference (`receipt_handle`).
//!
//! # Invariants
//! - `flat_number` is never changed after construction.
//! - `receipt_handle` is skipped by serialization in both directions.
//! - Text fields are stored verbatim, without trimming.

use crate::model::status::PaymentStatus;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// In-session reference to an uploaded receipt file.
///
/// Supplied by the file-picker collaborator; the core never opens the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptHandle {
    pub display_name: String,
    pub path: PathBuf,
}

impl ReceiptHandle {
    pub fn new(display_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            path: path.into(),
        }
    }
}

/// Which status column a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Maintenance,
    WaterBill,
}

impl StatusField {
    /// Parses the field names used by UI hosts (`maintenance`, `waterBill`).
    pub fn parse(value: &str) -> Option<Self> {
        [Self::Maintenance, Self::WaterBill]
            .into_iter()
            .find(|field| field.as_str() == value)
    }

    /// Host spelling, also used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::WaterBill => "waterBill",
        }
    }
}

/// Which free-text column an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    ResidentName,
    Comments,
}

impl TextField {
    /// Parses the field names used by UI hosts (`name`, `comments`).
    pub fn parse(value: &str) -> Option<Self> {
        [Self::ResidentName, Self::Comments]
            .into_iter()
            .find(|field| field.as_str() == value)
    }

    /// Host spelling, also used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ResidentName => "name",
            Self::Comments => "comments",
        }
    }
}

/// One flat's ledger line for a single period.
///
/// Only `flatNumber` is required when decoding; missing statuses and text
/// read back blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentRecord {
    pub flat_number: String,
    #[serde(default)]
    pub maintenance_status: PaymentStatus,
    #[serde(default)]
    pub water_bill_status: PaymentStatus,
    #[serde(default)]
    pub resident_name: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_file_name: Option<String>,
    /// Live only for the current session.
    #[serde(skip)]
    pub receipt_handle: Option<ReceiptHandle>,
}

impl ApartmentRecord {
    /// Creates the blank record used when a period has no stored data.
    pub fn blank(flat_number: impl Into<String>) -> Self {
        Self {
            flat_number: flat_number.into(),
            maintenance_status: PaymentStatus::Unset,
            water_bill_status: PaymentStatus::Unset,
            resident_name: String::new(),
            comments: String::new(),
            receipt_file_name: None,
            receipt_handle: None,
        }
    }

    pub fn status(&self, field: StatusField) -> PaymentStatus {
        match field {
            StatusField::Maintenance => self.maintenance_status,
            StatusField::WaterBill => self.water_bill_status,
        }
    }

    /// Advances `field` one step through the status cycle and returns the
    /// new value.
    pub fn toggle_status(&mut self, field: StatusField) -> PaymentStatus {
        let slot = match field {
            StatusField::Maintenance => &mut self.maintenance_status,
            StatusField::WaterBill => &mut self.water_bill_status,
        };
        *slot = slot.next();
        *slot
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ResidentName => &self.resident_name,
            TextField::Comments => &self.comments,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::ResidentName => self.resident_name = value,
            TextField::Comments => self.comments = value,
        }
    }

    /// Stores the handle and mirrors its display name into the durable field.
    pub fn attach_receipt(&mut self, handle: ReceiptHandle) {
        self.receipt_file_name = Some(handle.display_name.clone());
        self.receipt_handle = Some(handle);
    }

    /// Name to show next to the upload control, live handle first.
    pub fn receipt_display_name(&self) -> Option<&str> {
        self.receipt_handle
            .as_ref()
            .map(|handle| handle.display_name.as_str())
            .or(self.receipt_file_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::{ApartmentRecord, ReceiptHandle, StatusField, TextField};
    use crate::model::status::PaymentStatus;

    #[test]
    fn blank_record_has_unset_statuses_and_empty_text() {
        let record = ApartmentRecord::blank("101");
        assert_eq!(record.flat_number, "101");
        assert_eq!(record.maintenance_status, PaymentStatus::Unset);
        assert_eq!(record.water_bill_status, PaymentStatus::Unset);
        assert!(record.resident_name.is_empty());
        assert!(record.comments.is_empty());
        assert!(record.receipt_file_name.is_none());
        assert!(record.receipt_handle.is_none());
    }

    #[test]
    fn toggle_only_touches_requested_field() {
        let mut record = ApartmentRecord::blank("101");
        assert_eq!(record.toggle_status(StatusField::WaterBill), PaymentStatus::Paid);
        assert_eq!(record.maintenance_status, PaymentStatus::Unset);
        assert_eq!(record.status(StatusField::WaterBill), PaymentStatus::Paid);
    }

    #[test]
    fn set_text_keeps_value_verbatim() {
        let mut record = ApartmentRecord::blank("101");
        record.set_text(TextField::Comments, "  paid late \n");
        assert_eq!(record.text(TextField::Comments), "  paid late \n");
    }

    #[test]
    fn serialized_shape_uses_camel_case_and_drops_handle() {
        let mut record = ApartmentRecord::blank("203");
        record.attach_receipt(ReceiptHandle::new("march.pdf", "/tmp/march.pdf"));

        let value = serde_json::to_value(&record).expect("record should serialize");
        let object = value.as_object().expect("record should be a JSON object");
        assert_eq!(object["flatNumber"], "203");
        assert_eq!(object["maintenanceStatus"], "");
        assert_eq!(object["waterBillStatus"], "");
        assert_eq!(object["residentName"], "");
        assert_eq!(object["receiptFileName"], "march.pdf");
        assert!(!object.contains_key("receiptHandle"));
        assert_eq!(object.len(), 6);
    }

    #[test]
    fn missing_receipt_name_is_omitted_and_accepted_on_read() {
        let record = ApartmentRecord::blank("102");
        let encoded = serde_json::to_string(&record).expect("record should serialize");
        assert!(!encoded.contains("receiptFileName"));

        let decoded: ApartmentRecord =
            serde_json::from_str(&encoded).expect("record should deserialize");
        assert_eq!(decoded, record);
    }

    #[test]
    fn sparse_stored_record_keeps_present_fields() {
        let decoded: ApartmentRecord = serde_json::from_str(
            r#"{"flatNumber":"102","maintenanceStatus":"LATE","waterBillStatus":"PAID","residentName":"Bob"}"#,
        )
        .expect("sparse record should deserialize");
        assert_eq!(decoded.flat_number, "102");
        assert_eq!(decoded.maintenance_status, PaymentStatus::Unset);
        assert_eq!(decoded.water_bill_status, PaymentStatus::Paid);
        assert_eq!(decoded.resident_name, "Bob");
        assert!(decoded.comments.is_empty());
    }

    #[test]
    fn receipt_display_name_prefers_live_handle() {
        let mut record = ApartmentRecord::blank("301");
        record.receipt_file_name = Some("old.pdf".to_string());
        assert_eq!(record.receipt_display_name(), Some("old.pdf"));

        record.receipt_handle = Some(ReceiptHandle::new("new.png", "/tmp/new.png"));
        assert_eq!(record.receipt_display_name(), Some("new.png"));
    }

    #[test]
    fn field_names_parse_from_ui_spelling() {
        assert_eq!(StatusField::parse("waterBill"), Some(StatusField::WaterBill));
        assert_eq!(StatusField::parse("water_bill"), None);
        assert_eq!(StatusField::parse("rent"), None);
        assert_eq!(TextField::parse("name"), Some(TextField::ResidentName));
        assert_eq!(TextField::parse("residentName"), None);
        assert_eq!(TextField::parse("notes"), None);

        for field in [StatusField::Maintenance, StatusField::WaterBill] {
            assert_eq!(StatusField::parse(field.as_str()), Some(field));
        }
        for field in [TextField::ResidentName, TextField::Comments] {
            assert_eq!(TextField::parse(field.as_str()), Some(field));
        }
    }
}
