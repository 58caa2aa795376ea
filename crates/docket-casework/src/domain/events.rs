//! Domain events for the casework context.

use docket_core::event::DomainEvent;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Emitted when a user account is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreated {
    /// The created user.
    pub user_id: Uuid,
}

impl DomainEvent for UserCreated {
    fn event_type(&self) -> &'static str {
        "users.created"
    }

    fn to_payload(&self) -> serde_json::Value {
        json!({ "id": self.user_id })
    }
}

/// Emitted when a user account is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRemoved {
    /// The removed user.
    pub user_id: Uuid,
}

impl DomainEvent for UserRemoved {
    fn event_type(&self) -> &'static str {
        "users.removed"
    }

    fn to_payload(&self) -> serde_json::Value {
        json!({ "id": self.user_id })
    }
}

/// Emitted when a law firm is registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffetRegistered {
    /// The registered buffet.
    pub buffet_id: Uuid,
    /// The owning user.
    pub owner_user_id: Uuid,
}

impl DomainEvent for BuffetRegistered {
    fn event_type(&self) -> &'static str {
        "buffets.registered"
    }

    fn to_payload(&self) -> serde_json::Value {
        json!({ "id": self.buffet_id, "owner_user_id": self.owner_user_id })
    }
}

/// Emitted when a vehicle-investigation case record is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecordOpened {
    /// The opened case record.
    pub case_record_id: Uuid,
    /// The buffet conducting the investigation.
    pub buffet_id: Uuid,
    /// The vehicle plate under investigation.
    pub plate_number: String,
}

impl DomainEvent for CaseRecordOpened {
    fn event_type(&self) -> &'static str {
        "case_records.opened"
    }

    fn to_payload(&self) -> serde_json::Value {
        json!({
            "id": self.case_record_id,
            "buffet_id": self.buffet_id,
            "plate_number": self.plate_number,
        })
    }
}

/// Emitted when a case record is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecordClosed {
    /// The closed case record.
    pub case_record_id: Uuid,
}

impl DomainEvent for CaseRecordClosed {
    fn event_type(&self) -> &'static str {
        "case_records.closed"
    }

    fn to_payload(&self) -> serde_json::Value {
        json!({ "id": self.case_record_id })
    }
}
