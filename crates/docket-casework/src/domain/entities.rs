//! Entities for the casework context.
//!
//! Plain data with stable identities. Value-format checks (tax ids,
//! plate numbers) belong to upstream collaborators, not here.

use docket_core::repository::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Entity identifier.
    pub id: Uuid,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Tax identifier, validated upstream.
    pub tax_id: String,
}

impl Entity for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// A law firm registered on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffet {
    /// Entity identifier.
    pub id: Uuid,
    /// Registered legal name.
    pub legal_name: String,
    /// Tax identifier, validated upstream.
    pub tax_id: String,
    /// The user who owns the firm's account.
    pub owner_user_id: Uuid,
}

impl Entity for Buffet {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Lifecycle status of a case record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// The investigation is in progress.
    Open,
    /// The investigation concluded.
    Closed,
}

/// A vehicle-investigation case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Entity identifier.
    pub id: Uuid,
    /// The buffet conducting the investigation.
    pub buffet_id: Uuid,
    /// Vehicle plate under investigation, validated upstream.
    pub plate_number: String,
    /// Current lifecycle status.
    pub status: CaseStatus,
}

impl Entity for CaseRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}
