use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::context::InstitutionId;

// ==============================================================================
// DOMAIN RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub content_id: Uuid,
    pub content_type_id: String,
    pub content_type_description: Option<String>,
    pub content_type_label: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub new_flag: bool,
    pub duration_in_minutes: Option<i32>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Content as seen from an administering institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminContent {
    pub content_id: Uuid,
    pub content_type_id: String,
    pub content_type_label_id: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub date_created: Option<NaiveDate>,
    pub owner_institution_id: InstitutionId,
    pub owner_institution: Option<String>,
    pub views: Option<i32>,
    pub visibility_id: VisibilityId,
    pub duration_in_minutes: Option<i32>,
    pub owner_institution_approval_status_id: ApprovalStatusId,
    pub other_institution_approval_status_id: ApprovalStatusId,
    #[serde(default)]
    pub archived_flag: bool,
    #[serde(default)]
    pub approved_flag: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub tag_id: String,
    pub tag_group_id: String,
    pub name: String,
    pub url_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInstitution {
    pub institution_id: InstitutionId,
    pub name: String,
}

// ==============================================================================
// ENUMERATIONS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityId {
    Private,
    Network,
    Public,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatusId {
    Pending,
    Approved,
    Rejected,
    Archived,
    NotApplicable,
}

impl ApprovalStatusId {
    pub fn description(&self) -> &'static str {
        match self {
            ApprovalStatusId::Pending => "Pending",
            ApprovalStatusId::Approved => "Live",
            ApprovalStatusId::Rejected => "Rejected",
            ApprovalStatusId::Archived => "Archived",
            ApprovalStatusId::NotApplicable => "N/A",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentActionId {
    Edit,
    Approve,
    Reject,
    Archive,
    Unarchive,
    Delete,
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailableStatusId {
    Available,
    Added,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminContentDisplayType {
    #[default]
    Detail,
    AvailableContent,
    MyContent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentSupplement {
    Tags,
}
