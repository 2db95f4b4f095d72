use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::context::InstitutionId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageStatusId {
    Draft,
    Live,
    CopyForEditing,
    Complete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowTypeId {
    Resources,
    GroupSessions,
    TagGroup,
    Tag,
    OneColumnImage,
    TwoColumnImage,
    ThreeColumnImage,
    MailingList,
}

impl RowTypeId {
    /// Image columns the row carries, in display order.
    pub fn column_count(&self) -> usize {
        match self {
            RowTypeId::OneColumnImage => 1,
            RowTypeId::TwoColumnImage => 2,
            RowTypeId::ThreeColumnImage => 3,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub page_id: Uuid,
    pub institution_id: InstitutionId,
    pub name: Option<String>,
    pub url_name: Option<String>,
    pub page_status_id: PageStatusId,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub image_file_upload_id: Option<Uuid>,
    pub image_alt_text: Option<String>,
    pub image_url: Option<String>,
    pub published_date: Option<NaiveDate>,
    /// Creation time of the first version of this page.
    pub original_create_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSection {
    pub page_section_id: Uuid,
    pub page_id: Uuid,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub background_color_id: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRow {
    pub page_row_id: Uuid,
    pub page_section_id: Uuid,
    pub row_type_id: RowTypeId,
    pub display_order: i32,
    pub mailing_list_id: Option<Uuid>,
}

/// Row of `v_page_row_mailing_list`: the signup copy shown with a mailing-list row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRowMailingList {
    pub page_row_id: Uuid,
    pub mailing_list_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRowColumn {
    pub page_row_column_id: Uuid,
    pub page_row_id: Uuid,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub image_file_upload_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub image_alt_text: Option<String>,
    pub column_display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRowTag {
    pub page_row_id: Uuid,
    pub tag_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSiteLocation {
    pub page_id: Uuid,
    pub site_location_id: String,
    pub call_to_action: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub image_alt_text: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGroup {
    pub tag_group_id: String,
    pub color_id: String,
    pub name: String,
    pub url_name: String,
    pub description: Option<String>,
}
