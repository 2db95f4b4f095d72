use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::RoleId;
use shared_models::context::{CurrentContext, InstitutionId};
use shared_models::error::AppError;
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{
    AdminContent, AdminContentDisplayType, ApprovalStatusId, AvailableStatusId, Content, ContentActionId,
    ContentSupplement, NetworkInstitution, Tag, VisibilityId,
};
use crate::services::{ContentService, SupabaseContentService};

// ==============================================================================
// TAG
// ==============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagApiResponse {
    pub tag_id: String,
    pub tag_group_id: String,
    pub name: String,
    pub url_name: String,
    pub description: Option<String>,
}

impl From<&Tag> for TagApiResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            tag_id: tag.tag_id.clone(),
            tag_group_id: tag.tag_group_id.clone(),
            name: tag.name.clone(),
            url_name: tag.url_name.clone(),
            description: tag.description.clone(),
        }
    }
}

// ==============================================================================
// CONTENT
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentApiResponse {
    pub content_id: Uuid,
    pub content_type_id: String,
    pub content_type_description: Option<String>,
    pub content_type_label: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    pub date_created_description: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub call_to_action: Option<String>,
    pub new_flag: bool,
    pub duration: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub tag_ids: Vec<String>,
    pub tags: Option<Vec<TagApiResponse>>,
}

#[derive(Clone)]
pub struct ContentApiResponseFactory {
    content_service: Arc<dyn ContentService>,
    strings: Arc<Strings>,
}

impl ContentApiResponseFactory {
    pub fn new(content_service: Arc<dyn ContentService>, strings: Arc<Strings>) -> Self {
        Self {
            content_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseContentService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        content: &Content,
        supplements: &HashSet<ContentSupplement>,
    ) -> Result<ContentApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());
        let tags = self.content_service.find_tags_by_content_id(content.content_id).await?;

        Ok(ContentApiResponse {
            content_id: content.content_id,
            content_type_id: content.content_type_id.clone(),
            content_type_description: content.content_type_description.clone(),
            content_type_label: content.content_type_label.clone(),
            title: content.title.clone(),
            url: content.url.clone(),
            date_created: content.date_created,
            date_created_description: content.date_created.map(|t| formatter.format_timestamp(t)),
            image_url: content.image_url.clone(),
            description: content.description.clone(),
            author: content.author.clone(),
            call_to_action: content.call_to_action.clone(),
            new_flag: content.new_flag,
            duration: content.duration_in_minutes.map(|minutes| format!("{} min", minutes)),
            created: content.created,
            created_description: formatter.format_timestamp(content.created),
            last_updated: content.last_updated,
            last_updated_description: formatter.format_timestamp(content.last_updated),
            tag_ids: tags.iter().map(|tag| tag.tag_id.clone()).collect(),
            tags: supplements
                .contains(&ContentSupplement::Tags)
                .then(|| tags.iter().map(TagApiResponse::from).collect()),
        })
    }
}

// ==============================================================================
// ADMIN CONTENT
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatusApiResponse {
    pub approval_status_id: ApprovalStatusId,
    pub description: String,
}

impl ApprovalStatusApiResponse {
    fn new(approval_status_id: ApprovalStatusId, formatter: &Formatter) -> Self {
        Self {
            approval_status_id,
            description: formatter.string(approval_status_id.description(), &[]),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInstitutionApiResponse {
    pub institution_id: InstitutionId,
    pub name: String,
}

impl From<&NetworkInstitution> for NetworkInstitutionApiResponse {
    fn from(institution: &NetworkInstitution) -> Self {
        Self {
            institution_id: institution.institution_id.clone(),
            name: institution.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminContentApiResponse {
    pub content_id: Uuid,
    pub date_created: Option<NaiveDate>,
    pub date_created_description: Option<String>,
    pub content_type_id: String,
    pub content_type_label_id: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub owner_institution: Option<String>,
    pub available_status_id: Option<AvailableStatusId>,
    pub visibility_id: VisibilityId,
    pub views: Option<i32>,
    pub actions: Vec<ContentActionId>,
    pub content_tag_ids: Option<Vec<String>>,
    pub duration: Option<String>,
    pub duration_in_minutes: Option<i32>,
    pub visible_to_other_institutions: bool,
    pub selected_network_institutions: Option<Vec<NetworkInstitutionApiResponse>>,
    pub owner_institution_approval_status: ApprovalStatusApiResponse,
    pub other_institution_approval_status: ApprovalStatusApiResponse,
}

/// Actions the viewer may take on `content` and, for the available-content
/// listing, whether the viewer's institution already carries it.
pub fn content_actions(
    role_id: RoleId,
    content: &AdminContent,
    display_type: AdminContentDisplayType,
) -> (Vec<ContentActionId>, Option<AvailableStatusId>) {
    use ContentActionId::*;

    let mut actions = Vec::new();
    let mut available_status_id = None;

    if display_type == AdminContentDisplayType::MyContent {
        actions.push(Edit);
    }

    if content.archived_flag {
        actions.extend([Unarchive, Delete]);
        return (actions, available_status_id);
    }

    match display_type {
        AdminContentDisplayType::MyContent => {
            let other_status = content.other_institution_approval_status_id;

            match (role_id, content.visibility_id) {
                (RoleId::SuperAdministrator, VisibilityId::Public) => match other_status {
                    ApprovalStatusId::Pending => actions.extend([Approve, Reject]),
                    ApprovalStatusId::Approved => actions.push(Archive),
                    ApprovalStatusId::Rejected => actions.extend([Approve, Delete]),
                    _ => {}
                },
                (RoleId::SuperAdministrator, _) => {}
                (_, VisibilityId::Public) => match other_status {
                    ApprovalStatusId::Pending => actions.extend([Reject, Archive]),
                    ApprovalStatusId::Approved => actions.push(Archive),
                    ApprovalStatusId::Rejected => actions.extend([Approve, Delete]),
                    _ => {}
                },
                (_, VisibilityId::Private) => match content.owner_institution_approval_status_id {
                    ApprovalStatusId::Pending => actions.extend([Approve, Reject]),
                    ApprovalStatusId::Approved => actions.push(Archive),
                    ApprovalStatusId::Rejected => actions.extend([Approve, Delete]),
                    ApprovalStatusId::Archived => actions.push(Approve),
                    ApprovalStatusId::NotApplicable => {}
                },
                (_, VisibilityId::Network) => actions.push(Archive),
            }
        }
        AdminContentDisplayType::AvailableContent => {
            if content.approved_flag {
                actions.push(Remove);
                available_status_id = Some(AvailableStatusId::Added);
            } else {
                actions.push(Add);
                available_status_id = Some(AvailableStatusId::Available);
            }
        }
        AdminContentDisplayType::Detail => {}
    }

    (actions, available_status_id)
}

#[derive(Clone)]
pub struct AdminContentApiResponseFactory {
    content_service: Arc<dyn ContentService>,
    strings: Arc<Strings>,
}

impl AdminContentApiResponseFactory {
    pub fn new(content_service: Arc<dyn ContentService>, strings: Arc<Strings>) -> Self {
        Self {
            content_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseContentService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        content: &AdminContent,
        display_type: AdminContentDisplayType,
    ) -> Result<AdminContentApiResponse, AppError> {
        let role_id = context
            .viewer_role_id()
            .ok_or_else(|| AppError::Auth("Admin content requires a signed-in account".to_string()))?;
        let formatter = Formatter::new(context, self.strings.clone());

        let visible_to_other_institutions =
            matches!(content.visibility_id, VisibilityId::Network | VisibilityId::Public);

        let (owner_status, other_status) = if content.archived_flag {
            (ApprovalStatusId::Archived, ApprovalStatusId::Archived)
        } else if visible_to_other_institutions {
            (
                content.owner_institution_approval_status_id,
                content.other_institution_approval_status_id,
            )
        } else {
            (content.owner_institution_approval_status_id, ApprovalStatusId::NotApplicable)
        };

        let mut content_tag_ids = None;
        let mut selected_network_institutions = None;

        if display_type == AdminContentDisplayType::Detail {
            let tags = self.content_service.find_tags_by_content_id(content.content_id).await?;
            content_tag_ids = Some(tags.into_iter().map(|tag| tag.tag_id).collect());

            if content.visibility_id == VisibilityId::Network {
                let institutions = self
                    .content_service
                    .find_selected_network_institutions(&content.owner_institution_id, content.content_id)
                    .await?;
                selected_network_institutions =
                    Some(institutions.iter().map(NetworkInstitutionApiResponse::from).collect());
            }
        }

        let (actions, available_status_id) = content_actions(role_id, content, display_type);

        Ok(AdminContentApiResponse {
            content_id: content.content_id,
            date_created: content.date_created,
            date_created_description: content
                .date_created
                .map(|date| formatter.format_date(date, FormatStyle::Short)),
            content_type_id: content.content_type_id.clone(),
            content_type_label_id: content.content_type_label_id.clone(),
            title: content.title.clone(),
            author: content.author.clone(),
            description: content.description.clone(),
            url: content.url.clone(),
            image_url: content.image_url.clone(),
            owner_institution: content.owner_institution.clone(),
            available_status_id,
            visibility_id: content.visibility_id,
            views: content.views,
            actions,
            content_tag_ids,
            duration: content.duration_in_minutes.map(|minutes| minutes.to_string()),
            duration_in_minutes: content.duration_in_minutes,
            visible_to_other_institutions,
            selected_network_institutions,
            owner_institution_approval_status: ApprovalStatusApiResponse::new(owner_status, &formatter),
            other_institution_approval_status: ApprovalStatusApiResponse::new(other_status, &formatter),
        })
    }
}
