use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use content_cell::{ContentApiResponse, ContentApiResponseFactory, ContentService, SupabaseContentService, TagApiResponse};
use group_session_cell::{GroupSessionApiResponse, GroupSessionApiResponseFactory};
use shared_config::AppConfig;
use shared_models::context::{CurrentContext, InstitutionId};
use shared_models::error::AppError;
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{
    Page, PageRow, PageRowColumn, PageRowMailingList, PageSection, PageSiteLocation, PageStatusId, RowTypeId, TagGroup,
};
use crate::services::{PageService, SupabasePageService};

// ==============================================================================
// LEAF PROJECTIONS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRowColumnApiResponse {
    pub page_row_column_id: Uuid,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub image_file_upload_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub image_alt_text: Option<String>,
    pub column_display_order: i32,
}

impl From<&PageRowColumn> for PageRowColumnApiResponse {
    fn from(column: &PageRowColumn) -> Self {
        Self {
            page_row_column_id: column.page_row_column_id,
            headline: column.headline.clone(),
            description: column.description.clone(),
            image_file_upload_id: column.image_file_upload_id,
            image_url: column.image_url.clone(),
            image_alt_text: column.image_alt_text.clone(),
            column_display_order: column.column_display_order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagGroupApiResponse {
    pub tag_group_id: String,
    pub color_id: String,
    pub name: String,
    pub url_name: String,
    pub description: Option<String>,
}

impl From<&TagGroup> for TagGroupApiResponse {
    fn from(tag_group: &TagGroup) -> Self {
        Self {
            tag_group_id: tag_group.tag_group_id.clone(),
            color_id: tag_group.color_id.clone(),
            name: tag_group.name.clone(),
            url_name: tag_group.url_name.clone(),
            description: tag_group.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSiteLocationApiResponse {
    pub page_id: Uuid,
    pub site_location_id: String,
    pub call_to_action: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub image_alt_text: Option<String>,
    pub display_order: Option<i32>,
}

impl From<&PageSiteLocation> for PageSiteLocationApiResponse {
    fn from(location: &PageSiteLocation) -> Self {
        Self {
            page_id: location.page_id,
            site_location_id: location.site_location_id.clone(),
            call_to_action: location.call_to_action.clone(),
            short_description: location.short_description.clone(),
            image_url: location.image_url.clone(),
            image_alt_text: location.image_alt_text.clone(),
            display_order: location.display_order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRowMailingListApiResponse {
    pub page_row_id: Uuid,
    pub display_order: i32,
    pub row_type_id: RowTypeId,
    pub mailing_list_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PageRowMailingListApiResponse {
    pub fn new(row: &PageRow, mailing_list: &PageRowMailingList) -> Self {
        Self {
            page_row_id: row.page_row_id,
            display_order: row.display_order,
            row_type_id: row.row_type_id,
            mailing_list_id: mailing_list.mailing_list_id,
            title: mailing_list.title.clone(),
            description: mailing_list.description.clone(),
        }
    }
}

// ==============================================================================
// PAGE, SECTION, ROW
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageApiResponse {
    pub page_id: Uuid,
    pub institution_id: InstitutionId,
    pub name: Option<String>,
    pub url_name: Option<String>,
    pub relative_url: String,
    pub page_status_id: PageStatusId,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub image_file_upload_id: Option<Uuid>,
    pub image_alt_text: Option<String>,
    pub image_url: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub published_date_description: String,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub editing_live_page: bool,
    pub page_sections: Vec<PageSectionApiResponse>,
    pub live_page_site_locations: Vec<PageSiteLocationApiResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSectionApiResponse {
    pub page_section_id: Uuid,
    pub page_id: Uuid,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub background_color_id: Option<String>,
    pub display_order: i32,
    pub page_rows: Vec<PageRowApiResponse>,
    pub display_section: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRowApiResponse {
    pub page_row_id: Uuid,
    pub page_section_id: Uuid,
    pub row_type_id: RowTypeId,
    pub display_order: i32,
    pub contents: Option<Vec<ContentApiResponse>>,
    pub group_sessions: Option<Vec<GroupSessionApiResponse>>,
    pub tag_group: Option<TagGroupApiResponse>,
    pub tag: Option<TagApiResponse>,
    pub tag_group_color_id: Option<String>,
    pub column_one: Option<PageRowColumnApiResponse>,
    pub column_two: Option<PageRowColumnApiResponse>,
    pub column_three: Option<PageRowColumnApiResponse>,
    pub mailing_list_id: Option<Uuid>,
    pub mailing_list_title: Option<String>,
    pub mailing_list_description: Option<String>,
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

#[derive(Clone)]
pub struct PageApiResponseFactory {
    page_service: Arc<dyn PageService>,
    content_service: Arc<dyn ContentService>,
    content_factory: ContentApiResponseFactory,
    group_session_factory: GroupSessionApiResponseFactory,
    strings: Arc<Strings>,
}

impl PageApiResponseFactory {
    pub fn new(
        page_service: Arc<dyn PageService>,
        content_service: Arc<dyn ContentService>,
        content_factory: ContentApiResponseFactory,
        group_session_factory: GroupSessionApiResponseFactory,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            page_service,
            content_service,
            content_factory,
            group_session_factory,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabasePageService::new(config, auth_token)),
            Arc::new(SupabaseContentService::new(config, auth_token)),
            ContentApiResponseFactory::from_config(config, auth_token),
            GroupSessionApiResponseFactory::from_config(config, auth_token),
            Strings::shared(config),
        )
    }

    /// Sections and site locations are only loaded when `include_details` is set.
    pub async fn create(
        &self,
        context: &CurrentContext,
        page: &Page,
        include_details: bool,
    ) -> Result<PageApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let mut page_sections = Vec::new();
        let mut live_page_site_locations = Vec::new();

        if include_details {
            for section in self
                .page_service
                .find_page_sections_by_page_id(page.page_id, &page.institution_id)
                .await?
            {
                let response = self.create_section(context, &section).await?;
                if response.display_section {
                    page_sections.push(response);
                }
            }

            live_page_site_locations = self
                .page_service
                .find_live_page_site_locations_by_page_id(page.page_id, &page.institution_id)
                .await?
                .iter()
                .map(PageSiteLocationApiResponse::from)
                .collect();
        }

        Ok(PageApiResponse {
            page_id: page.page_id,
            institution_id: page.institution_id.clone(),
            name: page.name.clone(),
            url_name: page.url_name.clone(),
            relative_url: format!("/pages/{}", page.url_name.as_deref().unwrap_or_default()),
            page_status_id: page.page_status_id,
            headline: page.headline.clone(),
            description: page.description.clone(),
            image_file_upload_id: page.image_file_upload_id,
            image_alt_text: page.image_alt_text.clone(),
            image_url: page.image_url.clone(),
            published_date: page.published_date,
            published_date_description: match page.published_date {
                Some(published_date) => formatter.format_date(published_date, FormatStyle::Medium),
                None => formatter.string("Not Published", &[]),
            },
            created: page.original_create_date,
            created_description: formatter.format_timestamp_with(
                page.original_create_date,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            last_updated: page.last_updated,
            last_updated_description: formatter.format_timestamp_with(
                page.last_updated,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            editing_live_page: page.page_status_id == PageStatusId::CopyForEditing,
            page_sections,
            live_page_site_locations,
        })
    }

    pub async fn create_section(
        &self,
        context: &CurrentContext,
        section: &PageSection,
    ) -> Result<PageSectionApiResponse, AppError> {
        let mut page_rows = Vec::new();
        for row in self
            .page_service
            .find_page_rows_by_page_section_id(section.page_section_id)
            .await?
        {
            page_rows.push(self.create_row(context, &row).await?);
        }

        let display_section = has_text(section.headline.as_deref())
            || has_text(section.description.as_deref())
            || !page_rows.is_empty();

        Ok(PageSectionApiResponse {
            page_section_id: section.page_section_id,
            page_id: section.page_id,
            name: section.name.clone(),
            headline: section.headline.clone(),
            description: section.description.clone(),
            background_color_id: section.background_color_id.clone(),
            display_order: section.display_order,
            page_rows,
            display_section,
        })
    }

    pub async fn create_row(&self, context: &CurrentContext, row: &PageRow) -> Result<PageRowApiResponse, AppError> {
        let page = self
            .page_service
            .find_page_by_page_row_id(row.page_row_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page for row {} not found", row.page_row_id)))?;
        let live_only = page.page_status_id == PageStatusId::Live;

        let mut response = PageRowApiResponse {
            page_row_id: row.page_row_id,
            page_section_id: row.page_section_id,
            row_type_id: row.row_type_id,
            display_order: row.display_order,
            contents: None,
            group_sessions: None,
            tag_group: None,
            tag: None,
            tag_group_color_id: None,
            column_one: None,
            column_two: None,
            column_three: None,
            mailing_list_id: None,
            mailing_list_title: None,
            mailing_list_description: None,
        };

        match row.row_type_id {
            RowTypeId::Resources => {
                let mut contents = Vec::new();
                for content in self
                    .page_service
                    .find_content_by_page_row_id(row.page_row_id, live_only)
                    .await?
                {
                    contents.push(self.content_factory.create(context, &content, &HashSet::new()).await?);
                }
                response.contents = Some(contents);
            }
            RowTypeId::GroupSessions => {
                let mut group_sessions = Vec::new();
                for group_session in self
                    .page_service
                    .find_group_sessions_by_page_row_id(row.page_row_id, live_only)
                    .await?
                {
                    group_sessions.push(self.group_session_factory.create(context, &group_session).await?);
                }
                response.group_sessions = Some(group_sessions);
            }
            RowTypeId::TagGroup => {
                response.tag_group = self
                    .page_service
                    .find_tag_group_by_page_row_id(row.page_row_id)
                    .await?
                    .as_ref()
                    .map(TagGroupApiResponse::from);
            }
            RowTypeId::Tag => {
                let row_tag = self
                    .page_service
                    .find_page_row_tag_by_page_row_id(row.page_row_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Tag for page row {} not found", row.page_row_id)))?;

                let tag_group = self
                    .page_service
                    .find_tag_group_by_tag_id(&row_tag.tag_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Tag group for tag {} not found", row_tag.tag_id)))?;

                let tag = self
                    .content_service
                    .find_tag_by_id(&row_tag.tag_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Tag {} not found", row_tag.tag_id)))?;

                response.tag_group_color_id = Some(tag_group.color_id);
                response.tag = Some(TagApiResponse::from(&tag));
            }
            RowTypeId::OneColumnImage | RowTypeId::TwoColumnImage | RowTypeId::ThreeColumnImage => {
                let mut columns = Vec::with_capacity(row.row_type_id.column_count());
                for display_order in 0..row.row_type_id.column_count() as i32 {
                    columns.push(
                        self.page_service
                            .find_page_row_column(row.page_row_id, display_order)
                            .await?
                            .as_ref()
                            .map(PageRowColumnApiResponse::from),
                    );
                }

                let mut columns = columns.into_iter();
                response.column_one = columns.next().flatten();
                response.column_two = columns.next().flatten();
                response.column_three = columns.next().flatten();
            }
            RowTypeId::MailingList => {
                match self
                    .page_service
                    .find_page_row_mailing_list_by_page_row_id(row.page_row_id)
                    .await?
                {
                    Some(mailing_list) => {
                        response.mailing_list_id = Some(mailing_list.mailing_list_id);
                        response.mailing_list_title = mailing_list.title;
                        response.mailing_list_description = mailing_list.description;
                    }
                    None => response.mailing_list_id = row.mailing_list_id,
                }
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageRowTag;
    use crate::services::page::MockPageService;
    use account_cell::{Institution, InstitutionService};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use content_cell::{AdminContent, Content, NetworkInstitution, Tag};
    use group_session_cell::{
        GroupSessionRequest, GroupSessionRequestStatus, GroupSessionReservation, GroupSessionService, GroupSessionStatus,
    };
    use mockall::predicate::eq;

    struct StubContentService;

    #[async_trait]
    impl ContentService for StubContentService {
        async fn find_content_by_id(&self, _content_id: Uuid) -> anyhow::Result<Option<Content>> {
            Ok(None)
        }

        async fn find_admin_content_by_id(
            &self,
            _content_id: Uuid,
            _institution_id: &InstitutionId,
        ) -> anyhow::Result<Option<AdminContent>> {
            Ok(None)
        }

        async fn find_tags_by_content_id(&self, _content_id: Uuid) -> anyhow::Result<Vec<Tag>> {
            Ok(Vec::new())
        }

        async fn find_tag_by_id(&self, tag_id: &str) -> anyhow::Result<Option<Tag>> {
            Ok(Some(Tag {
                tag_id: tag_id.to_string(),
                tag_group_id: "SYMPTOMS".to_string(),
                name: "Anxiety".to_string(),
                url_name: "anxiety".to_string(),
                description: None,
            }))
        }

        async fn find_selected_network_institutions(
            &self,
            _owner_institution_id: &InstitutionId,
            _content_id: Uuid,
        ) -> anyhow::Result<Vec<NetworkInstitution>> {
            Ok(Vec::new())
        }
    }

    struct EmptyGroupSessionService;

    #[async_trait]
    impl GroupSessionService for EmptyGroupSessionService {
        async fn find_group_session_by_id(
            &self,
            _group_session_id: Uuid,
        ) -> anyhow::Result<Option<group_session_cell::GroupSession>> {
            Ok(None)
        }

        async fn find_group_session_status_by_id(&self, _id: &str) -> anyhow::Result<Option<GroupSessionStatus>> {
            Ok(None)
        }

        async fn find_tags_by_group_session_id(&self, _group_session_id: Uuid) -> anyhow::Result<Vec<Tag>> {
            Ok(Vec::new())
        }

        async fn find_reservations_by_group_session_id(
            &self,
            _group_session_id: Uuid,
        ) -> anyhow::Result<Vec<GroupSessionReservation>> {
            Ok(Vec::new())
        }

        async fn find_group_session_request_by_id(
            &self,
            _group_session_request_id: Uuid,
        ) -> anyhow::Result<Option<GroupSessionRequest>> {
            Ok(None)
        }

        async fn find_group_session_request_status_by_id(
            &self,
            _id: &str,
        ) -> anyhow::Result<Option<GroupSessionRequestStatus>> {
            Ok(None)
        }
    }

    struct EmptyInstitutionService;

    #[async_trait]
    impl InstitutionService for EmptyInstitutionService {
        async fn find_institution_by_id(&self, _institution_id: &InstitutionId) -> anyhow::Result<Option<Institution>> {
            Ok(None)
        }
    }

    fn page(page_status_id: PageStatusId) -> Page {
        Page {
            page_id: Uuid::new_v4(),
            institution_id: InstitutionId::default(),
            name: Some("Anxiety".to_string()),
            url_name: Some("anxiety".to_string()),
            page_status_id,
            headline: Some("Feeling anxious?".to_string()),
            description: None,
            image_file_upload_id: None,
            image_alt_text: None,
            image_url: None,
            published_date: None,
            original_create_date: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2024, 2, 6, 15, 45, 0).unwrap(),
        }
    }

    fn row(row_type_id: RowTypeId) -> PageRow {
        PageRow {
            page_row_id: Uuid::new_v4(),
            page_section_id: Uuid::new_v4(),
            row_type_id,
            display_order: 1,
            mailing_list_id: None,
        }
    }

    fn factory(page_service: MockPageService) -> PageApiResponseFactory {
        let strings = Arc::new(Strings::builtin());
        let content_service: Arc<dyn ContentService> = Arc::new(StubContentService);

        PageApiResponseFactory::new(
            Arc::new(page_service),
            content_service.clone(),
            ContentApiResponseFactory::new(content_service, strings.clone()),
            GroupSessionApiResponseFactory::new(
                Arc::new(EmptyGroupSessionService),
                Arc::new(EmptyInstitutionService),
                strings.clone(),
            ),
            strings,
        )
    }

    #[tokio::test]
    async fn test_page_without_details() {
        let factory = factory(MockPageService::new());
        let page = page(PageStatusId::CopyForEditing);

        let response = factory.create(&CurrentContext::default(), &page, false).await.unwrap();

        assert_eq!(response.relative_url, "/pages/anxiety");
        assert_eq!(response.published_date_description, "Not Published");
        assert_eq!(response.created_description, "Jan 5, 2024, 10:00 AM");
        assert_eq!(response.last_updated_description, "Feb 6, 2024, 3:45 PM");
        assert!(response.editing_live_page);
        assert!(response.page_sections.is_empty());
        assert!(response.live_page_site_locations.is_empty());
    }

    #[tokio::test]
    async fn test_page_details_drop_empty_sections() {
        let page = page(PageStatusId::Live);
        let page_id = page.page_id;
        let empty_section_id = Uuid::new_v4();
        let headline_section_id = Uuid::new_v4();

        let mut page_service = MockPageService::new();
        page_service.expect_find_page_sections_by_page_id().returning(move |_, _| {
            Ok(vec![
                PageSection {
                    page_section_id: empty_section_id,
                    page_id,
                    name: None,
                    headline: Some("  ".to_string()),
                    description: None,
                    background_color_id: None,
                    display_order: 0,
                },
                PageSection {
                    page_section_id: headline_section_id,
                    page_id,
                    name: None,
                    headline: Some("Resources".to_string()),
                    description: None,
                    background_color_id: Some("WHITE".to_string()),
                    display_order: 1,
                },
            ])
        });
        page_service
            .expect_find_page_rows_by_page_section_id()
            .returning(|_| Ok(Vec::new()));
        page_service
            .expect_find_live_page_site_locations_by_page_id()
            .returning(move |_, _| {
                Ok(vec![PageSiteLocation {
                    page_id,
                    site_location_id: "FEATURED_TOPIC".to_string(),
                    call_to_action: Some("Learn more".to_string()),
                    short_description: None,
                    image_url: None,
                    image_alt_text: None,
                    display_order: Some(1),
                }])
            });

        let response = factory(page_service)
            .create(&CurrentContext::default(), &page, true)
            .await
            .unwrap();

        assert_eq!(response.page_sections.len(), 1);
        assert_eq!(response.page_sections[0].page_section_id, headline_section_id);
        assert_eq!(response.live_page_site_locations[0].site_location_id, "FEATURED_TOPIC");
    }

    #[tokio::test]
    async fn test_tag_row_carries_group_color() {
        let row = row(RowTypeId::Tag);
        let page_row_id = row.page_row_id;

        let mut page_service = MockPageService::new();
        page_service
            .expect_find_page_by_page_row_id()
            .returning(|_| Ok(Some(page(PageStatusId::Live))));
        page_service
            .expect_find_page_row_tag_by_page_row_id()
            .returning(move |_| {
                Ok(Some(PageRowTag {
                    page_row_id,
                    tag_id: "ANXIETY".to_string(),
                }))
            });
        page_service
            .expect_find_tag_group_by_tag_id()
            .returning(|_| {
                Ok(Some(TagGroup {
                    tag_group_id: "SYMPTOMS".to_string(),
                    color_id: "BRAND_PRIMARY".to_string(),
                    name: "Symptoms".to_string(),
                    url_name: "symptoms".to_string(),
                    description: None,
                }))
            });

        let response = factory(page_service)
            .create_row(&CurrentContext::default(), &row)
            .await
            .unwrap();

        assert_eq!(response.tag_group_color_id.as_deref(), Some("BRAND_PRIMARY"));
        assert_eq!(response.tag.unwrap().name, "Anxiety");
        assert!(response.contents.is_none());
    }

    #[tokio::test]
    async fn test_two_column_row() {
        let row = row(RowTypeId::TwoColumnImage);

        let mut page_service = MockPageService::new();
        page_service
            .expect_find_page_by_page_row_id()
            .returning(|_| Ok(Some(page(PageStatusId::Draft))));
        page_service
            .expect_find_page_row_column()
            .times(2)
            .returning(|page_row_id, column_display_order| {
                Ok((column_display_order == 0).then(|| PageRowColumn {
                    page_row_column_id: Uuid::new_v4(),
                    page_row_id,
                    headline: Some("Left".to_string()),
                    description: None,
                    image_file_upload_id: None,
                    image_url: None,
                    image_alt_text: None,
                    column_display_order,
                }))
            });

        let response = factory(page_service)
            .create_row(&CurrentContext::default(), &row)
            .await
            .unwrap();

        assert_eq!(response.column_one.unwrap().headline.as_deref(), Some("Left"));
        assert!(response.column_two.is_none());
        assert!(response.column_three.is_none());
    }

    #[tokio::test]
    async fn test_resources_row_on_live_page_only_shows_live_content() {
        let row = row(RowTypeId::Resources);
        let page_row_id = row.page_row_id;

        let mut page_service = MockPageService::new();
        page_service
            .expect_find_page_by_page_row_id()
            .returning(|_| Ok(Some(page(PageStatusId::Live))));
        page_service
            .expect_find_content_by_page_row_id()
            .with(eq(page_row_id), eq(true))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let response = factory(page_service)
            .create_row(&CurrentContext::default(), &row)
            .await
            .unwrap();

        assert_eq!(response.contents.map(|contents| contents.len()), Some(0));
        assert!(response.group_sessions.is_none());
    }

    #[tokio::test]
    async fn test_mailing_list_row() {
        let row = row(RowTypeId::MailingList);
        let mailing_list_id = Uuid::new_v4();
        let page_row_id = row.page_row_id;

        let mut page_service = MockPageService::new();
        page_service
            .expect_find_page_by_page_row_id()
            .returning(|_| Ok(Some(page(PageStatusId::Live))));
        page_service
            .expect_find_page_row_mailing_list_by_page_row_id()
            .with(eq(page_row_id))
            .times(1)
            .returning(move |_| {
                Ok(Some(PageRowMailingList {
                    page_row_id,
                    mailing_list_id,
                    title: Some("Stay in touch".to_string()),
                    description: Some("<p>Monthly updates</p>".to_string()),
                }))
            });

        let response = factory(page_service)
            .create_row(&CurrentContext::default(), &row)
            .await
            .unwrap();

        assert_eq!(response.mailing_list_id, Some(mailing_list_id));
        assert_eq!(response.mailing_list_title.as_deref(), Some("Stay in touch"));
        assert_eq!(response.mailing_list_description.as_deref(), Some("<p>Monthly updates</p>"));
    }

    #[tokio::test]
    async fn test_mailing_list_row_without_signup_copy_keeps_row_list() {
        let mut row = row(RowTypeId::MailingList);
        let mailing_list_id = Uuid::new_v4();
        row.mailing_list_id = Some(mailing_list_id);

        let mut page_service = MockPageService::new();
        page_service
            .expect_find_page_by_page_row_id()
            .returning(|_| Ok(Some(page(PageStatusId::Live))));
        page_service
            .expect_find_page_row_mailing_list_by_page_row_id()
            .returning(|_| Ok(None));

        let response = factory(page_service)
            .create_row(&CurrentContext::default(), &row)
            .await
            .unwrap();

        assert_eq!(response.mailing_list_id, Some(mailing_list_id));
        assert!(response.mailing_list_title.is_none());
    }

    #[test]
    fn test_page_row_mailing_list_response() {
        let row = row(RowTypeId::MailingList);
        let mailing_list = PageRowMailingList {
            page_row_id: row.page_row_id,
            mailing_list_id: Uuid::new_v4(),
            title: Some("Newsletter".to_string()),
            description: None,
        };

        let json = serde_json::to_value(PageRowMailingListApiResponse::new(&row, &mailing_list)).unwrap();

        assert_eq!(json["rowTypeId"], "MAILING_LIST");
        assert_eq!(json["displayOrder"], 1);
        assert_eq!(json["title"], "Newsletter");
        assert_eq!(json["mailingListId"], serde_json::json!(mailing_list.mailing_list_id));
        assert!(json["description"].is_null());
    }

    #[tokio::test]
    async fn test_row_without_page_is_not_found() {
        let mut page_service = MockPageService::new();
        page_service.expect_find_page_by_page_row_id().returning(|_| Ok(None));

        let result = factory(page_service)
            .create_row(&CurrentContext::default(), &row(RowTypeId::TagGroup))
            .await;

        assert_matches!(result, Err(AppError::NotFound(_)));
    }
}
