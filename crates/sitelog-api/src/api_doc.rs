//! OpenAPI document.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::checklists::{ChecklistDetailView, ChecklistView};
use crate::handlers::groups::CreateGroupResponse;
use crate::handlers::login::{LoginRequest, LoginResponse};
use crate::handlers::overview::OverviewView;
use crate::handlers::photos::{PhotoMutationResponse, PhotosPageView};
use crate::handlers::placeholders::PlaceholderView;
use crate::handlers::projects::{
    CreateDocumentRequest, CreateDocumentResponse, ProjectDetailView, ProjectsPageView,
};
use crate::handlers::templates::TemplatesPageView;
use crate::handlers::users::{InviteEntry, InviteUsersRequest, InviteUsersResponse};
use sitelog_core::batch::{BatchOutcome, BatchReport};
use sitelog_core::models::{
    AlbumPage, Checklist, ChecklistItem, ChecklistTemplate, CreateCatalogEntryRequest,
    CreateCatalogEntryResponse, CreateChecklistRequest, CreateChecklistResponse,
    CreateGroupRequest, CreateProjectRequest, CreateProjectResponse, CreateReportRequest,
    CreateReportResponse, Group, GroupView, ItemState, Label, MemberView, PhotoView, Profile,
    Project, ProjectDocument, ProjectView, Report, ReportStatus, Role, TagsInput,
    UpdatePhotoRequest,
};
use sitelog_core::summary::{ChecklistSummary, PhotoCounts};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sitelog Admin API",
        description = "Admin console backend: session-scoped view models and CRUD routes"
    ),
    paths(
        crate::handlers::login::login,
        crate::handlers::login::logout,
        crate::handlers::overview::overview_page,
        crate::handlers::projects::projects_page,
        crate::handlers::projects::project_detail_page,
        crate::handlers::projects::create_project,
        crate::handlers::projects::create_document,
        crate::handlers::photos::photos_page,
        crate::handlers::photos::update_photo,
        crate::handlers::photos::delete_photo,
        crate::handlers::checklists::checklists_page,
        crate::handlers::checklists::checklist_detail_page,
        crate::handlers::checklists::create_checklist,
        crate::handlers::reports::reports_page,
        crate::handlers::reports::create_report,
        crate::handlers::groups::groups_page,
        crate::handlers::groups::create_group,
        crate::handlers::users::users_page,
        crate::handlers::users::invite_users,
        crate::handlers::templates::templates_page,
        crate::handlers::placeholders::portfolio_page,
        crate::handlers::placeholders::integrations_page,
        crate::handlers::placeholders::map_page,
        crate::handlers::placeholders::payments_page,
        crate::handlers::templates::create_label,
        crate::handlers::templates::create_page,
        crate::handlers::templates::create_checklist_template,
    ),
    components(schemas(
        ErrorResponse,
        LoginRequest,
        LoginResponse,
        OverviewView,
        ProjectsPageView,
        ProjectDetailView,
        PhotosPageView,
        PhotoMutationResponse,
        PlaceholderView,
        ChecklistView,
        ChecklistDetailView,
        TemplatesPageView,
        CreateDocumentRequest,
        CreateDocumentResponse,
        CreateGroupResponse,
        InviteEntry,
        InviteUsersRequest,
        InviteUsersResponse,
        BatchOutcome,
        BatchReport,
        ChecklistSummary,
        PhotoCounts,
        Role,
        Profile,
        MemberView,
        Project,
        ProjectView,
        CreateProjectRequest,
        CreateProjectResponse,
        PhotoView,
        UpdatePhotoRequest,
        TagsInput,
        Checklist,
        ChecklistItem,
        ItemState,
        ChecklistTemplate,
        CreateChecklistRequest,
        CreateChecklistResponse,
        Report,
        ReportStatus,
        CreateReportRequest,
        CreateReportResponse,
        Group,
        GroupView,
        CreateGroupRequest,
        Label,
        AlbumPage,
        ProjectDocument,
        CreateCatalogEntryRequest,
        CreateCatalogEntryResponse,
    )),
    tags(
        (name = "auth", description = "Session management"),
        (name = "pages", description = "Authorized page view models"),
        (name = "projects", description = "Project management"),
        (name = "photos", description = "Photo metadata and deletion"),
        (name = "checklists", description = "Checklist management"),
        (name = "reports", description = "Report management"),
        (name = "groups", description = "User groups"),
        (name = "users", description = "Organization users and invites"),
        (name = "templates", description = "Labels, pages and checklist templates"),
    )
)]
pub struct ApiDoc;
