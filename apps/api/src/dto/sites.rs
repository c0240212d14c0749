use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wayfare_application::SitePermissions;
use wayfare_domain::{Capability, PermissionSet, Site, SitePatch};

/// API representation of a site.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/site-response.ts")]
pub struct SiteResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub slug: String,
    pub theme: String,
    pub created_at: String,
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self {
            id: site.id().to_string(),
            owner_id: site.owner_id().to_string(),
            name: site.name().as_str().to_owned(),
            slug: site.slug().as_str().to_owned(),
            theme: site.theme().to_owned(),
            created_at: site.created_at().to_rfc3339(),
        }
    }
}

/// Incoming payload for site creation.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/create-site-request.ts")]
pub struct CreateSiteRequest {
    pub name: String,
    pub slug: String,
}

/// Incoming payload for a partial site update.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "api-types/update-site-request.ts")]
pub struct UpdateSiteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl From<UpdateSiteRequest> for SitePatch {
    fn from(value: UpdateSiteRequest) -> Self {
        Self {
            name: value.name,
            slug: value.slug,
            theme: value.theme,
        }
    }
}

/// Incoming payload for switching the active site.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/set-active-site-request.ts")]
pub struct SetActiveSiteRequest {
    pub site_id: String,
}

/// Capability flags keyed the way the admin UI reads them.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api-types/permission-flags-response.ts")]
pub struct PermissionFlagsResponse {
    pub can_manage_team: bool,
    pub can_manage_settings: bool,
    pub can_manage_menus: bool,
    pub can_manage_database: bool,
    pub can_export_data: bool,
    pub can_manage_pages: bool,
    pub can_manage_posts: bool,
    pub can_manage_media: bool,
    pub can_delete_site: bool,
    pub can_edit_others_content: bool,
}

impl From<PermissionSet> for PermissionFlagsResponse {
    fn from(value: PermissionSet) -> Self {
        Self {
            can_manage_team: value.can_manage_team,
            can_manage_settings: value.can_manage_settings,
            can_manage_menus: value.can_manage_menus,
            can_manage_database: value.can_manage_database,
            can_export_data: value.can_export_data,
            can_manage_pages: value.can_manage_pages,
            can_manage_posts: value.can_manage_posts,
            can_manage_media: value.can_manage_media,
            can_delete_site: value.can_delete_site,
            can_edit_others_content: value.can_edit_others_content,
        }
    }
}

/// Effective role and capabilities of the caller on a site.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/site-permissions-response.ts")]
pub struct SitePermissionsResponse {
    pub role: Option<String>,
    pub permissions: PermissionFlagsResponse,
    pub capabilities: Vec<String>,
}

impl From<SitePermissions> for SitePermissionsResponse {
    fn from(value: SitePermissions) -> Self {
        Self {
            role: value.role.map(|role| role.as_str().to_owned()),
            capabilities: value
                .permissions
                .granted()
                .iter()
                .map(Capability::as_str)
                .map(ToOwned::to_owned)
                .collect(),
            permissions: PermissionFlagsResponse::from(value.permissions),
        }
    }
}
