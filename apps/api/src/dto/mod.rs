mod common;
mod menus;
mod sites;
mod team;

pub use common::{ActorIdentityResponse, HealthResponse};
pub use menus::{
    CreateMenuRequest, DeriveMenuItemRequest, MenuItemPayload, MenuResponse, SaveMenuRequest,
};
pub use sites::{
    CreateSiteRequest, PermissionFlagsResponse, SetActiveSiteRequest, SitePermissionsResponse,
    SiteResponse, UpdateSiteRequest,
};
pub use team::{AddMemberRequest, MembershipResponse, UpdateMemberRoleRequest};

#[cfg(test)]
mod tests {
    use super::{
        ActorIdentityResponse, AddMemberRequest, CreateMenuRequest, CreateSiteRequest,
        DeriveMenuItemRequest, HealthResponse, MembershipResponse, MenuItemPayload, MenuResponse,
        PermissionFlagsResponse, SaveMenuRequest, SetActiveSiteRequest, SitePermissionsResponse,
        SiteResponse, UpdateMemberRoleRequest, UpdateSiteRequest,
    };

    use std::path::Component;

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    fn stays_in_export_dir<T: TS>() -> bool {
        T::output_path().is_some_and(|path| {
            path.components()
                .all(|component| matches!(component, Component::Normal(_)))
        })
    }

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        ActorIdentityResponse::export(&config)?;
        SiteResponse::export(&config)?;
        CreateSiteRequest::export(&config)?;
        UpdateSiteRequest::export(&config)?;
        SetActiveSiteRequest::export(&config)?;
        PermissionFlagsResponse::export(&config)?;
        SitePermissionsResponse::export(&config)?;
        MembershipResponse::export(&config)?;
        AddMemberRequest::export(&config)?;
        UpdateMemberRoleRequest::export(&config)?;
        MenuResponse::export(&config)?;
        MenuItemPayload::export(&config)?;
        CreateMenuRequest::export(&config)?;
        SaveMenuRequest::export(&config)?;
        DeriveMenuItemRequest::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }

    #[test]
    fn bindings_are_written_inside_the_export_dir() {
        assert!(stays_in_export_dir::<ErrorResponse>());
        assert!(stays_in_export_dir::<SiteResponse>());
        assert!(stays_in_export_dir::<MembershipResponse>());
        assert!(stays_in_export_dir::<MenuItemPayload>());
        assert!(stays_in_export_dir::<HealthResponse>());
    }
}
