use uuid::Uuid;
use wayfare_application::{DeriveMenuItemInput, SaveMenuInput};
use wayfare_core::{AppError, AppResult};
use wayfare_domain::{
    ContentKind, LinkTarget, Menu, MenuItem, MenuItemId, MenuItemType, MenuLocation,
};

use super::types::{DeriveMenuItemRequest, MenuItemPayload, MenuResponse, SaveMenuRequest};

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id().to_string(),
            site_id: menu.site_id().to_string(),
            name: menu.name().as_str().to_owned(),
            location: menu.location().as_str().to_owned(),
            items: menu.items().iter().map(MenuItemPayload::from).collect(),
            version: menu.version(),
            updated_at: menu.updated_at().to_rfc3339(),
        }
    }
}

impl From<&MenuItem> for MenuItemPayload {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id().as_str().to_owned(),
            label: item.label().to_owned(),
            url: item.url().to_owned(),
            item_type: item.item_type().as_str().to_owned(),
            target: item.target().as_str().to_owned(),
            children: item.children().iter().map(Self::from).collect(),
        }
    }
}

impl TryFrom<MenuItemPayload> for MenuItem {
    type Error = AppError;

    fn try_from(payload: MenuItemPayload) -> Result<Self, Self::Error> {
        let children = payload
            .children
            .into_iter()
            .map(MenuItem::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        MenuItem::new(
            MenuItemId::new(payload.id)?,
            payload.label,
            payload.url,
            MenuItemType::parse(payload.item_type.as_str())?,
            LinkTarget::parse(payload.target.as_str())?,
            children,
        )
    }
}

impl SaveMenuRequest {
    /// Validates the payload into a service input.
    pub fn into_input(self) -> AppResult<SaveMenuInput> {
        Ok(SaveMenuInput {
            location: MenuLocation::parse(self.location.as_str())?,
            items: self
                .items
                .into_iter()
                .map(MenuItem::try_from)
                .collect::<AppResult<Vec<_>>>()?,
            name: self.name,
            expected_version: self.expected_version,
        })
    }
}

impl DeriveMenuItemRequest {
    /// Validates the payload into a service input.
    pub fn into_input(self) -> AppResult<DeriveMenuItemInput> {
        let content_id = Uuid::parse_str(self.content_id.trim()).map_err(|error| {
            AppError::Validation(format!("invalid content id '{}': {error}", self.content_id))
        })?;

        Ok(DeriveMenuItemInput {
            kind: ContentKind::parse(self.kind.as_str())?,
            content_id,
            target: self
                .target
                .as_deref()
                .map(LinkTarget::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}
