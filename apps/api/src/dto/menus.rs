mod conversions;
mod types;

pub use types::{
    CreateMenuRequest, DeriveMenuItemRequest, MenuItemPayload, MenuResponse, SaveMenuRequest,
};
