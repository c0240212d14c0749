use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_core::{AppError, AppResult, NonEmptyString, SiteId};

use crate::{MenuItem, MenuItemId};

/// Unique identifier for a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuId(Uuid);

impl MenuId {
    /// Creates a random menu identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a menu identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MenuId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MenuId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for MenuId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid menu id '{value}': {error}")))
    }
}

/// Theme slot a menu renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuLocation {
    /// Main header navigation.
    Primary,
    /// Footer links.
    Footer,
    /// Mobile drawer.
    Mobile,
    /// Sidebar widget.
    Sidebar,
}

impl MenuLocation {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Footer => "footer",
            Self::Mobile => "mobile",
            Self::Sidebar => "sidebar",
        }
    }

    /// Parses a stored value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "primary" => Ok(Self::Primary),
            "footer" => Ok(Self::Footer),
            "mobile" => Ok(Self::Mobile),
            "sidebar" => Ok(Self::Sidebar),
            _ => Err(AppError::Validation(format!(
                "unknown menu location '{value}'"
            ))),
        }
    }
}

/// Moves the dragged item to the target's index.
///
/// Returns the list unchanged when both ids are equal or either id is absent.
/// Only the given list is touched, so items never move across parents.
#[must_use]
pub fn reorder(
    items: &[MenuItem],
    dragged_id: &MenuItemId,
    target_id: &MenuItemId,
) -> Vec<MenuItem> {
    let mut reordered = items.to_vec();
    if dragged_id == target_id {
        return reordered;
    }

    let dragged_index = items.iter().position(|item| item.id() == dragged_id);
    let target_index = items.iter().position(|item| item.id() == target_id);
    let (Some(dragged_index), Some(target_index)) = (dragged_index, target_index) else {
        return reordered;
    };

    let dragged = reordered.remove(dragged_index);
    reordered.insert(target_index, dragged);
    reordered
}

/// Named, located navigation tree of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    id: MenuId,
    site_id: SiteId,
    name: NonEmptyString,
    location: MenuLocation,
    items: Vec<MenuItem>,
    version: u64,
    updated_at: DateTime<Utc>,
}

impl Menu {
    /// Creates a validated menu.
    pub fn new(
        id: MenuId,
        site_id: SiteId,
        name: impl Into<String>,
        location: MenuLocation,
        items: Vec<MenuItem>,
        version: u64,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let name = name.into();
        validate_items(&items)?;

        Ok(Self {
            id,
            site_id,
            name: NonEmptyString::new(name.trim())?,
            location,
            items,
            version: version.max(1),
            updated_at,
        })
    }

    /// Creates an empty menu at version one.
    pub fn create(
        site_id: SiteId,
        name: impl Into<String>,
        location: MenuLocation,
    ) -> AppResult<Self> {
        Self::new(
            MenuId::new(),
            site_id,
            name,
            location,
            Vec::new(),
            1,
            Utc::now(),
        )
    }

    /// Returns the menu identifier.
    #[must_use]
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Returns the owning site.
    #[must_use]
    pub fn site_id(&self) -> SiteId {
        self.site_id
    }

    /// Returns the menu name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the theme location.
    #[must_use]
    pub fn location(&self) -> MenuLocation {
        self.location
    }

    /// Returns the ordered top-level items.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Returns the persisted version counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the last save timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the menu.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<()> {
        let name = name.into();
        self.name = NonEmptyString::new(name.trim())?;
        Ok(())
    }

    /// Moves the menu to another theme location.
    pub fn relocate(&mut self, location: MenuLocation) {
        self.location = location;
    }

    /// Appends a top-level item.
    pub fn add_item(&mut self, item: MenuItem) -> AppResult<()> {
        let mut candidate = self.items.clone();
        candidate.push(item);
        validate_items(&candidate)?;
        self.items = candidate;
        Ok(())
    }

    /// Replaces the top-level item with the same id.
    ///
    /// Children are edited by replacing their parent item as a whole.
    pub fn update_item(&mut self, item: MenuItem) -> AppResult<()> {
        let index = self.top_level_index(item.id())?;
        let mut candidate = self.items.clone();
        candidate[index] = item;
        validate_items(&candidate)?;
        self.items = candidate;
        Ok(())
    }

    /// Removes the top-level item with the id, together with its children.
    pub fn remove_item(&mut self, item_id: &MenuItemId) -> AppResult<MenuItem> {
        let index = self.top_level_index(item_id)?;
        Ok(self.items.remove(index))
    }

    /// Drag-reorders the top-level list.
    pub fn reorder_items(&mut self, dragged_id: &MenuItemId, target_id: &MenuItemId) {
        self.items = reorder(&self.items, dragged_id, target_id);
    }

    /// Drag-reorders the children of one top-level item.
    pub fn reorder_children(
        &mut self,
        parent_id: &MenuItemId,
        dragged_id: &MenuItemId,
        target_id: &MenuItemId,
    ) -> AppResult<()> {
        let index = self.top_level_index(parent_id)?;
        let parent = &self.items[index];
        let children = reorder(parent.children(), dragged_id, target_id);
        self.items[index] = parent.with_children(children)?;
        Ok(())
    }

    /// Replaces the whole item list.
    pub fn replace_items(&mut self, items: Vec<MenuItem>) -> AppResult<()> {
        validate_items(&items)?;
        self.items = items;
        Ok(())
    }

    /// Returns a copy marked as the next saved version.
    #[must_use]
    pub fn next_version(&self, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: self.version.saturating_add(1),
            updated_at: saved_at,
            ..self.clone()
        }
    }

    fn top_level_index(&self, item_id: &MenuItemId) -> AppResult<usize> {
        self.items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "menu item '{item_id}' is not a top-level item of menu '{}'",
                    self.id
                ))
            })
    }
}

fn validate_items(items: &[MenuItem]) -> AppResult<()> {
    let mut seen = HashSet::new();
    let mut duplicate = None;

    for item in items {
        item.validate_tree(0)?;
        item.walk(&mut |node| {
            if !seen.insert(node.id().as_str()) && duplicate.is_none() {
                duplicate = Some(node.id().as_str().to_owned());
            }
        });
    }

    match duplicate {
        Some(item_id) => Err(AppError::Validation(format!(
            "menu item id '{item_id}' is used more than once"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use wayfare_core::SiteId;

    use super::{Menu, MenuLocation, reorder};
    use crate::{LinkTarget, MenuItem, MenuItemId, MenuItemType};

    fn id(value: &str) -> MenuItemId {
        MenuItemId::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn leaf(value: &str, label: &str) -> MenuItem {
        MenuItem::new(
            id(value),
            label,
            format!("/{value}"),
            MenuItemType::Custom,
            LinkTarget::SameWindow,
            Vec::new(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn ids(items: &[MenuItem]) -> Vec<String> {
        items.iter().map(|item| item.id().as_str().to_owned()).collect()
    }

    fn numbered(count: usize) -> Vec<MenuItem> {
        (0..count)
            .map(|index| leaf(&format!("item-{index}"), &format!("Item {index}")))
            .collect()
    }

    fn menu_with(items: Vec<MenuItem>) -> Menu {
        let mut menu = Menu::create(SiteId::new(), "Main", MenuLocation::Primary)
            .unwrap_or_else(|_| unreachable!());
        assert!(menu.replace_items(items).is_ok());
        menu
    }

    #[test]
    fn contact_moves_in_front_of_home() {
        let items = vec![
            leaf("h", "Home"),
            leaf("a", "About"),
            leaf("c", "Contact"),
        ];

        let reordered = reorder(&items, &id("c"), &id("h"));

        let labels: Vec<&str> = reordered.iter().map(MenuItem::label).collect();
        assert_eq!(labels, vec!["Contact", "Home", "About"]);
    }

    #[test]
    fn reorder_ignores_unknown_ids() {
        let items = numbered(3);
        assert_eq!(reorder(&items, &id("missing"), &id("item-0")), items);
        assert_eq!(reorder(&items, &id("item-0"), &id("missing")), items);
    }

    #[test]
    fn reorder_children_stays_within_parent() {
        let parent = leaf("tours", "Tours")
            .with_children(vec![leaf("europe", "Europe"), leaf("asia", "Asia")])
            .unwrap_or_else(|_| unreachable!());
        let mut menu = menu_with(vec![leaf("home", "Home"), parent]);

        assert!(menu
            .reorder_children(&id("tours"), &id("asia"), &id("europe"))
            .is_ok());
        assert_eq!(ids(menu.items()), vec!["home", "tours"]);
        assert_eq!(ids(menu.items()[1].children()), vec!["asia", "europe"]);

        menu.reorder_items(&id("asia"), &id("home"));
        assert_eq!(ids(menu.items()), vec!["home", "tours"]);
    }

    #[test]
    fn add_update_remove_operate_on_top_level() {
        let parent = leaf("tours", "Tours")
            .with_children(vec![leaf("europe", "Europe")])
            .unwrap_or_else(|_| unreachable!());
        let mut menu = menu_with(vec![parent]);

        assert!(menu.add_item(leaf("blog", "Blog")).is_ok());
        assert!(menu.add_item(leaf("europe", "Duplicate")).is_err());

        assert!(menu.update_item(leaf("blog", "Journal")).is_ok());
        assert_eq!(menu.items()[1].label(), "Journal");

        assert!(menu.remove_item(&id("europe")).is_err());
        assert!(menu.update_item(leaf("europe", "Europe")).is_err());

        let removed = menu.remove_item(&id("tours"));
        assert_eq!(removed.map(|item| item.children().len()).ok(), Some(1));
        assert_eq!(ids(menu.items()), vec!["blog"]);
    }

    #[test]
    fn next_version_increments_counter() {
        let menu = menu_with(Vec::new());
        let saved = menu.next_version(chrono::Utc::now());
        assert_eq!(saved.version(), menu.version() + 1);
        assert_eq!(saved.id(), menu.id());
    }

    #[test]
    fn location_roundtrip_storage_value() {
        for location in [
            MenuLocation::Primary,
            MenuLocation::Footer,
            MenuLocation::Mobile,
            MenuLocation::Sidebar,
        ] {
            assert_eq!(MenuLocation::parse(location.as_str()).ok(), Some(location));
        }
        assert!(MenuLocation::parse("header").is_err());
    }

    proptest! {
        #[test]
        fn reorder_preserves_ids(count in 1usize..12, from in 0usize..12, to in 0usize..12) {
            let items = numbered(count);
            let from = from % count;
            let to = to % count;

            let reordered = reorder(&items, items[from].id(), items[to].id());

            let mut before = ids(&items);
            let mut after = ids(&reordered);
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn reorder_with_same_ids_is_noop(count in 1usize..12, index in 0usize..12) {
            let items = numbered(count);
            let index = index % count;

            let reordered = reorder(&items, items[index].id(), items[index].id());

            prop_assert_eq!(reordered, items);
        }

        #[test]
        fn reorder_lands_on_target_index(count in 2usize..12, from in 0usize..12, to in 0usize..12) {
            let items = numbered(count);
            let from = from % count;
            let to = to % count;
            prop_assume!(from != to);

            let reordered = reorder(&items, items[from].id(), items[to].id());

            prop_assert_eq!(reordered[to].id(), items[from].id());
            let others_before: Vec<String> = ids(&items)
                .into_iter()
                .enumerate()
                .filter(|(index, _)| *index != from)
                .map(|(_, value)| value)
                .collect();
            let others_after: Vec<String> = ids(&reordered)
                .into_iter()
                .enumerate()
                .filter(|(index, _)| *index != to)
                .map(|(_, value)| value)
                .collect();
            prop_assert_eq!(others_before, others_after);
        }
    }
}
