use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use wayfare_core::{AppError, AppResult, NonEmptyString};

/// Levels of children allowed below a top-level menu item.
pub const MAX_MENU_NESTING: usize = 1;

/// Client-assigned identifier of a menu item, unique within its menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(String);

impl MenuItemId {
    /// Creates a validated item identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "menu item id must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a random identifier for a new item.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for MenuItemId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Kind of destination a menu item links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemType {
    /// CMS page; label and url derive from the page.
    Page,
    /// Blog post; label and url derive from the post.
    Post,
    /// Free-form url.
    Custom,
    /// Category listing with a user-supplied url.
    Category,
}

impl MenuItemType {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Post => "post",
            Self::Custom => "custom",
            Self::Category => "category",
        }
    }

    /// Parses a stored value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "page" => Ok(Self::Page),
            "post" => Ok(Self::Post),
            "custom" => Ok(Self::Custom),
            "category" => Ok(Self::Category),
            _ => Err(AppError::Validation(format!(
                "unknown menu item type '{value}'"
            ))),
        }
    }

    /// Returns whether label and url come from linked content.
    #[must_use]
    pub fn derives_from_content(&self) -> bool {
        matches!(self, Self::Page | Self::Post)
    }
}

/// Browser window a link opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkTarget {
    /// Same window.
    #[default]
    #[serde(rename = "_self")]
    SameWindow,
    /// New window or tab.
    #[serde(rename = "_blank")]
    NewWindow,
}

impl LinkTarget {
    /// Returns the HTML target attribute value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameWindow => "_self",
            Self::NewWindow => "_blank",
        }
    }

    /// Parses an HTML target attribute value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "_self" => Ok(Self::SameWindow),
            "_blank" => Ok(Self::NewWindow),
            _ => Err(AppError::Validation(format!(
                "unknown link target '{value}'"
            ))),
        }
    }
}

/// Kind of CMS content a menu item can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// CMS page.
    Page,
    /// Blog post.
    Post,
}

impl ContentKind {
    /// Returns the menu item type that links to this kind.
    #[must_use]
    pub fn item_type(&self) -> MenuItemType {
        match self {
            Self::Page => MenuItemType::Page,
            Self::Post => MenuItemType::Post,
        }
    }

    /// Parses a transport value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "page" => Ok(Self::Page),
            "post" => Ok(Self::Post),
            _ => Err(AppError::Validation(format!(
                "unknown content kind '{value}'"
            ))),
        }
    }
}

/// Page or post a menu item derives its label and url from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedContent {
    kind: ContentKind,
    title: NonEmptyString,
    slug: NonEmptyString,
}

impl LinkedContent {
    /// Creates linked content from a page or post title and slug.
    pub fn new(
        kind: ContentKind,
        title: impl Into<String>,
        slug: impl Into<String>,
    ) -> AppResult<Self> {
        let slug = slug.into();
        Ok(Self {
            kind,
            title: NonEmptyString::new(title)?,
            slug: NonEmptyString::new(slug.trim().trim_matches('/'))?,
        })
    }

    /// Returns the content kind.
    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Returns the content title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the public path of the content.
    #[must_use]
    pub fn url(&self) -> String {
        match self.kind {
            ContentKind::Page => format!("/{}", self.slug.as_str()),
            ContentKind::Post => format!("/blog/{}", self.slug.as_str()),
        }
    }
}

/// Navigation node persisted inside a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    id: MenuItemId,
    label: NonEmptyString,
    url: NonEmptyString,
    item_type: MenuItemType,
    #[serde(default)]
    target: LinkTarget,
    #[serde(default)]
    children: Vec<MenuItem>,
}

impl MenuItem {
    /// Creates a validated menu item.
    pub fn new(
        id: MenuItemId,
        label: impl Into<String>,
        url: impl Into<String>,
        item_type: MenuItemType,
        target: LinkTarget,
        children: Vec<MenuItem>,
    ) -> AppResult<Self> {
        let label = label.into();
        let url = url.into();
        let item = Self {
            label: NonEmptyString::new(label.trim()).map_err(|_| {
                AppError::Validation(format!("menu item '{id}' requires a label"))
            })?,
            url: NonEmptyString::new(url.trim())
                .map_err(|_| AppError::Validation(format!("menu item '{id}' requires a url")))?,
            id,
            item_type,
            target,
            children,
        };

        item.validate_tree(0)?;
        Ok(item)
    }

    /// Returns the item identifier.
    #[must_use]
    pub fn id(&self) -> &MenuItemId {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the destination url.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the item type.
    #[must_use]
    pub fn item_type(&self) -> MenuItemType {
        self.item_type
    }

    /// Returns the link target window.
    #[must_use]
    pub fn target(&self) -> LinkTarget {
        self.target
    }

    /// Returns the ordered children.
    #[must_use]
    pub fn children(&self) -> &[MenuItem] {
        &self.children
    }

    /// Returns a copy with the children replaced.
    pub fn with_children(&self, children: Vec<MenuItem>) -> AppResult<Self> {
        let item = Self {
            children,
            ..self.clone()
        };
        item.validate_tree(0)?;
        Ok(item)
    }

    /// Visits this item and all descendants depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a MenuItem)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Checks nesting depth and, for deserialized trees, non-blank fields.
    pub(crate) fn validate_tree(&self, depth: usize) -> AppResult<()> {
        if self.id.as_str().trim().is_empty()
            || self.label.as_str().trim().is_empty()
            || self.url.as_str().trim().is_empty()
        {
            return Err(AppError::Validation(format!(
                "menu item '{}' requires an id, a label and a url",
                self.id
            )));
        }

        if depth > MAX_MENU_NESTING {
            return Err(AppError::Validation(format!(
                "menu item '{}' is nested deeper than {MAX_MENU_NESTING} level",
                self.id
            )));
        }

        for child in &self.children {
            child.validate_tree(depth + 1)?;
        }

        Ok(())
    }
}

/// Editor state for one menu item before it is saved.
///
/// The url is read-only while the type is `page` or `post`; both label and
/// url are then taken from the linked content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemDraft {
    id: MenuItemId,
    label: String,
    url: String,
    item_type: MenuItemType,
    target: LinkTarget,
    children: Vec<MenuItem>,
}

impl MenuItemDraft {
    /// Starts a blank custom-link draft.
    #[must_use]
    pub fn new(id: MenuItemId) -> Self {
        Self {
            id,
            label: String::new(),
            url: String::new(),
            item_type: MenuItemType::Custom,
            target: LinkTarget::SameWindow,
            children: Vec::new(),
        }
    }

    /// Switches the item type, clearing label and url.
    pub fn select_type(&mut self, item_type: MenuItemType) {
        if self.item_type == item_type {
            return;
        }

        self.item_type = item_type;
        self.label.clear();
        self.url.clear();
    }

    /// Derives label and url from a page or post.
    pub fn link_content(&mut self, content: &LinkedContent) -> AppResult<()> {
        let content_type = content.kind().item_type();
        if !self.item_type.derives_from_content() {
            self.item_type = content_type;
        } else if self.item_type != content_type {
            return Err(AppError::Validation(format!(
                "cannot link {} content to a '{}' menu item",
                content_type.as_str(),
                self.item_type.as_str()
            )));
        }

        self.label = content.title().to_owned();
        self.url = content.url();
        Ok(())
    }

    /// Returns whether the url may be edited by hand.
    #[must_use]
    pub fn url_is_editable(&self) -> bool {
        !self.item_type.derives_from_content()
    }

    /// Sets the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Sets the url for custom and category items.
    pub fn set_url(&mut self, url: impl Into<String>) -> AppResult<()> {
        if !self.url_is_editable() {
            return Err(AppError::Validation(format!(
                "url of a '{}' menu item is derived from its content",
                self.item_type.as_str()
            )));
        }

        self.url = url.into();
        Ok(())
    }

    /// Sets the link target window.
    pub fn set_target(&mut self, target: LinkTarget) {
        self.target = target;
    }

    /// Returns the current item type.
    #[must_use]
    pub fn item_type(&self) -> MenuItemType {
        self.item_type
    }

    /// Returns the current label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the current url.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Validates the draft into a persistable item.
    pub fn into_item(self) -> AppResult<MenuItem> {
        MenuItem::new(
            self.id,
            self.label,
            self.url,
            self.item_type,
            self.target,
            self.children,
        )
    }
}
