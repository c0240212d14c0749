use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wayfare_core::{ActorId, AppError, AppResult, NonEmptyString, SiteId};

/// Theme assigned to new sites when none is chosen.
pub const DEFAULT_THEME: &str = "default";

/// Maximum accepted slug length after normalization.
pub const SLUG_MAX_LENGTH: usize = 63;

/// URL slug normalized to lowercase ASCII alphanumerics and single hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteSlug(String);

impl SiteSlug {
    /// Normalizes raw input into a slug.
    ///
    /// Runs of characters outside `[a-z0-9]` collapse into a single hyphen and
    /// leading or trailing hyphens are dropped.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let mut slug = String::with_capacity(value.as_ref().len());
        let mut pending_hyphen = false;

        for character in value.as_ref().trim().chars() {
            let lowered = character.to_ascii_lowercase();
            if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(lowered);
            } else {
                pending_hyphen = true;
            }
        }

        if slug.is_empty() {
            return Err(AppError::Validation(format!(
                "slug '{}' has no letters or digits",
                value.as_ref()
            )));
        }

        if slug.len() > SLUG_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "slug must not exceed {SLUG_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(slug))
    }

    /// Returns the slug string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SiteSlug> for String {
    fn from(value: SiteSlug) -> Self {
        value.0
    }
}

/// Tenant boundary for every CMS resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    id: SiteId,
    owner_id: ActorId,
    name: NonEmptyString,
    slug: SiteSlug,
    theme: NonEmptyString,
    created_at: DateTime<Utc>,
}

impl Site {
    /// Creates a validated site.
    pub fn new(
        id: SiteId,
        owner_id: ActorId,
        name: impl Into<String>,
        slug: impl AsRef<str>,
        theme: Option<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let name = name.into();
        let theme = theme
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_owned());

        Ok(Self {
            id,
            owner_id,
            name: NonEmptyString::new(name.trim())?,
            slug: SiteSlug::new(slug)?,
            theme: NonEmptyString::new(theme)?,
            created_at,
        })
    }

    /// Returns the site identifier.
    #[must_use]
    pub fn id(&self) -> SiteId {
        self.id
    }

    /// Returns the owning actor.
    #[must_use]
    pub fn owner_id(&self) -> ActorId {
        self.owner_id
    }

    /// Returns whether the actor owns this site.
    #[must_use]
    pub fn is_owned_by(&self, actor_id: ActorId) -> bool {
        self.owner_id == actor_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the normalized slug.
    #[must_use]
    pub fn slug(&self) -> &SiteSlug {
        &self.slug
    }

    /// Returns the theme identifier.
    #[must_use]
    pub fn theme(&self) -> &str {
        self.theme.as_str()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy of the site with the patch applied.
    pub fn apply_patch(&self, patch: &SitePatch) -> AppResult<Self> {
        let mut updated = self.clone();

        if let Some(name) = &patch.name {
            updated.name = NonEmptyString::new(name.trim())?;
        }
        if let Some(slug) = &patch.slug {
            updated.slug = SiteSlug::new(slug)?;
        }
        if let Some(theme) = &patch.theme {
            updated.theme = NonEmptyString::new(theme.trim())?;
        }

        Ok(updated)
    }
}

/// Partial update for a site; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitePatch {
    /// New display name.
    pub name: Option<String>,
    /// New slug, normalized on apply.
    pub slug: Option<String>,
    /// New theme identifier.
    pub theme: Option<String>,
}

impl SitePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.theme.is_none()
    }
}
