//! Pluggable external reservation feeds.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use staybook_shared::config::{IntegrationsConfig, PlatformApiConfig};
use uuid::Uuid;

use super::error::FeedError;
use crate::reservation::{DateWindow, Platform, ReservationDraft};

/// Property a feed is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedProperty {
    /// Property ID.
    pub id: Uuid,
    /// Property display name.
    pub name: String,
}

/// Source of reservations booked outside the system.
#[async_trait::async_trait]
pub trait ReservationFeed: Send + Sync {
    /// Platform the feed reads from.
    fn platform(&self) -> Platform;

    /// Fetches the reservations of `property` overlapping `window`.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the platform cannot be queried.
    async fn fetch_external_reservations(
        &self,
        property: &FeedProperty,
        window: &DateWindow,
    ) -> Result<Vec<ReservationDraft>, FeedError>;
}

/// Feed backed by a platform's partner API.
///
/// Partner API access is not wired up yet, so the feed reports no
/// reservations once credentials are present.
#[derive(Debug, Clone)]
pub struct PlatformApiFeed {
    platform: Platform,
    api_url: Option<String>,
}

impl PlatformApiFeed {
    /// Builds the feed if the platform has an API key.
    #[must_use]
    pub fn from_config(platform: Platform, config: &PlatformApiConfig) -> Option<Self> {
        config.is_configured().then(|| Self {
            platform,
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl ReservationFeed for PlatformApiFeed {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_external_reservations(
        &self,
        property: &FeedProperty,
        window: &DateWindow,
    ) -> Result<Vec<ReservationDraft>, FeedError> {
        tracing::debug!(
            platform = %self.platform,
            api_url = ?self.api_url,
            property_id = %property.id,
            desde = %window.desde,
            hasta = %window.hasta,
            "Fetching external reservations"
        );
        Ok(Vec::new())
    }
}

/// Feeds available to the sync endpoint, keyed by platform.
#[derive(Clone, Default)]
pub struct FeedRegistry {
    feeds: HashMap<Platform, Arc<dyn ReservationFeed>>,
}

impl FeedRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the platform feeds that have credentials.
    #[must_use]
    pub fn from_config(config: &IntegrationsConfig) -> Self {
        let mut registry = Self::new();
        if let Some(feed) = PlatformApiFeed::from_config(Platform::Airbnb, &config.airbnb) {
            registry.register(Arc::new(feed));
        }
        if let Some(feed) = PlatformApiFeed::from_config(Platform::Booking, &config.booking) {
            registry.register(Arc::new(feed));
        }
        registry
    }

    /// Registers a feed, replacing any feed for the same platform.
    pub fn register(&mut self, feed: Arc<dyn ReservationFeed>) {
        self.feeds.insert(feed.platform(), feed);
    }

    /// Returns the feed for a platform.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::UnsupportedPlatform` for platforms without a
    /// partner API and `FeedError::NotConfigured` when credentials are missing.
    pub fn get(&self, platform: Platform) -> Result<Arc<dyn ReservationFeed>, FeedError> {
        if !matches!(platform, Platform::Airbnb | Platform::Booking) {
            return Err(FeedError::UnsupportedPlatform(platform.as_str().to_string()));
        }
        self.feeds
            .get(&platform)
            .cloned()
            .ok_or(FeedError::NotConfigured(platform))
    }
}

impl std::fmt::Debug for FeedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRegistry")
            .field("platforms", &self.feeds.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Outcome of a sync or import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Human readable result.
    pub message: String,
    /// Property display name.
    pub property: String,
    /// Source of the reservations.
    pub source: String,
    /// Window that was synced, absent for file imports.
    pub desde: Option<chrono::NaiveDate>,
    /// Window end.
    pub hasta: Option<chrono::NaiveDate>,
    /// Reservations created.
    pub created: u32,
    /// Reservations skipped because they already existed or overlapped.
    pub skipped: u32,
    /// Rows or drafts that failed validation.
    pub rejected: u32,
}

/// Counters collected while applying drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncCounts {
    /// Reservations created.
    pub created: u32,
    /// Exact duplicates and overlapping drafts.
    pub skipped: u32,
    /// Invalid drafts.
    pub rejected: u32,
}

impl SyncOutcome {
    /// Builds the outcome of a platform sync.
    #[must_use]
    pub fn for_sync(
        property: &FeedProperty,
        platform: Platform,
        window: &DateWindow,
        counts: SyncCounts,
    ) -> Self {
        Self {
            message: format!(
                "Sync completed: {} new reservations, {} skipped, {} rejected",
                counts.created, counts.skipped, counts.rejected
            ),
            property: property.name.clone(),
            source: platform.label().to_string(),
            desde: Some(window.desde),
            hasta: Some(window.hasta),
            created: counts.created,
            skipped: counts.skipped,
            rejected: counts.rejected,
        }
    }

    /// Builds the outcome of a file import.
    #[must_use]
    pub fn for_import(property: &FeedProperty, counts: SyncCounts) -> Self {
        Self {
            message: format!(
                "Import completed: {} new reservations, {} skipped, {} rejected",
                counts.created, counts.skipped, counts.rejected
            ),
            property: property.name.clone(),
            source: "CSV".to_string(),
            desde: None,
            hasta: None,
            created: counts.created,
            skipped: counts.skipped,
            rejected: counts.rejected,
        }
    }
}
