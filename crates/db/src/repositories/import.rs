//! Import repository: stores reservations coming from platform feeds and
//! CSV files through the normal create path.

use sea_orm::DatabaseConnection;
use staybook_core::integration::{
    FeedProperty, ReservationFeed, SyncCounts, SyncOutcome, parse_reservations_csv,
};
use staybook_core::reservation::{DateWindow, ReservationDraft, ReservationError};
use uuid::Uuid;

use super::error::{ImportError, ReservationStoreError};
use super::property::PropertyRepository;
use super::reservation::ReservationRepository;

/// Import repository.
#[derive(Debug, Clone)]
pub struct ImportRepository {
    properties: PropertyRepository,
    reservations: ReservationRepository,
}

impl ImportRepository {
    /// Creates a new import repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            properties: PropertyRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }

    /// Pulls the reservations of `property_id` from `feed` and stores the new ones.
    pub async fn sync(
        &self,
        feed: &dyn ReservationFeed,
        property_id: Uuid,
        window: DateWindow,
    ) -> Result<SyncOutcome, ImportError> {
        let property = self.feed_property(property_id).await?;
        let drafts = feed.fetch_external_reservations(&property, &window).await?;

        let counts = self.store(&property, drafts).await?;
        tracing::info!(
            platform = %feed.platform(),
            property_id = %property.id,
            created = counts.created,
            skipped = counts.skipped,
            rejected = counts.rejected,
            "Feed sync completed"
        );
        Ok(SyncOutcome::for_sync(
            &property,
            feed.platform(),
            &window,
            counts,
        ))
    }

    /// Imports the reservations of a CSV export into `property_id`.
    pub async fn import_csv(
        &self,
        property_id: Uuid,
        data: &[u8],
    ) -> Result<SyncOutcome, ImportError> {
        let property = self.feed_property(property_id).await?;
        let parsed = parse_reservations_csv(property.id, data)?;

        for row in &parsed.rejected {
            tracing::warn!(line = row.line, reason = %row.reason, "Skipping unreadable CSV row");
        }

        let mut counts = self.store(&property, parsed.drafts).await?;
        counts.rejected = counts.rejected.saturating_add(count(parsed.rejected.len()));

        tracing::info!(
            property_id = %property.id,
            created = counts.created,
            skipped = counts.skipped,
            rejected = counts.rejected,
            "CSV import completed"
        );
        Ok(SyncOutcome::for_import(&property, counts))
    }

    async fn feed_property(&self, property_id: Uuid) -> Result<FeedProperty, ImportError> {
        let property = self.properties.get(property_id).await?;
        Ok(FeedProperty {
            id: property.id,
            name: property.name,
        })
    }

    /// Creates each draft unless the exact stay is already booked.
    ///
    /// Overlapping drafts are skipped and invalid drafts rejected; store
    /// failures abort the run.
    async fn store(
        &self,
        property: &FeedProperty,
        drafts: Vec<ReservationDraft>,
    ) -> Result<SyncCounts, ReservationStoreError> {
        let mut counts = SyncCounts::default();

        for mut draft in drafts {
            draft.property_id = property.id;

            if self
                .reservations
                .find_exact(property.id, draft.check_in, draft.check_out)
                .await?
                .is_some()
            {
                counts.skipped += 1;
                continue;
            }

            match self.reservations.create(draft).await {
                Ok(_) => counts.created += 1,
                Err(
                    ReservationStoreError::Rule(ReservationError::Overlap { .. })
                    | ReservationStoreError::Contention(_),
                ) => counts.skipped += 1,
                Err(ReservationStoreError::Rule(err)) if err.http_status_code() == 400 => {
                    tracing::warn!(property_id = %property.id, error = %err, "Rejecting draft");
                    counts.rejected += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(counts)
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
