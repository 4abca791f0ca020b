//! Reservation repository.
//!
//! Creates and updates run the availability check and the write inside one
//! SERIALIZABLE transaction. On PostgreSQL the `reservations_no_overlap`
//! exclusion constraint backs the check up.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::Serialize;
use staybook_core::reservation::{
    BookedStay, CalendarEntry, CalendarEvent, DateWindow, Platform, ReservationDraft,
    ReservationError, ReservationPatch, ReservationService, StayRange,
};
use staybook_shared::types::PageRequest;
use uuid::Uuid;

use super::error::ReservationStoreError;
use crate::entities::{properties, reservations};

/// Reservation together with its property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationWithProperty {
    /// The reservation record.
    #[serde(flatten)]
    pub reservation: reservations::Model,
    /// The booked property.
    pub property: properties::Model,
}

/// Filter options for listing reservations.
///
/// The date bounds select stays overlapping `[desde, hasta)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationFilter {
    /// Only this property.
    pub property_id: Option<Uuid>,
    /// Stays checking out after this day.
    pub desde: Option<NaiveDate>,
    /// Stays checking in before this day.
    pub hasta: Option<NaiveDate>,
    /// Only this platform.
    pub platform: Option<Platform>,
}

/// Reservation repository.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    /// Creates a new reservation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a stay.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The property does not exist
    /// - The draft is invalid
    /// - The stay overlaps another reservation of the property
    pub async fn create(
        &self,
        draft: ReservationDraft,
    ) -> Result<ReservationWithProperty, ReservationStoreError> {
        let txn = self.begin_serializable().await?;

        let property = find_property(&txn, draft.property_id).await?;
        let stay = ReservationService::validate_draft(&draft)?;
        let booked = booked_stays(&txn, draft.property_id, &stay).await?;
        ReservationService::ensure_available(draft.property_id, &stay, &booked, None)?;

        let mut active = reservations::ActiveModel {
            id: Set(Uuid::new_v4()),
            ..Default::default()
        };
        assign(&mut active, &draft);
        let reservation = active
            .insert(&txn)
            .await
            .map_err(ReservationStoreError::from_txn)?;
        txn.commit()
            .await
            .map_err(ReservationStoreError::from_txn)?;

        tracing::info!(
            reservation_id = %reservation.id,
            property_id = %property.id,
            check_in = %reservation.check_in,
            check_out = %reservation.check_out,
            "Reservation created"
        );
        Ok(ReservationWithProperty {
            reservation,
            property,
        })
    }

    /// Applies a partial update.
    ///
    /// The availability check runs again, excluding the reservation itself,
    /// whenever the patch supplies check-in, check-out or property.
    pub async fn update(
        &self,
        id: Uuid,
        patch: ReservationPatch,
    ) -> Result<ReservationWithProperty, ReservationStoreError> {
        let txn = self.begin_serializable().await?;

        let current = reservations::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(ReservationStoreError::from_txn)?
            .ok_or(ReservationError::ReservationNotFound(id))?;

        let resolved = ReservationService::apply_patch(draft_of(&current)?, patch)?;
        let values = resolved.values;
        let property = find_property(&txn, values.property_id).await?;

        if resolved.recheck_availability {
            let stay = values.stay()?;
            let booked = booked_stays(&txn, values.property_id, &stay).await?;
            ReservationService::ensure_available(values.property_id, &stay, &booked, Some(id))?;
        }

        let mut active: reservations::ActiveModel = current.into();
        assign(&mut active, &values);
        let reservation = active
            .update(&txn)
            .await
            .map_err(ReservationStoreError::from_txn)?;
        txn.commit()
            .await
            .map_err(ReservationStoreError::from_txn)?;

        tracing::info!(reservation_id = %id, property_id = %property.id, "Reservation updated");
        Ok(ReservationWithProperty {
            reservation,
            property,
        })
    }

    /// Deletes a reservation.
    pub async fn delete(&self, id: Uuid) -> Result<(), ReservationStoreError> {
        let reservation = reservations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ReservationError::ReservationNotFound(id))?;

        reservation.delete(&self.db).await?;

        tracing::info!(reservation_id = %id, "Reservation deleted");
        Ok(())
    }

    /// Finds a reservation with its property.
    pub async fn get(&self, id: Uuid) -> Result<ReservationWithProperty, ReservationStoreError> {
        let (reservation, property) = reservations::Entity::find_by_id(id)
            .find_also_related(properties::Entity)
            .one(&self.db)
            .await?
            .ok_or(ReservationError::ReservationNotFound(id))?;

        with_property(reservation, property)
    }

    /// Lists reservations ordered by check-in, newest first.
    pub async fn list(
        &self,
        filter: ReservationFilter,
        page: PageRequest,
    ) -> Result<Vec<ReservationWithProperty>, ReservationStoreError> {
        let mut query = reservations::Entity::find().find_also_related(properties::Entity);

        if let Some(property_id) = filter.property_id {
            query = query.filter(reservations::Column::PropertyId.eq(property_id));
        }
        if let Some(desde) = filter.desde {
            query = query.filter(reservations::Column::CheckOut.gt(desde));
        }
        if let Some(hasta) = filter.hasta {
            query = query.filter(reservations::Column::CheckIn.lt(hasta));
        }
        if let Some(platform) = filter.platform {
            query = query.filter(reservations::Column::Platform.eq(platform.as_str()));
        }

        tracing::debug!(
            ?filter,
            skip = page.offset(),
            limit = page.limit(),
            "Listing reservations"
        );

        query
            .order_by_desc(reservations::Column::CheckIn)
            .order_by_desc(reservations::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(reservation, property)| with_property(reservation, property))
            .collect()
    }

    /// Builds calendar events for the stays overlapping `window`.
    pub async fn calendar(
        &self,
        window: DateWindow,
        property_id: Option<Uuid>,
    ) -> Result<Vec<CalendarEvent>, ReservationStoreError> {
        let mut query = reservations::Entity::find()
            .find_also_related(properties::Entity)
            .filter(reservations::Column::CheckOut.gt(window.desde))
            .filter(reservations::Column::CheckIn.lt(window.hasta));
        if let Some(property_id) = property_id {
            query = query.filter(reservations::Column::PropertyId.eq(property_id));
        }

        query
            .order_by_asc(reservations::Column::CheckIn)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(reservation, property)| {
                let row = with_property(reservation, property)?;
                Ok(CalendarEvent::from(calendar_entry(row)))
            })
            .collect()
    }

    /// Finds a reservation with exactly these dates on the property.
    pub async fn find_exact(
        &self,
        property_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Option<reservations::Model>, ReservationStoreError> {
        let existing = reservations::Entity::find()
            .filter(reservations::Column::PropertyId.eq(property_id))
            .filter(reservations::Column::CheckIn.eq(check_in))
            .filter(reservations::Column::CheckOut.eq(check_out))
            .one(&self.db)
            .await?;
        Ok(existing)
    }

    async fn begin_serializable(&self) -> Result<DatabaseTransaction, ReservationStoreError> {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;
        Ok(txn)
    }
}

async fn find_property<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<properties::Model, ReservationStoreError> {
    properties::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ReservationStoreError::from_txn)?
        .ok_or_else(|| ReservationError::PropertyNotFound(id).into())
}

/// Loads the stays of `property_id` that may intersect `stay`.
async fn booked_stays<C: ConnectionTrait>(
    db: &C,
    property_id: Uuid,
    stay: &StayRange,
) -> Result<Vec<BookedStay>, ReservationStoreError> {
    let rows = reservations::Entity::find()
        .filter(reservations::Column::PropertyId.eq(property_id))
        .filter(reservations::Column::CheckOut.gt(stay.check_in))
        .filter(reservations::Column::CheckIn.lt(stay.check_out))
        .all(db)
        .await
        .map_err(ReservationStoreError::from_txn)?;

    Ok(rows
        .into_iter()
        .map(|r| BookedStay {
            reservation_id: r.id,
            check_in: r.check_in,
            check_out: r.check_out,
        })
        .collect())
}

fn assign(active: &mut reservations::ActiveModel, draft: &ReservationDraft) {
    active.property_id = Set(draft.property_id);
    active.check_in = Set(draft.check_in);
    active.check_out = Set(draft.check_out);
    active.guest_name = Set(draft.guest_name.trim().to_string());
    active.platform = Set(draft.platform.as_str().to_string());
    active.status = Set(draft.status.as_str().to_string());
    active.total_amount = Set(draft.total_amount);
    active.deposit_amount = Set(draft.deposit_amount);
    active.notes = Set(draft.notes.clone());
}

/// Reads a stored reservation back into a draft.
fn draft_of(model: &reservations::Model) -> Result<ReservationDraft, ReservationStoreError> {
    Ok(ReservationDraft {
        property_id: model.property_id,
        check_in: model.check_in,
        check_out: model.check_out,
        guest_name: model.guest_name.clone(),
        platform: model
            .platform
            .parse()
            .map_err(ReservationStoreError::Corrupt)?,
        status: model.status.parse().map_err(ReservationStoreError::Corrupt)?,
        total_amount: model.total_amount,
        deposit_amount: model.deposit_amount,
        notes: model.notes.clone(),
    })
}

fn with_property(
    reservation: reservations::Model,
    property: Option<properties::Model>,
) -> Result<ReservationWithProperty, ReservationStoreError> {
    let property = property.ok_or_else(|| {
        ReservationStoreError::Corrupt(format!(
            "reservation {} references missing property {}",
            reservation.id, reservation.property_id
        ))
    })?;
    Ok(ReservationWithProperty {
        reservation,
        property,
    })
}

fn calendar_entry(row: ReservationWithProperty) -> CalendarEntry {
    let ReservationWithProperty {
        reservation,
        property,
    } = row;
    CalendarEntry {
        id: reservation.id,
        guest_name: reservation.guest_name,
        property_name: property.name,
        check_in: reservation.check_in,
        check_out: reservation.check_out,
        platform: reservation.platform,
        status: reservation.status,
        total_amount: reservation.total_amount,
        deposit_amount: reservation.deposit_amount,
        notes: reservation.notes,
    }
}
