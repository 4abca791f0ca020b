//! Report repository for ledger summaries.
//!
//! Loads the movements of a window and hands them to the pure aggregation in
//! `staybook_core::ledger::summary`.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use staybook_core::ledger::{
    LedgerError, LedgerLine, LedgerSummary, MonthSummary, SummaryService, month_bounds,
    year_bounds,
};

use super::error::LedgerStoreError;
use crate::entities::{categories, movements, reservations};

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Summarizes the movements of the closed window `[desde, hasta]`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidWindow` if `desde > hasta`.
    pub async fn summary(
        &self,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<LedgerSummary, LedgerStoreError> {
        if desde > hasta {
            return Err(LedgerError::InvalidWindow { desde, hasta }.into());
        }

        let lines = self.lines(desde, hasta).await?;
        tracing::debug!(%desde, %hasta, movements = lines.len(), "Summarizing ledger");
        Ok(SummaryService::summarize(desde, hasta, &lines)?)
    }

    /// Rolls the movements and check-ins of `year` up into 12 months.
    pub async fn monthly_summary(&self, year: i32) -> Result<Vec<MonthSummary>, LedgerStoreError> {
        let (first, last) = year_bounds(year)?;
        let lines = self.lines(first, last).await?;

        let mut reservation_counts = [0_u64; 12];
        for (month, count) in (1..=12).zip(reservation_counts.iter_mut()) {
            let (start, end) = month_bounds(year, month)?;
            *count = reservations::Entity::find()
                .filter(reservations::Column::CheckIn.gte(start))
                .filter(reservations::Column::CheckIn.lte(end))
                .count(&self.db)
                .await?;
        }

        Ok(SummaryService::monthly(year, &lines, &reservation_counts)?)
    }

    async fn lines(
        &self,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<LedgerLine>, LedgerStoreError> {
        movements::Entity::find()
            .find_also_related(categories::Entity)
            .filter(movements::Column::Date.gte(desde))
            .filter(movements::Column::Date.lte(hasta))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(movement, category)| line_of(movement, category))
            .collect()
    }
}

fn line_of(
    movement: movements::Model,
    category: Option<categories::Model>,
) -> Result<LedgerLine, LedgerStoreError> {
    let category = category.ok_or_else(|| {
        LedgerStoreError::Corrupt(format!(
            "movement {} references missing category {}",
            movement.id, movement.category_id
        ))
    })?;

    Ok(LedgerLine {
        date: movement.date,
        movement_type: movement
            .movement_type
            .parse()
            .map_err(LedgerStoreError::Corrupt)?,
        category_name: category.name,
        amount: movement.amount,
        currency: movement.currency.parse().map_err(LedgerStoreError::Corrupt)?,
        exchange_rate: movement.exchange_rate,
        partner: movement.partner.parse().map_err(LedgerStoreError::Corrupt)?,
    })
}
