//! Reservation repository tests against in-memory SQLite.

mod common;

use chrono::NaiveDate;
use common::{date, property, setup, stay};
use rstest::rstest;
use rust_decimal_macros::dec;
use staybook_core::reservation::{DateWindow, Platform, ReservationError, ReservationPatch};
use staybook_db::repositories::{
    PropertyRepository, ReservationFilter, ReservationRepository, ReservationStoreError,
    UpdatePropertyInput,
};
use staybook_shared::types::{PageRequest, Patch};
use uuid::Uuid;

#[tokio::test]
async fn test_turnover_allowed_and_intersection_rejected() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db.clone());

    let a = repo
        .create(stay(p1.id, date(2024, 6, 1), date(2024, 6, 10)))
        .await
        .unwrap();
    assert_eq!(a.property.name, "P1");

    let b = repo
        .create(stay(p1.id, date(2024, 6, 5), date(2024, 6, 15)))
        .await;
    match b {
        Err(ReservationStoreError::Rule(ReservationError::Overlap { conflicting_id, .. })) => {
            assert_eq!(conflicting_id, a.reservation.id);
        }
        other => panic!("expected overlap, got {other:?}"),
    }

    let c = repo
        .create(stay(p1.id, date(2024, 6, 10), date(2024, 6, 20)))
        .await;
    assert!(c.is_ok());

    let all = repo
        .list(ReservationFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2, "the rejected stay must not be persisted");
}

#[tokio::test]
async fn test_same_dates_on_another_property_succeed() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let p2 = property(&db, "P2").await;
    let repo = ReservationRepository::new(db);

    repo.create(stay(p1.id, date(2024, 6, 1), date(2024, 6, 10)))
        .await
        .unwrap();
    assert!(
        repo.create(stay(p2.id, date(2024, 6, 1), date(2024, 6, 10)))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_create_rejects_missing_property_and_bad_dates() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db);

    assert!(matches!(
        repo.create(stay(Uuid::new_v4(), date(2024, 6, 1), date(2024, 6, 3)))
            .await,
        Err(ReservationStoreError::Rule(ReservationError::PropertyNotFound(_)))
    ));
    assert!(matches!(
        repo.create(stay(p1.id, date(2024, 6, 3), date(2024, 6, 3)))
            .await,
        Err(ReservationStoreError::Rule(ReservationError::InvalidDates { .. }))
    ));
}

#[tokio::test]
async fn test_update_excludes_itself_from_overlap_check() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db);

    let a = repo
        .create(stay(p1.id, date(2024, 6, 1), date(2024, 6, 10)))
        .await
        .unwrap();

    let extended = repo
        .update(
            a.reservation.id,
            ReservationPatch {
                check_out: Patch::Value(date(2024, 6, 12)),
                ..ReservationPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(extended.reservation.check_out, date(2024, 6, 12));
    assert_eq!(extended.reservation.guest_name, "Ana");
}

#[tokio::test]
async fn test_update_into_another_stay_conflicts() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db);

    repo.create(stay(p1.id, date(2024, 6, 1), date(2024, 6, 10)))
        .await
        .unwrap();
    let later = repo
        .create(stay(p1.id, date(2024, 6, 10), date(2024, 6, 20)))
        .await
        .unwrap();

    let result = repo
        .update(
            later.reservation.id,
            ReservationPatch {
                check_in: Patch::Value(date(2024, 6, 8)),
                ..ReservationPatch::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(ReservationStoreError::Rule(ReservationError::Overlap { .. }))
    ));

    let stored = repo.get(later.reservation.id).await.unwrap();
    assert_eq!(stored.reservation.check_in, date(2024, 6, 10));
}

#[tokio::test]
async fn test_update_clears_optional_and_rejects_null_required() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db);

    let mut draft = stay(p1.id, date(2024, 7, 1), date(2024, 7, 4));
    draft.notes = Some("early check-in".to_string());
    draft.deposit_amount = Some(dec!(100));
    let created = repo.create(draft).await.unwrap();

    let cleared = repo
        .update(
            created.reservation.id,
            ReservationPatch {
                notes: Patch::Null,
                ..ReservationPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.reservation.notes, None);
    assert_eq!(cleared.reservation.deposit_amount, Some(dec!(100)));

    assert!(matches!(
        repo.update(
            created.reservation.id,
            ReservationPatch {
                guest_name: Patch::Null,
                ..ReservationPatch::default()
            },
        )
        .await,
        Err(ReservationStoreError::Rule(
            ReservationError::RequiredFieldCleared("guest_name")
        ))
    ));
}

#[tokio::test]
async fn test_update_to_missing_property_is_not_found() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db);

    let created = repo
        .create(stay(p1.id, date(2024, 7, 1), date(2024, 7, 4)))
        .await
        .unwrap();
    assert!(matches!(
        repo.update(
            created.reservation.id,
            ReservationPatch {
                property_id: Patch::Value(Uuid::new_v4()),
                ..ReservationPatch::default()
            },
        )
        .await,
        Err(ReservationStoreError::Rule(ReservationError::PropertyNotFound(_)))
    ));
}

#[tokio::test]
async fn test_list_filters_and_orders_by_check_in_desc() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let p2 = property(&db, "P2").await;
    let repo = ReservationRepository::new(db);

    repo.create(stay(p1.id, date(2024, 5, 28), date(2024, 6, 2)))
        .await
        .unwrap();
    repo.create(stay(p1.id, date(2024, 6, 10), date(2024, 6, 12)))
        .await
        .unwrap();
    let mut direct = stay(p2.id, date(2024, 6, 20), date(2024, 6, 25));
    direct.platform = Platform::Direct;
    repo.create(direct).await.unwrap();
    repo.create(stay(p1.id, date(2024, 7, 1), date(2024, 7, 3)))
        .await
        .unwrap();

    let june = ReservationFilter {
        desde: Some(date(2024, 6, 1)),
        hasta: Some(date(2024, 7, 1)),
        ..ReservationFilter::default()
    };
    let rows = repo.list(june, PageRequest::default()).await.unwrap();
    let check_ins: Vec<_> = rows.iter().map(|r| r.reservation.check_in).collect();
    assert_eq!(
        check_ins,
        vec![date(2024, 6, 20), date(2024, 6, 10), date(2024, 5, 28)]
    );

    let direct_only = ReservationFilter {
        platform: Some(Platform::Direct),
        ..june
    };
    let rows = repo.list(direct_only, PageRequest::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].property.name, "P2");

    let paged = repo.list(june, PageRequest::new(1, 1)).await.unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].reservation.check_in, date(2024, 6, 10));
}

#[rstest]
#[case::ends_on_check_in(date(2024, 6, 5), date(2024, 6, 10), true)]
#[case::starts_on_check_out(date(2024, 6, 15), date(2024, 6, 18), true)]
#[case::overlaps_first_night(date(2024, 6, 5), date(2024, 6, 11), false)]
#[case::overlaps_last_night(date(2024, 6, 14), date(2024, 6, 20), false)]
#[case::inside(date(2024, 6, 11), date(2024, 6, 12), false)]
#[case::covers(date(2024, 6, 1), date(2024, 6, 30), false)]
#[tokio::test]
async fn test_booking_against_existing_stay(
    #[case] check_in: NaiveDate,
    #[case] check_out: NaiveDate,
    #[case] accepted: bool,
) {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let repo = ReservationRepository::new(db);
    repo.create(stay(p1.id, date(2024, 6, 10), date(2024, 6, 15)))
        .await
        .unwrap();

    let result = repo.create(stay(p1.id, check_in, check_out)).await;
    if accepted {
        assert!(result.is_ok());
    } else {
        assert!(matches!(
            result,
            Err(ReservationStoreError::Rule(ReservationError::Overlap { .. }))
        ));
    }

    let stored = repo
        .list(ReservationFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), if accepted { 2 } else { 1 });
}

#[tokio::test]
async fn test_calendar_events() {
    let db = setup().await;
    let p1 = property(&db, "Casa Sur").await;
    let repo = ReservationRepository::new(db);

    repo.create(stay(p1.id, date(2024, 6, 28), date(2024, 7, 2)))
        .await
        .unwrap();
    repo.create(stay(p1.id, date(2024, 8, 1), date(2024, 8, 5)))
        .await
        .unwrap();

    let window = DateWindow::new(date(2024, 7, 1), date(2024, 7, 31)).unwrap();
    let events = repo.calendar(window, Some(p1.id)).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Ana (Casa Sur)");
    assert_eq!(events[0].background_color, "#FF5A5F");
}

#[tokio::test]
async fn test_delete_reservation_then_property() {
    let db = setup().await;
    let p1 = property(&db, "P1").await;
    let properties = PropertyRepository::new(db.clone());
    let repo = ReservationRepository::new(db);

    let created = repo
        .create(stay(p1.id, date(2024, 6, 1), date(2024, 6, 3)))
        .await
        .unwrap();

    assert!(matches!(
        properties.delete(p1.id).await,
        Err(ReservationStoreError::Rule(ReservationError::PropertyInUse { count: 1, .. }))
    ));

    repo.delete(created.reservation.id).await.unwrap();
    assert!(matches!(
        repo.delete(created.reservation.id).await,
        Err(ReservationStoreError::Rule(ReservationError::ReservationNotFound(_)))
    ));

    properties.delete(p1.id).await.unwrap();
    assert!(properties.get(p1.id).await.is_err());
}

#[tokio::test]
async fn test_property_update_and_listing() {
    let db = setup().await;
    let properties = PropertyRepository::new(db.clone());
    let beach = property(&db, "Playa").await;
    property(&db, "Bosque").await;

    let renamed = properties
        .update(
            beach.id,
            UpdatePropertyInput {
                name: Patch::Value("  Alba  ".to_string()),
                description: Patch::Value("Sea view".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Alba");
    assert_eq!(renamed.description.as_deref(), Some("Sea view"));

    let names: Vec<_> = properties
        .list(PageRequest::default())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Alba", "Bosque"]);

    assert!(matches!(
        properties
            .update(
                beach.id,
                UpdatePropertyInput {
                    name: Patch::Null,
                    ..UpdatePropertyInput::default()
                },
            )
            .await,
        Err(ReservationStoreError::Rule(
            ReservationError::RequiredFieldCleared("name")
        ))
    ));
}
