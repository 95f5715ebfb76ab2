//! Integration tests for the conditional-update guards that protect the
//! parcel/rider lifecycle: cash-out at-most-once, rider acquire/release,
//! payment confirmation, and the delivery-status stage guards.

use parceld_core::rider::RiderStatus;
use parceld_db::models::parcel::{CreateParcel, ParcelFilter};
use parceld_db::models::rider::CreateRider;
use parceld_db::models::user::CreateUser;
use parceld_db::repositories::{ParcelRepo, RiderRepo, TrackingRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn make_parcel(pool: &PgPool, email: &str) -> parceld_db::models::parcel::Parcel {
    let input = CreateParcel {
        title: "Box of books".to_string(),
        tracking_id: Some("TRK-1001".to_string()),
        email: email.to_string(),
        sender_district: Some("Dhaka".to_string()),
        receiver_district: Some("Sylhet".to_string()),
        weight_kg: Some(2.5),
        cost: 120.0,
    };
    ParcelRepo::create(pool, &input)
        .await
        .expect("parcel creation should succeed")
}

async fn make_approved_rider(pool: &PgPool, email: &str, district: &str) -> i64 {
    let input = CreateRider {
        name: "Test Rider".to_string(),
        email: email.to_string(),
        district: district.to_string(),
        phone: None,
    };
    let rider = RiderRepo::create(pool, &input)
        .await
        .expect("rider creation should succeed");
    RiderRepo::set_status(pool, rider.id, RiderStatus::Approved)
        .await
        .expect("status update should succeed")
        .expect("rider should exist");
    rider.id
}

/// Force a delivery status directly, bypassing the guards. Test seeding only.
async fn force_delivery_status(pool: &PgPool, id: i64, status: &str) {
    sqlx::query("UPDATE parcels SET delivery_status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await
        .expect("seed update should succeed");
}

// ---------------------------------------------------------------------------
// Cash-out guard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cash_out_succeeds_exactly_once(pool: PgPool) {
    let parcel = make_parcel(&pool, "owner@test.com").await;
    force_delivery_status(&pool, parcel.id, "delivered").await;

    assert!(ParcelRepo::cash_out(&pool, parcel.id).await.unwrap());

    let row = ParcelRepo::find_by_id(&pool, parcel.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.cash_out_status.as_deref(), Some("cashed-out"));
    assert!(row.cashed_out_at.is_some());

    // Second request trips the guard.
    assert!(!ParcelRepo::cash_out(&pool, parcel.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cash_out_requires_a_delivered_state(pool: PgPool) {
    let parcel = make_parcel(&pool, "owner@test.com").await;

    // pending -> not eligible
    assert!(!ParcelRepo::cash_out(&pool, parcel.id).await.unwrap());

    force_delivery_status(&pool, parcel.id, "service-center-delivered").await;
    assert!(ParcelRepo::cash_out(&pool, parcel.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cash_out_on_missing_parcel_is_a_miss(pool: PgPool) {
    assert!(!ParcelRepo::cash_out(&pool, 424242).await.unwrap());
}

// ---------------------------------------------------------------------------
// Rider acquire / release
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn rider_acquire_is_mutually_exclusive(pool: PgPool) {
    let rider_id = make_approved_rider(&pool, "rider@test.com", "Dhaka").await;

    assert!(RiderRepo::acquire_for_delivery(&pool, rider_id).await.unwrap());
    // A second acquire (a concurrent duplicate assign) must lose.
    assert!(!RiderRepo::acquire_for_delivery(&pool, rider_id).await.unwrap());

    assert!(RiderRepo::release_by_email(&pool, "rider@test.com")
        .await
        .unwrap());
    assert!(RiderRepo::acquire_for_delivery(&pool, rider_id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unapproved_rider_cannot_be_acquired(pool: PgPool) {
    let input = CreateRider {
        name: "Applicant".to_string(),
        email: "applicant@test.com".to_string(),
        district: "Khulna".to_string(),
        phone: None,
    };
    let rider = RiderRepo::create(&pool, &input).await.unwrap();

    // Still pending.
    assert!(!RiderRepo::acquire_for_delivery(&pool, rider.id).await.unwrap());

    RiderRepo::set_status(&pool, rider.id, RiderStatus::Rejected)
        .await
        .unwrap();
    assert!(!RiderRepo::acquire_for_delivery(&pool, rider.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Payment confirmation guard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_paid_rejects_replay(pool: PgPool) {
    let parcel = make_parcel(&pool, "payer@test.com").await;

    assert!(ParcelRepo::mark_paid(&pool, parcel.id, "txn_001").await.unwrap());

    let row = ParcelRepo::find_by_id(&pool, parcel.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.payment_status, "paid");
    assert_eq!(row.transaction_id.as_deref(), Some("txn_001"));
    assert!(row.paid_at.is_some());

    // Replayed confirmation must not modify anything.
    assert!(!ParcelRepo::mark_paid(&pool, parcel.id, "txn_002").await.unwrap());
    let row = ParcelRepo::find_by_id(&pool, parcel.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.transaction_id.as_deref(), Some("txn_001"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_paid_on_missing_parcel_is_a_miss(pool: PgPool) {
    assert!(!ParcelRepo::mark_paid(&pool, 424242, "txn_404").await.unwrap());
}

// ---------------------------------------------------------------------------
// Delivery stage guards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stage_guards_enforce_the_pipeline_order(pool: PgPool) {
    let parcel = make_parcel(&pool, "owner@test.com").await;
    let rider_id = make_approved_rider(&pool, "rider@test.com", "Sylhet").await;

    // pending: neither transit nor delivered is reachable.
    assert!(!ParcelRepo::mark_in_transit(&pool, parcel.id).await.unwrap());
    assert!(!ParcelRepo::mark_delivered(&pool, parcel.id).await.unwrap());

    assert!(ParcelRepo::bind_rider(&pool, parcel.id, rider_id, "rider@test.com")
        .await
        .unwrap());
    // Binding is pending-only; a second bind loses.
    assert!(!ParcelRepo::bind_rider(&pool, parcel.id, rider_id, "rider@test.com")
        .await
        .unwrap());

    // assigned: delivered still requires in-transit first.
    assert!(!ParcelRepo::mark_delivered(&pool, parcel.id).await.unwrap());
    assert!(ParcelRepo::mark_in_transit(&pool, parcel.id).await.unwrap());
    assert!(!ParcelRepo::mark_in_transit(&pool, parcel.id).await.unwrap());

    assert!(ParcelRepo::mark_delivered(&pool, parcel.id).await.unwrap());
    assert!(!ParcelRepo::mark_delivered(&pool, parcel.id).await.unwrap());

    let row = ParcelRepo::find_by_id(&pool, parcel.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.delivery_status, "delivered");
    assert_eq!(row.assigned_rider_id, Some(rider_id));
    assert!(row.assigned_at.is_some());
    assert!(row.in_transit_at.is_some());
    assert!(row.delivered_at.is_some());
}

// ---------------------------------------------------------------------------
// Listing and aggregation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_newest_first_and_filters_conjunctively(pool: PgPool) {
    let first = make_parcel(&pool, "alice@test.com").await;
    let second = make_parcel(&pool, "bob@test.com").await;
    let third = make_parcel(&pool, "alice@test.com").await;

    let all = ParcelRepo::list(&pool, &ParcelFilter::default()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let alices = ParcelRepo::list(
        &pool,
        &ParcelFilter {
            email: Some("alice@test.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|p| p.email == "alice@test.com"));

    // Conjunctive: alice AND paid matches nothing until a payment lands.
    let filter = ParcelFilter {
        email: Some("alice@test.com".to_string()),
        payment_status: Some("paid".to_string()),
        ..Default::default()
    };
    assert!(ParcelRepo::list(&pool, &filter).await.unwrap().is_empty());

    ParcelRepo::mark_paid(&pool, first.id, "txn_100").await.unwrap();
    let paid = ParcelRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn count_by_status_omits_empty_statuses(pool: PgPool) {
    for _ in 0..2 {
        make_parcel(&pool, "a@test.com").await;
    }
    let assigned = make_parcel(&pool, "b@test.com").await;
    force_delivery_status(&pool, assigned.id, "assigned").await;
    for _ in 0..3 {
        let p = make_parcel(&pool, "c@test.com").await;
        force_delivery_status(&pool, p.id, "delivered").await;
    }

    let counts = ParcelRepo::count_by_status(&pool).await.unwrap();
    let pairs: Vec<(&str, i64)> = counts.iter().map(|c| (c.status.as_str(), c.count)).collect();
    assert_eq!(
        pairs,
        vec![("assigned", 1), ("delivered", 3), ("pending", 2)]
    );
    assert!(!pairs.iter().any(|(s, _)| *s == "in-transit"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rider_summary_counts_only_that_riders_parcels(pool: PgPool) {
    let mine = make_parcel(&pool, "x@test.com").await;
    force_delivery_status(&pool, mine.id, "delivered").await;
    sqlx::query("UPDATE parcels SET assigned_rider_email = 'rider@test.com' WHERE id = $1")
        .bind(mine.id)
        .execute(&pool)
        .await
        .unwrap();

    // A parcel belonging to someone else's route.
    make_parcel(&pool, "y@test.com").await;

    let counts = ParcelRepo::count_by_status_for_rider(&pool, "rider@test.com")
        .await
        .unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].status, "delivered");
    assert_eq!(counts[0].count, 1);
}

// ---------------------------------------------------------------------------
// Users and tracking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_insert_is_a_noop_when_email_exists(pool: PgPool) {
    let input = CreateUser {
        email: "dup@test.com".to_string(),
        display_name: Some("Dup".to_string()),
    };
    let inserted = UserRepo::insert_if_absent(&pool, &input).await.unwrap();
    assert!(inserted.is_some());
    assert_eq!(inserted.unwrap().role, "user");

    let again = UserRepo::insert_if_absent(&pool, &input).await.unwrap();
    assert!(again.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tracking_history_is_timestamp_ascending(pool: PgPool) {
    TrackingRepo::append(&pool, "TRK-9", "created", "").await.unwrap();
    TrackingRepo::append(&pool, "TRK-9", "picked-up", "hub scan").await.unwrap();

    // An out-of-order append with an older timestamp must still sort first.
    sqlx::query(
        "INSERT INTO tracking_events (tracking_id, status, description, recorded_at)
         VALUES ('TRK-9', 'label-printed', '', NOW() - INTERVAL '1 hour')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let history = TrackingRepo::history(&pool, "TRK-9").await.unwrap();
    let statuses: Vec<_> = history.iter().map(|e| e.status.as_str()).collect();
    assert_eq!(statuses, vec!["label-printed", "created", "picked-up"]);
    assert!(history.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));

    // Events under other identifiers stay out of this history.
    assert!(TrackingRepo::history(&pool, "TRK-UNKNOWN").await.unwrap().is_empty());
}
