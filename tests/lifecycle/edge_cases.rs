//! Edge cases: malformed requests, illegal transitions, booking conflicts,
//! and collaborator failures.

use crate::common::harness::{Harness, DAY};
use farmlink::mocks::MockStoreFailure;
use farmlink::{RentalError, RentalStatus};

#[tokio::test]
async fn inverted_period_creates_no_record() {
    let h = Harness::new().await;

    let result = h
        .lifecycle
        .create(h.renter, h.tractor, 2 * DAY, 0, None)
        .await;

    assert!(matches!(result, Err(RentalError::Validation(_))));
    assert!(h.store.snapshot().await.is_empty());
}

#[tokio::test]
async fn transitions_must_not_skip_states() {
    let h = Harness::new().await;
    let rental = h.request_tractor(0, 2).await;

    // Pending rental: everything but approve/cancel is illegal.
    let start = h.lifecycle.start(rental.id, h.renter).await;
    assert!(matches!(start, Err(RentalError::InvalidTransition(_))));

    let pay = h.lifecycle.confirm_payment(rental.id, h.renter).await;
    assert!(matches!(pay, Err(RentalError::InvalidTransition(_))));

    let complete = h.lifecycle.complete(rental.id, h.renter).await;
    assert!(matches!(complete, Err(RentalError::InvalidTransition(_))));
}

#[tokio::test]
async fn cancel_is_legal_exactly_before_active() {
    for status in [
        RentalStatus::Pending,
        RentalStatus::Approved,
        RentalStatus::Paid,
    ] {
        let h = Harness::new().await;
        let rental = h.rental_in(status).await;
        assert!(
            h.lifecycle.cancel(rental.id, h.renter).await.is_ok(),
            "cancel from {status:?} must succeed"
        );
    }

    for status in [
        RentalStatus::Active,
        RentalStatus::Completed,
        RentalStatus::Cancelled,
    ] {
        let h = Harness::new().await;
        let rental = h.rental_in(status).await;
        let result = h.lifecycle.cancel(rental.id, h.renter).await;
        assert!(
            matches!(result, Err(RentalError::InvalidTransition(_))),
            "cancel from {status:?} must fail"
        );
    }
}

#[tokio::test]
async fn terminal_rentals_accept_no_transition() {
    let h = Harness::new().await;
    let done = h.rental_in(RentalStatus::Completed).await;

    for result in [
        h.lifecycle.approve(done.id, h.owner).await,
        h.lifecycle.confirm_payment(done.id, h.renter).await,
        h.lifecycle.start(done.id, h.renter).await,
        h.lifecycle.complete(done.id, h.renter).await,
        h.lifecycle.cancel(done.id, h.renter).await,
    ] {
        assert!(matches!(result, Err(RentalError::InvalidTransition(_))));
    }
}

#[tokio::test]
async fn overlapping_booking_is_rejected_until_cancelled() {
    let h = Harness::new().await;
    let other = h.add_farmer(9).await;

    let first = h.request_tractor(0, 2).await;

    // Day 2 overlaps the inclusive end of the first rental.
    let overlap = h
        .lifecycle
        .create(other, h.tractor, 2 * DAY, 4 * DAY, None)
        .await;
    assert!(matches!(overlap, Err(RentalError::Validation(_))));

    // A disjoint period is fine.
    let disjoint = h
        .lifecycle
        .create(other, h.tractor, 3 * DAY, 4 * DAY, None)
        .await;
    assert!(disjoint.is_ok());

    // Cancelling the first frees its period.
    h.lifecycle.cancel(first.id, h.renter).await.unwrap();
    let rebooked = h
        .lifecycle
        .create(other, h.tractor, 0, 2 * DAY, None)
        .await;
    assert!(rebooked.is_ok());
}

#[tokio::test]
async fn approve_rechecks_the_period() {
    let h = Harness::new().await;
    let other = h.add_farmer(9).await;
    let rental = h.request_tractor(0, 2).await;

    // Simulate a create race: an overlapping request slipped past the
    // creation-time check and sits pending in the store.
    let racing = farmlink::Rental::builder()
        .renter(other.id)
        .equipment(h.tractor, 100)
        .period(2 * DAY, 4 * DAY)
        .build()
        .unwrap()
        .into_rental(farmlink::RentalId::new(999));
    h.store.put(racing).await;

    let result = h.lifecycle.approve(rental.id, h.owner).await;
    assert!(matches!(result, Err(RentalError::Validation(_))));
}

#[tokio::test]
async fn disjoint_requests_can_both_be_approved() {
    let h = Harness::new().await;
    let other = h.add_farmer(9).await;

    let rental = h.request_tractor(0, 2).await;
    let disjoint = h
        .lifecycle
        .create(other, h.tractor, 3 * DAY, 4 * DAY, None)
        .await
        .unwrap();
    assert_eq!(disjoint.status, RentalStatus::Pending);

    assert!(h.lifecycle.approve(rental.id, h.owner).await.is_ok());
    assert!(h.lifecycle.approve(disjoint.id, h.owner).await.is_ok());
}

#[tokio::test]
async fn start_respects_the_calendar_and_the_flag() {
    let h = Harness::new().await;

    // Rental for days 5..=6, paid up front.
    let rental = h.request_tractor(5, 6).await;
    h.lifecycle.approve(rental.id, h.owner).await.unwrap();
    h.lifecycle
        .confirm_payment(rental.id, h.renter)
        .await
        .unwrap();

    // Too early.
    let early = h.lifecycle.start(rental.id, h.renter).await;
    assert!(matches!(early, Err(RentalError::Validation(_))));

    // Equipment withdrawn from service.
    h.time.set(5 * DAY);
    use farmlink::EquipmentRegistry;
    h.registry.set_available(h.tractor, false).await.unwrap();
    let blocked = h.lifecycle.start(rental.id, h.renter).await;
    assert!(matches!(blocked, Err(RentalError::Conflict(_))));

    // Back in service and on time.
    h.registry.set_available(h.tractor, true).await.unwrap();
    let started = h.lifecycle.start(rental.id, h.renter).await.unwrap();
    assert_eq!(started.status, RentalStatus::Active);
}

#[tokio::test]
async fn store_outage_surfaces_as_internal_error() {
    let h = Harness::new().await;
    let rental = h.request_tractor(0, 2).await;

    h.store.set_fail_mode(Some(MockStoreFailure::All)).await;
    let result = h.lifecycle.approve(rental.id, h.owner).await;
    assert!(matches!(result, Err(RentalError::Other(_))));

    // Nothing moved.
    h.store.set_fail_mode(None).await;
    assert_eq!(
        h.lifecycle.rental(rental.id).await.unwrap().status,
        RentalStatus::Pending
    );
}

#[tokio::test]
async fn registry_outage_fails_creation() {
    let h = Harness::new().await;
    h.registry.set_fail(true).await;

    let result = h.lifecycle.create(h.renter, h.tractor, 0, 0, None).await;
    assert!(matches!(result, Err(RentalError::Other(_))));
}

#[tokio::test]
async fn cost_is_fixed_at_creation() {
    let h = Harness::new().await;
    let rental = h.request_tractor(0, 2).await;
    let original_cost = rental.total_cost;

    let done = {
        h.lifecycle.approve(rental.id, h.owner).await.unwrap();
        h.lifecycle
            .confirm_payment(rental.id, h.renter)
            .await
            .unwrap();
        h.lifecycle.start(rental.id, h.renter).await.unwrap();
        h.lifecycle.complete(rental.id, h.renter).await.unwrap()
    };

    assert_eq!(done.total_cost, original_cost);
}
