//! Full-lifecycle scenarios: a rental moving through every state with the
//! expected costs, statuses, and equipment availability along the way.

use crate::common::harness::{Harness, DAILY_RATE};
use farmlink::{api, CreateRentalRequest, RentalStatus};

#[tokio::test]
async fn full_lifecycle_to_completion() {
    let h = Harness::new().await;

    // Renter requests the tractor for three inclusive days.
    let rental = h.request_tractor(0, 2).await;
    assert_eq!(rental.status, RentalStatus::Pending);
    assert_eq!(rental.total_cost, 3 * DAILY_RATE);
    assert!(h.tractor_record().await.available, "pending must not encumber the flag");

    // Owner approves.
    let rental = h.lifecycle.approve(rental.id, h.owner).await.unwrap();
    assert_eq!(rental.status, RentalStatus::Approved);
    assert!(h.tractor_record().await.available);

    // Renter attests payment.
    let rental = h
        .lifecycle
        .confirm_payment(rental.id, h.renter)
        .await
        .unwrap();
    assert_eq!(rental.status, RentalStatus::Paid);

    // Renter picks the tractor up.
    let rental = h.lifecycle.start(rental.id, h.renter).await.unwrap();
    assert_eq!(rental.status, RentalStatus::Active);
    assert!(!h.tractor_record().await.available);

    // Renter returns it.
    let rental = h.lifecycle.complete(rental.id, h.renter).await.unwrap();
    assert_eq!(rental.status, RentalStatus::Completed);
    assert!(h.tractor_record().await.available);

    // Cost never changed along the way.
    assert_eq!(rental.total_cost, 3 * DAILY_RATE);
}

#[tokio::test]
async fn lifecycle_through_the_api_boundary() {
    let h = Harness::new().await;

    let request = CreateRentalRequest {
        equipment_id: h.tractor,
        start_date: 0,
        end_date: 0,
        notes: Some("single day job".to_string()),
    };
    let response = api::create_rental(&h.lifecycle, h.renter, request).await;
    let rental = response.rental().expect("create should succeed").clone();
    assert_eq!(rental.total_cost, DAILY_RATE);
    assert_eq!(rental.notes.as_deref(), Some("single day job"));

    let response = api::approve_rental(&h.lifecycle, h.owner, rental.id).await;
    assert_eq!(response.rental().unwrap().status, RentalStatus::Approved);

    let response = api::confirm_payment(&h.lifecycle, h.renter, rental.id).await;
    assert_eq!(response.rental().unwrap().status, RentalStatus::Paid);

    let response = api::start_rental(&h.lifecycle, h.renter, rental.id).await;
    assert_eq!(response.rental().unwrap().status, RentalStatus::Active);

    let response = api::complete_rental(&h.lifecycle, h.renter, rental.id).await;
    assert_eq!(response.rental().unwrap().status, RentalStatus::Completed);
}

#[tokio::test]
async fn equipment_can_be_rebooked_after_completion() {
    let h = Harness::new().await;

    let first = h.rental_in(RentalStatus::Completed).await;
    assert_eq!(first.status, RentalStatus::Completed);

    // Same period again: the completed rental no longer encumbers it.
    let second = h.request_tractor(0, 2).await;
    assert_eq!(second.status, RentalStatus::Pending);
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn owner_sees_rentals_on_their_equipment() {
    let h = Harness::new().await;
    let rental = h.request_tractor(0, 2).await;

    let on_equipment = h
        .lifecycle
        .rentals_for_equipment(h.tractor)
        .await
        .unwrap();
    assert_eq!(on_equipment.len(), 1);
    assert_eq!(on_equipment[0].id, rental.id);

    let by_renter = h
        .lifecycle
        .rentals_for_renter(h.renter.id)
        .await
        .unwrap();
    assert_eq!(by_renter.len(), 1);
}

#[tokio::test]
async fn rentals_on_separate_equipment_are_independent() {
    let h = Harness::new().await;
    let harvester = h.add_equipment(11, 1, 250).await;

    let tractor_rental = h.request_tractor(0, 2).await;
    let harvester_rental = h
        .lifecycle
        .create(h.renter, harvester, 0, 0, None)
        .await
        .unwrap();

    assert_eq!(harvester_rental.total_cost, 250);

    // Starting the harvester rental leaves the tractor untouched.
    h.lifecycle
        .approve(harvester_rental.id, h.owner)
        .await
        .unwrap();
    h.lifecycle
        .confirm_payment(harvester_rental.id, h.renter)
        .await
        .unwrap();
    h.lifecycle
        .start(harvester_rental.id, h.renter)
        .await
        .unwrap();

    assert!(h.tractor_record().await.available);
    assert_eq!(
        h.lifecycle.rental(tractor_rental.id).await.unwrap().status,
        RentalStatus::Pending
    );
}
