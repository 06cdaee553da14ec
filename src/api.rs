//! Request/response boundary for the rental lifecycle.
//!
//! The transport (HTTP handlers, CLI, whatever hosts this crate) is expected
//! to authenticate the caller and hand in an [`Actor`]; this module maps the
//! lifecycle operations onto serde-friendly request and response shapes so
//! the caller always receives either the full rental record or a structured
//! `{kind, message}` error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RentalError;
use crate::lifecycle::RentalLifecycle;
use crate::marketplace::{Actor, EquipmentId, FarmerId, Rental, RentalId};
use crate::traits::{EquipmentRegistry, FarmerDirectory, RentalStore, TimeProvider};

/// Payload for submitting a new rental request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRentalRequest {
    pub equipment_id: EquipmentId,
    pub start_date: u64,
    pub end_date: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Machine-readable error category, mirroring the domain error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Forbidden,
    InvalidTransition,
    Conflict,
    Internal,
}

/// Structured error reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&RentalError> for ApiError {
    fn from(err: &RentalError) -> Self {
        let kind = match err {
            RentalError::Validation(_) => ErrorKind::Validation,
            RentalError::NotFound(_) => ErrorKind::NotFound,
            RentalError::Forbidden(_) => ErrorKind::Forbidden,
            RentalError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            RentalError::Conflict(_) => ErrorKind::Conflict,
            RentalError::Other(_) => ErrorKind::Internal,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Response to a single-rental operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalResponse {
    Rental(Rental),
    Error(ApiError),
}

impl RentalResponse {
    fn from_result(result: Result<Rental, RentalError>) -> Self {
        match result {
            Ok(rental) => Self::Rental(rental),
            Err(err) => {
                debug!(error = %err, "rental operation failed");
                Self::Error(ApiError::from(&err))
            }
        }
    }

    /// The rental record, if the operation succeeded.
    pub fn rental(&self) -> Option<&Rental> {
        match self {
            Self::Rental(rental) => Some(rental),
            Self::Error(_) => None,
        }
    }

    /// The structured error, if the operation failed.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Rental(_) => None,
            Self::Error(err) => Some(err),
        }
    }
}

/// Response to a query returning multiple rentals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalListResponse {
    Rentals(Vec<Rental>),
    Error(ApiError),
}

/// Submit a new rental request on behalf of the authenticated actor.
pub async fn create_rental<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    actor: Actor,
    request: CreateRentalRequest,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(
        lifecycle
            .create(
                actor,
                request.equipment_id,
                request.start_date,
                request.end_date,
                request.notes,
            )
            .await,
    )
}

/// Approve a pending rental (equipment owner only).
pub async fn approve_rental<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    actor: Actor,
    rental_id: RentalId,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(lifecycle.approve(rental_id, actor).await)
}

/// Attest payment for an approved rental (renter only).
pub async fn confirm_payment<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    actor: Actor,
    rental_id: RentalId,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(lifecycle.confirm_payment(rental_id, actor).await)
}

/// Start a paid rental (renter only).
pub async fn start_rental<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    actor: Actor,
    rental_id: RentalId,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(lifecycle.start(rental_id, actor).await)
}

/// Complete an active rental (renter only).
pub async fn complete_rental<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    actor: Actor,
    rental_id: RentalId,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(lifecycle.complete(rental_id, actor).await)
}

/// Cancel a rental that has not gone active (renter or owner).
pub async fn cancel_rental<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    actor: Actor,
    rental_id: RentalId,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(lifecycle.cancel(rental_id, actor).await)
}

/// Fetch a single rental record.
pub async fn get_rental<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    rental_id: RentalId,
) -> RentalResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    RentalResponse::from_result(lifecycle.rental(rental_id).await)
}

/// List the rentals requested by a farmer.
pub async fn list_rentals_for_renter<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    renter: FarmerId,
) -> RentalListResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    match lifecycle.rentals_for_renter(renter).await {
        Ok(rentals) => RentalListResponse::Rentals(rentals),
        Err(err) => RentalListResponse::Error(ApiError::from(&err)),
    }
}

/// List the rentals referencing a piece of equipment.
pub async fn list_rentals_for_equipment<S, E, F, C>(
    lifecycle: &RentalLifecycle<S, E, F, C>,
    equipment: EquipmentId,
) -> RentalListResponse
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    match lifecycle.rentals_for_equipment(equipment).await {
        Ok(rentals) => RentalListResponse::Rentals(rentals),
        Err(err) => RentalListResponse::Error(ApiError::from(&err)),
    }
}
