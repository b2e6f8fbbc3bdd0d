//! Inventory handlers: public listings and the staff management screens.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::extract::{Form, Path};
use super::forms::{ClassificationForm, DeleteForm, InventoryForm};
use super::middleware::Session;
use super::templates::{
    AddClassificationTemplate, AddInventoryTemplate, ClassificationOption, ClassificationTemplate,
    DeleteConfirmTemplate, DetailTemplate, EditInventoryTemplate, InventoryManagementTemplate,
};
use super::{page, render, AppError, Flash};
use crate::db::{StoreError, Vehicle};
use crate::validation::{classification_rules, inventory_rules, ValidationErrors};
use crate::AppState;

const MANAGEMENT_PATH: &str = "/inv/";
const VEHICLE_NOT_FOUND: &str = "Vehicle not found";

pub async fn by_classification(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Path(classification_id): Path<i64>,
) -> Result<Response, AppError> {
    let classification = state
        .inventory
        .classification(classification_id)
        .await?
        .ok_or_else(|| AppError::not_found("Sorry, that classification does not exist."))?;
    let vehicles = state
        .inventory
        .vehicles_by_classification(classification_id)
        .await?;

    let title = format!("{} Vehicles", classification.classification_name);
    let page = page(&state, &session, &mut flash, title).await?;
    render(StatusCode::OK, flash, ClassificationTemplate { page, vehicles })
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Path(inv_id): Path<i64>,
) -> Result<Response, AppError> {
    let vehicle = find_vehicle(&state, inv_id).await?;
    let title = format!("{} {}", vehicle.inv_year, vehicle.name());
    let page = page(&state, &session, &mut flash, title).await?;
    render(StatusCode::OK, flash, DetailTemplate { page, vehicle })
}

pub async fn management(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Vehicle Management").await?;
    render(StatusCode::OK, flash, InventoryManagementTemplate { page })
}

/// Vehicles of one classification as JSON, for the management table.
pub async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Path(classification_id): Path<i64>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state
        .inventory
        .vehicles_by_classification(classification_id)
        .await?;
    Ok(Json(vehicles))
}

pub async fn add_classification_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Add Classification").await?;
    render(
        StatusCode::OK,
        flash,
        AddClassificationTemplate {
            page,
            classification_name: String::new(),
            errors: ValidationErrors::new(),
        },
    )
}

pub async fn add_classification(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Form(form): Form<ClassificationForm>,
) -> Result<Response, AppError> {
    let form = form.normalized();
    let mut errors = classification_rules()
        .validate(&form, state.accounts.as_ref())
        .await?;

    let status = if errors.is_empty() {
        match state
            .inventory
            .add_classification(&form.classification_name)
            .await
        {
            Ok(classification) => {
                info!(
                    classification_id = classification.classification_id,
                    name = %classification.classification_name,
                    "Classification added"
                );
                let notice = format!(
                    "The {} classification was successfully added.",
                    classification.classification_name
                );
                return Ok((flash.notice(notice), Redirect::to(MANAGEMENT_PATH)).into_response());
            }
            Err(StoreError::Duplicate) => {
                errors.add("classification_name", "That classification already exists.");
                StatusCode::OK
            }
            Err(e) => {
                error!(error = %e, "Failed to add classification");
                flash = flash.notice("Sorry, adding the classification failed.");
                StatusCode::NOT_IMPLEMENTED
            }
        }
    } else {
        StatusCode::OK
    };

    let page = page(&state, &session, &mut flash, "Add Classification").await?;
    render(
        status,
        flash,
        AddClassificationTemplate {
            page,
            classification_name: form.classification_name,
            errors,
        },
    )
}

pub async fn add_inventory_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Add Vehicle").await?;
    let form = InventoryForm::blank();
    let options = ClassificationOption::list(&page.nav, &form.classification_id);
    render(
        StatusCode::OK,
        flash,
        AddInventoryTemplate {
            page,
            form,
            options,
            errors: ValidationErrors::new(),
        },
    )
}

pub async fn add_inventory(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Form(form): Form<InventoryForm>,
) -> Result<Response, AppError> {
    let form = form.normalized();
    let errors = inventory_rules()
        .validate(&form, state.accounts.as_ref())
        .await?;

    let status = match (errors.is_empty(), form.parse()) {
        (true, Some(input)) => match state.inventory.add_vehicle(&input).await {
            Ok(inv_id) => {
                info!(inv_id, "Vehicle added");
                let notice = format!("The {} was successfully added.", input.name());
                return Ok((flash.notice(notice), Redirect::to(MANAGEMENT_PATH)).into_response());
            }
            Err(e) => {
                error!(error = %e, "Failed to add vehicle");
                flash = flash.notice("Sorry, adding the vehicle failed.");
                StatusCode::NOT_IMPLEMENTED
            }
        },
        (true, None) => {
            return Err(AppError::Internal(
                "validated vehicle form did not parse".to_string(),
            ))
        }
        (false, _) => StatusCode::OK,
    };

    let page = page(&state, &session, &mut flash, "Add Vehicle").await?;
    let options = ClassificationOption::list(&page.nav, &form.classification_id);
    render(
        status,
        flash,
        AddInventoryTemplate {
            page,
            form,
            options,
            errors,
        },
    )
}

pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Path(inv_id): Path<i64>,
) -> Result<Response, AppError> {
    let vehicle = find_vehicle(&state, inv_id).await?;
    let form = InventoryForm::from(&vehicle);
    let page = page(&state, &session, &mut flash, format!("Edit {}", form.name())).await?;
    let options = ClassificationOption::list(&page.nav, &form.classification_id);
    render(
        StatusCode::OK,
        flash,
        EditInventoryTemplate {
            page,
            form,
            options,
            errors: ValidationErrors::new(),
        },
    )
}

pub async fn update_inventory(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Form(form): Form<InventoryForm>,
) -> Result<Response, AppError> {
    let form = form.normalized();
    let inv_id = form
        .inv_id
        .ok_or_else(|| AppError::not_found(VEHICLE_NOT_FOUND))?;
    let errors = inventory_rules()
        .validate(&form, state.accounts.as_ref())
        .await?;

    let status = match (errors.is_empty(), form.parse()) {
        (true, Some(input)) => match state.inventory.update_vehicle(inv_id, &input).await {
            Ok(vehicle) => {
                info!(inv_id, "Vehicle updated");
                let notice = format!("The {} was successfully updated.", vehicle.name());
                return Ok((flash.notice(notice), Redirect::to(MANAGEMENT_PATH)).into_response());
            }
            Err(StoreError::NotFound) => return Err(AppError::not_found(VEHICLE_NOT_FOUND)),
            Err(e) => {
                error!(error = %e, inv_id, "Failed to update vehicle");
                flash = flash.notice("Sorry, the update failed.");
                StatusCode::NOT_IMPLEMENTED
            }
        },
        (true, None) => {
            return Err(AppError::Internal(
                "validated vehicle form did not parse".to_string(),
            ))
        }
        (false, _) => StatusCode::OK,
    };

    let page = page(&state, &session, &mut flash, format!("Edit {}", form.name())).await?;
    let options = ClassificationOption::list(&page.nav, &form.classification_id);
    render(
        status,
        flash,
        EditInventoryTemplate {
            page,
            form,
            options,
            errors,
        },
    )
}

pub async fn delete_confirm(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Path(inv_id): Path<i64>,
) -> Result<Response, AppError> {
    let vehicle = find_vehicle(&state, inv_id).await?;
    let title = format!("Delete {}", vehicle.name());
    let page = page(&state, &session, &mut flash, title).await?;
    render(StatusCode::OK, flash, DeleteConfirmTemplate { page, vehicle })
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    flash: Flash,
    Form(form): Form<DeleteForm>,
) -> Response {
    match state.inventory.delete_vehicle(form.inv_id).await {
        Ok(true) => {
            info!(inv_id = form.inv_id, "Vehicle deleted");
            (
                flash.notice("The vehicle was successfully deleted."),
                Redirect::to(MANAGEMENT_PATH),
            )
                .into_response()
        }
        outcome => {
            match outcome {
                Err(e) => error!(error = %e, inv_id = form.inv_id, "Failed to delete vehicle"),
                Ok(_) => warn!(inv_id = form.inv_id, "Vehicle to delete was not found"),
            }
            (
                flash.notice("Sorry, the delete failed."),
                Redirect::to(&format!("/inv/delete/{}", form.inv_id)),
            )
                .into_response()
        }
    }
}

async fn find_vehicle(state: &AppState, inv_id: i64) -> Result<Vehicle, AppError> {
    state
        .inventory
        .vehicle(inv_id)
        .await?
        .ok_or_else(|| AppError::not_found(VEHICLE_NOT_FOUND))
}
