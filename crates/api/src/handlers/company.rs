use axum::{extract::State, Json};
use lexcita_core::{
    errors::LexError,
    models::{
        company::{Company, CompanyInput},
        response::{Ack, Created, Listing, Single},
        user::Role,
    },
};
use lexcita_db::repositories::company;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::AuthUser,
        error_handling::{constraint_error, AppError},
        extract::{AppJson, AppPath},
    },
    ApiState,
};

const DUPLICATE_RUC: &str = "Ya existe una empresa con ese RUC";
const COMPANY_IN_USE: &str = "La empresa tiene abogados, clientes o citas asociados";

fn not_found(id: Uuid) -> LexError {
    LexError::NotFound(format!("Empresa {} no encontrada", id))
}

#[axum::debug_handler]
pub async fn list_companies(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Listing<Company>>, AppError> {
    user.require_any(&[Role::Admin, Role::Lawyer])?;

    let rows = company::list_companies(&state.db_pool).await?;
    Ok(Json(Listing::new(rows.into_iter().map(Company::from).collect())))
}

#[axum::debug_handler]
pub async fn get_company(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<Company>>, AppError> {
    user.require_any(&[Role::Admin, Role::Lawyer])?;

    let row = company::get_company_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn create_company(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppJson(payload): AppJson<CompanyInput>,
) -> Result<Json<Created>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = company::create_company(&state.db_pool, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_RUC, COMPANY_IN_USE))?;

    tracing::info!("Created company {}", row.id);
    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn update_company(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<CompanyInput>,
) -> Result<Json<Single<Company>>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = company::update_company(&state.db_pool, id, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_RUC, COMPANY_IN_USE))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn delete_company(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Ack>, AppError> {
    user.require_admin()?;

    let deleted = company::delete_company(&state.db_pool, id)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_RUC, COMPANY_IN_USE))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!("Deleted company {}", id);
    Ok(Json(Ack::new("Empresa eliminada")))
}
