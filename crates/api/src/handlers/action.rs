//! Query-string dispatch for the URLs the public site's scripts call,
//! e.g. `POST /appointments?action=create` or `GET /calendar?action=cita&id=`.
//! Each action forwards to the REST handler that implements it.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use lexcita_core::{errors::LexError, models::appointment::AppointmentFilter};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::{appointment, auth, calendar, report},
    middleware::{
        auth::{AuthUser, MaybeAuthUser},
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ActionQuery {
    fn action(&self) -> &str {
        self.action.as_deref().unwrap_or_default()
    }

    fn require_id(&self) -> Result<Uuid, AppError> {
        self.id.ok_or_else(|| {
            LexError::Validation("El parámetro 'id' es obligatorio".to_string()).into()
        })
    }
}

fn unknown(action: &str) -> AppError {
    LexError::Validation(format!("Acción no válida: '{}'", action)).into()
}

fn body<T: DeserializeOwned>(bytes: &Bytes) -> Result<AppJson<T>, AppError> {
    serde_json::from_slice(bytes)
        .map(AppJson)
        .map_err(|e| LexError::Validation(format!("Cuerpo JSON inválido: {}", e)).into())
}

fn respond<T: IntoResponse>(result: Result<T, AppError>) -> Response {
    match result {
        Ok(ok) => ok.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn appointments_post(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<ActionQuery>,
    bytes: Bytes,
) -> Response {
    match query.action() {
        "create" => match body(&bytes) {
            Ok(payload) => respond(appointment::create_appointment(State(state), payload).await),
            Err(err) => err.into_response(),
        },
        other => unknown(other).into_response(),
    }
}

pub async fn appointments_get(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppQuery(query): AppQuery<ActionQuery>,
    AppQuery(filter): AppQuery<AppointmentFilter>,
) -> Response {
    match query.action() {
        "list" | "" => {
            respond(appointment::list_appointments(State(state), caller, AppQuery(filter)).await)
        }
        "get" => match query.require_id() {
            Ok(id) => {
                respond(appointment::get_appointment(State(state), caller, AppPath(id)).await)
            }
            Err(err) => err.into_response(),
        },
        other => unknown(other).into_response(),
    }
}

pub async fn auth_post(
    State(state): State<Arc<ApiState>>,
    caller: MaybeAuthUser,
    AppQuery(query): AppQuery<ActionQuery>,
    bytes: Bytes,
) -> Response {
    match query.action() {
        "register" => match body(&bytes) {
            Ok(payload) => respond(auth::register(State(state), payload).await),
            Err(err) => err.into_response(),
        },
        "login" => match body(&bytes) {
            Ok(payload) => respond(auth::login(State(state), payload).await),
            Err(err) => err.into_response(),
        },
        "logout" => auth::logout(State(state), caller).await.into_response(),
        other => unknown(other).into_response(),
    }
}

pub async fn auth_get(
    State(state): State<Arc<ApiState>>,
    caller: MaybeAuthUser,
    AppQuery(query): AppQuery<ActionQuery>,
) -> Response {
    match query.action() {
        "status" | "" => auth::status(State(state), caller).await.into_response(),
        "user" => match caller.0 {
            Some(user) => respond(auth::current_user(State(state), user).await),
            None => AppError(LexError::Authentication("Debe iniciar sesión".to_string()))
                .into_response(),
        },
        other => unknown(other).into_response(),
    }
}

pub async fn reports_get(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppQuery(query): AppQuery<ActionQuery>,
) -> Response {
    let kind = query.kind.clone().unwrap_or_default();
    respond(report::export_report(State(state), caller, AppPath(kind)).await)
}

/// `cita`, `cliente` and `abogado` select the appointment, client and lawyer calendars.
pub async fn calendar_get(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppQuery(query): AppQuery<ActionQuery>,
) -> Response {
    let id = match query.require_id() {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    match query.action() {
        "cita" => respond(calendar::appointment_calendar(State(state), caller, AppPath(id)).await),
        "cliente" => respond(calendar::client_calendar(State(state), caller, AppPath(id)).await),
        "abogado" => respond(calendar::lawyer_calendar(State(state), caller, AppPath(id)).await),
        other => unknown(other).into_response(),
    }
}
