use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use lexcita_core::{
    models::{
        appointment::{AppointmentDetail, AppointmentFilter},
        client::Client,
        company::Company,
        consultation::Consultation,
        contact::ContactMessage,
        lawyer::Lawyer,
        service::LegalService,
    },
    report::{self, ReportKind, ReportRow},
};
use lexcita_db::{
    models::convert_all,
    repositories::{appointment, client, company, consultation, contact, lawyer, service},
};
use std::sync::Arc;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError, extract::AppPath},
    ApiState,
};

/// A downloadable body with the given media type.
pub fn attachment(content_type: &str, file_name: &str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

fn csv_of<R, M>(rows: Vec<R>) -> Result<Vec<u8>, AppError>
where
    M: From<R> + ReportRow,
{
    let rows: Vec<M> = rows.into_iter().map(M::from).collect();
    Ok(report::to_csv(&rows)?)
}

async fn render(state: &ApiState, kind: ReportKind) -> Result<Vec<u8>, AppError> {
    let pool = &state.db_pool;
    match kind {
        ReportKind::Companies => csv_of::<_, Company>(company::list_companies(pool).await?),
        ReportKind::Clients => csv_of::<_, Client>(client::list_clients(pool).await?),
        ReportKind::Lawyers => csv_of::<_, Lawyer>(lawyer::list_lawyers(pool, false).await?),
        ReportKind::Services => {
            csv_of::<_, LegalService>(service::list_services(pool, false).await?)
        }
        ReportKind::Appointments => {
            let filter = AppointmentFilter::default();
            let rows = appointment::list_appointment_details(pool, &filter).await?;
            let rows: Vec<AppointmentDetail> = convert_all(rows)?;
            Ok(report::to_csv(&rows)?)
        }
        ReportKind::Consultations => {
            let rows = consultation::list_consultations(pool, None).await?;
            let rows: Vec<Consultation> = convert_all(rows)?;
            Ok(report::to_csv(&rows)?)
        }
        ReportKind::Contacts => {
            csv_of::<_, ContactMessage>(contact::list_contact_messages(pool, false).await?)
        }
    }
}

/// Admin-only CSV export of one entity.
#[axum::debug_handler]
pub async fn export_report(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(kind): AppPath<String>,
) -> Result<Response, AppError> {
    caller.require_admin()?;
    let kind: ReportKind = kind.parse()?;

    let body = render(&state, kind).await?;
    let file_name = kind.file_name(Utc::now().date_naive());

    tracing::info!("User {} exported {} report", caller.id, kind);
    Ok(attachment("text/csv; charset=utf-8", &file_name, body))
}
