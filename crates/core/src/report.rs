//! Semicolon-delimited CSV exports.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
    errors::{LexError, LexResult},
    models::{
        appointment::AppointmentDetail, client::Client, company::Company,
        consultation::Consultation, contact::ContactMessage, lawyer::Lawyer,
        service::LegalService,
    },
};

const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Companies,
    Clients,
    Lawyers,
    Services,
    Appointments,
    Consultations,
    Contacts,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Companies => "companies",
            ReportKind::Clients => "clients",
            ReportKind::Lawyers => "lawyers",
            ReportKind::Services => "services",
            ReportKind::Appointments => "appointments",
            ReportKind::Consultations => "consultations",
            ReportKind::Contacts => "contacts",
        }
    }

    pub fn file_name(&self, today: chrono::NaiveDate) -> String {
        format!("{}_{}.csv", self.as_str(), today.format("%Y%m%d"))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = LexError;

    /// Accepts the English names and the Spanish ones the public site uses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "companies" | "empresas" => Ok(ReportKind::Companies),
            "clients" | "clientes" => Ok(ReportKind::Clients),
            "lawyers" | "abogados" => Ok(ReportKind::Lawyers),
            "services" | "servicios" => Ok(ReportKind::Services),
            "appointments" | "citas" => Ok(ReportKind::Appointments),
            "consultations" | "consultas" => Ok(ReportKind::Consultations),
            "contacts" | "contactos" => Ok(ReportKind::Contacts),
            other => Err(LexError::Validation(format!(
                "Tipo de reporte no válido: {}",
                other
            ))),
        }
    }
}

/// A record that can be written as one CSV row.
pub trait ReportRow {
    const HEADERS: &'static [&'static str];

    fn record(&self) -> Vec<String>;
}

fn ts(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl ReportRow for Company {
    const HEADERS: &'static [&'static str] =
        &["id", "nombre", "ruc", "email", "telefono", "direccion", "creado"];

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.ruc.clone(),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.address),
            ts(self.created_at),
        ]
    }
}

impl ReportRow for Client {
    const HEADERS: &'static [&'static str] =
        &["id", "nombre", "email", "telefono", "cedula", "empresa_id", "creado"];

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            opt(&self.phone),
            opt(&self.cedula),
            self.company_id.map(|id| id.to_string()).unwrap_or_default(),
            ts(self.created_at),
        ]
    }
}

impl ReportRow for Lawyer {
    const HEADERS: &'static [&'static str] =
        &["id", "nombre", "email", "telefono", "especialidad", "empresa_id", "activo", "creado"];

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            opt(&self.phone),
            opt(&self.specialty),
            self.company_id.map(|id| id.to_string()).unwrap_or_default(),
            if self.active { "si" } else { "no" }.to_string(),
            ts(self.created_at),
        ]
    }
}

impl ReportRow for LegalService {
    const HEADERS: &'static [&'static str] =
        &["id", "nombre", "descripcion", "duracion_min", "precio", "activo"];

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.description),
            self.duration_minutes.to_string(),
            format!("{}.{:02}", self.price_cents / 100, self.price_cents % 100),
            if self.active { "si" } else { "no" }.to_string(),
        ]
    }
}

impl ReportRow for AppointmentDetail {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "cliente",
        "email_cliente",
        "abogado",
        "servicio",
        "inicio_utc",
        "fin_utc",
        "duracion_min",
        "estado",
        "notas",
    ];

    fn record(&self) -> Vec<String> {
        let appt = &self.appointment;
        vec![
            appt.id.to_string(),
            self.client_name.clone(),
            self.client_email.clone(),
            self.lawyer_name.clone(),
            opt(&self.service_name),
            ts(appt.starts_at),
            ts(appt.ends_at),
            appt.duration_minutes.to_string(),
            appt.status.to_string(),
            opt(&appt.notes),
        ]
    }
}

impl ReportRow for Consultation {
    const HEADERS: &'static [&'static str] =
        &["id", "nombre", "email", "telefono", "area", "mensaje", "estado", "creado"];

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            opt(&self.phone),
            opt(&self.practice_area),
            self.message.clone(),
            self.status.to_string(),
            ts(self.created_at),
        ]
    }
}

impl ReportRow for ContactMessage {
    const HEADERS: &'static [&'static str] =
        &["id", "nombre", "email", "telefono", "asunto", "mensaje", "leido", "creado"];

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            opt(&self.phone),
            opt(&self.subject),
            self.message.clone(),
            if self.read { "si" } else { "no" }.to_string(),
            ts(self.created_at),
        ]
    }
}

/// Writes `rows` as a BOM-prefixed, semicolon-delimited CSV document.
pub fn to_csv<T: ReportRow>(rows: &[T]) -> LexResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(BOM.to_vec());

    writer
        .write_record(T::HEADERS)
        .map_err(|e| LexError::Internal(Box::new(e)))?;
    for row in rows {
        writer
            .write_record(row.record())
            .map_err(|e| LexError::Internal(Box::new(e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| LexError::Internal(e.to_string().into()))
}
