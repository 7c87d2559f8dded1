//! iCalendar (RFC 5545) export of appointments.

use chrono::{DateTime, Utc};

use crate::models::appointment::{AppointmentDetail, AppointmentStatus};

const PRODUCT_ID: &str = "-//Lexcita//Citas//ES";
const MAX_LINE_OCTETS: usize = 75;

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes a TEXT property value.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Folds a content line at 75 octets without splitting a UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // the leading space counts toward the continuation line
            used = 1;
        }
        out.push(c);
        used += width;
    }
    out
}

fn status_value(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "TENTATIVE",
        AppointmentStatus::Confirmed | AppointmentStatus::Completed => "CONFIRMED",
        AppointmentStatus::Cancelled => "CANCELLED",
    }
}

fn summary(detail: &AppointmentDetail) -> String {
    let service = detail.service_name.as_deref().unwrap_or("Consulta legal");
    format!("{} con {}", service, detail.lawyer_name)
}

fn description(detail: &AppointmentDetail) -> String {
    let mut text = format!(
        "Cliente: {} <{}>\nAbogado: {}",
        detail.client_name, detail.client_email, detail.lawyer_name
    );
    if let Some(service) = &detail.service_name {
        text.push_str(&format!("\nServicio: {}", service));
    }
    if let Some(notes) = detail.appointment.notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(&format!("\nNotas: {}", notes));
    }
    text
}

/// Renders a calendar named `name` with one event per appointment.
pub fn render(
    name: &str,
    domain: &str,
    appointments: &[AppointmentDetail],
    now: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODUCT_ID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(name)),
    ];

    for detail in appointments {
        let appt = &detail.appointment;
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@{}", appt.id, domain));
        lines.push(format!("DTSTAMP:{}", format_timestamp(now)));
        lines.push(format!("DTSTART:{}", format_timestamp(appt.starts_at)));
        lines.push(format!("DTEND:{}", format_timestamp(appt.ends_at)));
        lines.push(format!("SUMMARY:{}", escape_text(&summary(detail))));
        lines.push(format!("DESCRIPTION:{}", escape_text(&description(detail))));
        lines.push(format!("STATUS:{}", status_value(appt.status)));
        lines.push(format!("LAST-MODIFIED:{}", format_timestamp(appt.updated_at)));
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in lines {
        out.push_str(&fold_line(&line));
        out.push_str("\r\n");
    }
    out
}
