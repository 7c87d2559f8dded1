//! Keyword-matched canned answers for the site's chat widget.

use serde::{Deserialize, Serialize};

use crate::errors::{LexError, LexResult};

pub const MAX_QUERY_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Appointment,
    Fees,
    Hours,
    Location,
    FamilyLaw,
    LaborLaw,
    CriminalLaw,
    CorporateLaw,
    Contact,
    Greeting,
    Fallback,
}

struct Rule {
    topic: Topic,
    keywords: &'static [&'static str],
    response: &'static str,
    suggestions: &'static [&'static str],
}

// Checked in order; the first rule with a matching keyword answers.
const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Appointment,
        keywords: &["cita", "agendar", "reservar", "turno", "appointment", "book"],
        response: "Puede agendar una cita desde nuestro asistente de citas: elija el servicio, \
                   el abogado y el horario disponible que prefiera.",
        suggestions: &["Ver horarios disponibles", "Servicios legales"],
    },
    Rule {
        topic: Topic::Fees,
        keywords: &["precio", "costo", "cuesta", "honorario", "tarifa", "pagar", "valor"],
        response: "Nuestros honorarios dependen del servicio. La primera consulta de \
                   orientación tiene un valor referencial que le confirmaremos al agendar.",
        suggestions: &["Agendar una cita", "Servicios legales"],
    },
    Rule {
        topic: Topic::Hours,
        keywords: &["horario", "hora", "abierto", "atienden", "atencion"],
        response: "Atendemos de lunes a viernes de 08:00 a 18:00.",
        suggestions: &["Agendar una cita", "Ubicación"],
    },
    Rule {
        topic: Topic::Location,
        keywords: &["ubicacion", "direccion", "donde", "oficina", "llegar"],
        response: "Nuestra oficina principal está en el centro de la ciudad. Encontrará la \
                   dirección exacta y el mapa en la página de contacto.",
        suggestions: &["Contacto", "Horario de atención"],
    },
    Rule {
        topic: Topic::FamilyLaw,
        keywords: &[
            "divorcio",
            "pension alimenticia",
            "alimentos",
            "custodia",
            "tenencia",
            "familia",
        ],
        response: "Nuestro equipo de derecho de familia le asesora en divorcios, pensiones \
                   alimenticias, tenencia y régimen de visitas.",
        suggestions: &["Agendar una cita", "Enviar una consulta"],
    },
    Rule {
        topic: Topic::LaborLaw,
        keywords: &["despido", "laboral", "trabajo", "liquidacion", "empleador", "iess"],
        response: "En materia laboral revisamos despidos, liquidaciones y reclamos ante el \
                   empleador o el IESS.",
        suggestions: &["Agendar una cita", "Enviar una consulta"],
    },
    Rule {
        topic: Topic::CriminalLaw,
        keywords: &["penal", "denuncia", "detenido", "delito", "fiscalia"],
        response: "Brindamos defensa y patrocinio en procesos penales. Si es urgente, llame \
                   directamente a nuestra línea de atención.",
        suggestions: &["Contacto", "Agendar una cita"],
    },
    Rule {
        topic: Topic::CorporateLaw,
        keywords: &["empresa", "compania", "sociedad", "ruc", "contrato", "societario"],
        response: "Asesoramos a empresas en constitución de compañías, contratos y \
                   cumplimiento societario y tributario.",
        suggestions: &["Agendar una cita", "Servicios legales"],
    },
    Rule {
        topic: Topic::Contact,
        keywords: &["contacto", "telefono", "correo", "email", "whatsapp", "llamar"],
        response: "Puede escribirnos desde el formulario de contacto o llamarnos en horario \
                   de oficina.",
        suggestions: &["Enviar un mensaje", "Horario de atención"],
    },
    Rule {
        topic: Topic::Greeting,
        keywords: &["hola", "buenos dias", "buenas tardes", "buenas noches", "saludos"],
        response:
            "¡Hola! Soy el asistente virtual del estudio jurídico. ¿En qué puedo ayudarle?",
        suggestions: &["Agendar una cita", "Servicios legales", "Horario de atención"],
    },
];

const FALLBACK: Rule = Rule {
    topic: Topic::Fallback,
    keywords: &[],
    response: "No tengo una respuesta para eso. Le recomendamos agendar una consulta con \
               uno de nuestros abogados.",
    suggestions: &["Agendar una cita", "Enviar una consulta"],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotReply {
    pub success: bool,
    pub topic: Topic,
    pub response: String,
    pub suggestions: Vec<String>,
}

/// Lowercases and strips Spanish diacritics, keeping only words.
pub fn normalize(text: &str) -> Vec<String> {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            c if c.is_alphanumeric() => c,
            _ => ' ',
        })
        .collect();
    folded.split_whitespace().map(str::to_string).collect()
}

fn matches(words: &[String], joined: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        joined.contains(keyword)
    } else {
        words.iter().any(|w| w.starts_with(keyword))
    }
}

pub fn reply(query: &str) -> LexResult<ChatbotReply> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LexError::Validation("La consulta no puede estar vacía".to_string()));
    }
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(LexError::Validation(format!(
            "La consulta no puede superar {} caracteres",
            MAX_QUERY_LENGTH
        )));
    }

    let words = normalize(query);
    let joined = words.join(" ");
    let rule = RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| matches(&words, &joined, k)))
        .unwrap_or(&FALLBACK);

    Ok(ChatbotReply {
        success: true,
        topic: rule.topic,
        response: rule.response.to_string(),
        suggestions: rule.suggestions.iter().map(|s| s.to_string()).collect(),
    })
}
