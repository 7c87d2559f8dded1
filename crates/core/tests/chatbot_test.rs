use pretty_assertions::assert_eq;
use rstest::rstest;

use lexcita_core::{
    chatbot::{normalize, reply, Topic, MAX_QUERY_LENGTH},
    errors::LexError,
};

#[test]
fn test_normalize_strips_accents_and_punctuation() {
    assert_eq!(
        normalize("¿Dónde está la OFICINA? Niño, pensión."),
        vec!["donde", "esta", "la", "oficina", "nino", "pension"]
    );
}

#[rstest]
#[case("Quisiera agendar una cita", Topic::Appointment)]
#[case("¿Cuánto cuesta una consulta?", Topic::Fees)]
#[case("¿Cuál es su horario?", Topic::Hours)]
#[case("¿Dónde están ubicados?", Topic::Location)]
#[case("Necesito ayuda con un divorcio", Topic::FamilyLaw)]
#[case("Pensión alimenticia para mi hijo", Topic::FamilyLaw)]
#[case("Me hicieron un despido intempestivo", Topic::LaborLaw)]
#[case("Quiero poner una denuncia", Topic::CriminalLaw)]
#[case("Constituir una compañía", Topic::CorporateLaw)]
#[case("Su teléfono por favor", Topic::Contact)]
#[case("Hola", Topic::Greeting)]
#[case("Buenos días", Topic::Greeting)]
#[case("Tengo una pregunta sobre patentes", Topic::Fallback)]
fn test_topics(#[case] query: &str, #[case] topic: Topic) {
    let answer = reply(query).unwrap();
    assert_eq!(answer.topic, topic);
    assert!(answer.success);
    assert!(!answer.response.is_empty());
    assert!(!answer.suggestions.is_empty());
}

#[test]
fn test_specific_topic_wins_over_greeting() {
    assert_eq!(reply("Hola, quiero una cita").unwrap().topic, Topic::Appointment);
}

#[test]
fn test_keywords_match_word_starts_only() {
    // "solicitar" contains "cita" but is not an appointment keyword
    assert_eq!(reply("solicitar informacion de patentes").unwrap().topic, Topic::Fallback);
}

#[test]
fn test_rejects_empty_and_oversized_queries() {
    assert!(matches!(reply("   "), Err(LexError::Validation(_))));
    let long = "a".repeat(MAX_QUERY_LENGTH + 1);
    assert!(matches!(reply(&long), Err(LexError::Validation(_))));
}
