use std::error::Error;
use lexcita_core::errors::{LexError, LexResult};

#[test]
fn test_lex_error_display() {
    let not_found = LexError::NotFound("Appointment not found".to_string());
    let validation = LexError::Validation("Invalid input".to_string());
    let conflict = LexError::Conflict("El horario ya está ocupado".to_string());
    let authentication = LexError::Authentication("Invalid password".to_string());
    let authorization = LexError::Authorization("Not authorized".to_string());
    let database = LexError::Database(eyre::eyre!("Database connection failed"));
    let internal = LexError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Appointment not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert!(conflict.to_string().contains("horario ya está ocupado"));
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Invalid password"
    );
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not authorized"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_internal_classification() {
    assert!(LexError::Database(eyre::eyre!("boom")).is_internal());
    assert!(LexError::Internal("boom".into()).is_internal());
    assert!(!LexError::Validation("bad".to_string()).is_internal());
    assert!(!LexError::Conflict("taken".to_string()).is_internal());
}

#[test]
fn test_error_source() {
    let io_error = std::io::Error::other("IO error");
    let lex_error = LexError::Internal(Box::new(io_error));

    assert!(lex_error.source().is_some());
    assert!(lex_error.to_string().contains("IO error"));
}

#[test]
fn test_lex_result() {
    let result: LexResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: LexResult<i32> = Err(LexError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
