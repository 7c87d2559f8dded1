//! Ecuadorian identification numbers.
//!
//! A cédula has ten digits: a two-digit province code, a third digit below 6
//! for natural persons, six serial digits and a modulus-10 check digit. A RUC
//! has thirteen digits and comes in three flavours keyed on the third digit:
//! natural persons (cédula plus establishment suffix), public entities (6)
//! and private companies (9), the last two checked with modulus 11.

use serde::{Deserialize, Serialize};

const PROVINCES: std::ops::RangeInclusive<u32> = 1..=24;
const PUBLIC_WEIGHTS: [u32; 8] = [3, 2, 7, 6, 5, 4, 3, 2];
const PRIVATE_WEIGHTS: [u32; 9] = [4, 3, 2, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    Cedula,
    RucNatural,
    RucPublic,
    RucPrivate,
}

fn digits(value: &str) -> Option<Vec<u32>> {
    value.chars().map(|c| c.to_digit(10)).collect()
}

fn province_ok(d: &[u32]) -> bool {
    PROVINCES.contains(&(d[0] * 10 + d[1]))
}

fn modulus10_ok(d: &[u32]) -> bool {
    let sum: u32 = d[..9]
        .iter()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    (10 - sum % 10) % 10 == d[9]
}

fn modulus11_ok(d: &[u32], weights: &[u32], check_index: usize) -> bool {
    let sum: u32 = d.iter().zip(weights).map(|(digit, w)| digit * w).sum();
    let check = match sum % 11 {
        0 => 0,
        r => 11 - r,
    };
    check < 10 && check == d[check_index]
}

fn cedula_digits_ok(d: &[u32]) -> bool {
    d.len() >= 10 && province_ok(d) && d[2] < 6 && modulus10_ok(d)
}

pub fn is_valid_cedula(value: &str) -> bool {
    match digits(value) {
        Some(d) if d.len() == 10 => cedula_digits_ok(&d),
        _ => false,
    }
}

/// Classifies a RUC, returning `None` when it is not valid.
pub fn ruc_kind(value: &str) -> Option<IdentityKind> {
    let d = digits(value).filter(|d| d.len() == 13)?;
    if !province_ok(&d) {
        return None;
    }
    match d[2] {
        0..=5 => (cedula_digits_ok(&d) && d[10..] != [0, 0, 0]).then_some(IdentityKind::RucNatural),
        6 => (modulus11_ok(&d, &PUBLIC_WEIGHTS, 8) && d[9..] != [0, 0, 0, 0])
            .then_some(IdentityKind::RucPublic),
        9 => (modulus11_ok(&d, &PRIVATE_WEIGHTS, 9) && d[10..] != [0, 0, 0])
            .then_some(IdentityKind::RucPrivate),
        _ => None,
    }
}

pub fn is_valid_ruc(value: &str) -> bool {
    ruc_kind(value).is_some()
}

/// Validates either form, dispatching on length.
pub fn classify(value: &str) -> Option<IdentityKind> {
    match value.len() {
        10 => is_valid_cedula(value).then_some(IdentityKind::Cedula),
        13 => ruc_kind(value),
        _ => None,
    }
}
