//! Synthetic seed rows for the demo table
//!
//! Row shape: full name (`registro_01`), profession (`registro_02`), decimal
//! value in [1100, 3800] with 2 decimals (`registro_03`). Ids are either left
//! to the database (auto-increment) or assigned as a contiguous block above
//! the current maximum.

use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Luis", "Ana", "Carlos", "María", "Jorge", "Lucía", "Pedro", "Sofía", "Miguel", "Elena",
    "Raúl", "Isabel", "Fernando", "Patricia", "Diego", "Carmen", "Andrés", "Laura", "Sergio",
    "Marta",
];

pub const LAST_NAMES: &[&str] = &[
    "García", "Martínez", "López", "Sánchez", "Pérez", "Gómez", "Rodríguez", "Fernández", "Ruiz",
    "Hernández",
];

pub const PROFESSIONS: &[&str] = &[
    "Ingeniero", "Profesor", "Médico", "Abogado", "Arquitecto", "Programador", "Diseñador",
    "Contador", "Electricista", "Técnico",
];

/// One row to insert; `id` is `None` when the key auto-increments
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRow {
    pub id: Option<u64>,
    pub name: String,
    pub profession: String,
    pub value: f64,
}

/// First id of the block assigned after `current_max`
#[must_use]
pub fn next_id(current_max: Option<u64>) -> u64 {
    current_max.unwrap_or(0) + 1
}

/// Generate `count` rows. With `start_id = Some(s)` the rows get explicit
/// contiguous ids `s, s+1, …`; with `None` ids are left to the database.
pub fn generate_rows<R: Rng>(rng: &mut R, count: usize, start_id: Option<u64>) -> Vec<SeedRow> {
    (0..count)
        .map(|i| SeedRow {
            id: start_id.map(|s| s + i as u64),
            name: gen_name(rng),
            profession: gen_profession(rng),
            value: gen_value(rng),
        })
        .collect()
}

fn gen_name<R: Rng>(rng: &mut R) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

fn gen_profession<R: Rng>(rng: &mut R) -> String {
    PROFESSIONS[rng.gen_range(0..PROFESSIONS.len())].to_string()
}

fn gen_value<R: Rng>(rng: &mut R) -> f64 {
    let raw: f64 = rng.gen_range(1100.0..=3800.0);
    (raw * 100.0).round() / 100.0
}
