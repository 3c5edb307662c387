use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use super::tokenizer::tokenize;
use crate::energy::targets::round_half_up;
use crate::error::ImportError;
use crate::meal::{Meal, MealPool, MealType};

const NAME_COL: &str = "name";
const TYPE_COL: &str = "type";
const KCAL_COL: &str = "kcal";
const PROTEIN_COL: &str = "protein";
const REQUIRED_COLS: [&str; 4] = [NAME_COL, TYPE_COL, KCAL_COL, PROTEIN_COL];

/// Source tag given to every meal created by an import.
pub const CSV_SOURCE: &str = "csv";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Append,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    name: usize,
    meal_type: usize,
    kcal: usize,
    protein: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let positions: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .rev() // first occurrence wins on duplicate headers
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLS
            .iter()
            .filter(|c| !positions.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingHeaders { missing });
        }

        Ok(Self {
            name: positions[NAME_COL],
            meal_type: positions[TYPE_COL],
            kcal: positions[KCAL_COL],
            protein: positions[PROTEIN_COL],
        })
    }
}

/// Why a data row was dropped.
#[derive(Debug, Clone, PartialEq)]
enum RowDefect {
    EmptyName,
    UnknownType(String),
    BadKcal(String),
    BadProtein(String),
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_row(row: &[String], cols: &ColumnIndex) -> Result<Meal, RowDefect> {
    let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

    let name = cell(cols.name).trim();
    if name.is_empty() {
        return Err(RowDefect::EmptyName);
    }
    let raw_type = cell(cols.meal_type);
    let meal_type = MealType::normalize(raw_type).ok_or_else(|| RowDefect::UnknownType(raw_type.to_string()))?;
    let raw_kcal = cell(cols.kcal);
    // Checked after rounding so a stored meal always has kcal >= 1.
    let kcal = parse_number(raw_kcal)
        .map(round_half_up)
        .filter(|k| *k >= 1)
        .ok_or_else(|| RowDefect::BadKcal(raw_kcal.to_string()))?;
    let raw_protein = cell(cols.protein);
    let protein = parse_number(raw_protein)
        .filter(|p| *p >= 0.0)
        .map(round_half_up)
        .ok_or_else(|| RowDefect::BadProtein(raw_protein.to_string()))?;

    Ok(Meal::new(name, meal_type, kcal, protein, CSV_SOURCE))
}

/// Parses CSV text into meals with fresh ids.
///
/// Needs a header row naming `name`, `type`, `kcal` and `protein` (any case, any order)
/// and at least one data row. Rows with an empty name, an unknown type, kcal that rounds
/// below 1 or negative protein are skipped; the import only fails when none survive.
pub fn parse_meals_csv(text: &str) -> Result<Vec<Meal>, ImportError> {
    let rows = tokenize(text);
    if rows.len() < 2 {
        return Err(ImportError::NoDataRows);
    }
    let cols = ColumnIndex::from_header(&rows[0])?;

    let mut meals = Vec::new();
    let mut skipped = 0;
    for (row_index, row) in rows.iter().enumerate().skip(1) {
        match parse_row(row, &cols) {
            Ok(meal) => meals.push(meal),
            Err(defect) => {
                skipped += 1;
                debug!(row = row_index + 1, ?defect, "skipping CSV row");
            }
        }
    }

    if meals.is_empty() {
        return Err(ImportError::NoValidMeals { skipped });
    }
    info!(valid = meals.len(), skipped, "parsed meals from CSV");
    Ok(meals)
}

/// Imports CSV text into a pool. `Append` keeps the current meals, `Replace` starts
/// from an empty pool. On error the caller's pool is left as it was.
pub fn import_meals(pool: &MealPool, text: &str, mode: ImportMode) -> Result<MealPool, ImportError> {
    let parsed = parse_meals_csv(text)?;
    let mut next = match mode {
        ImportMode::Append => pool.clone(),
        ImportMode::Replace => MealPool::new(),
    };
    next.extend(MealPool::from_meals(parsed));
    info!(?mode, pool_size = next.len(), "imported meals");
    Ok(next)
}
