use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::meal::MealPool;

/// Writes the pool back out as `name,type,kcal,protein` CSV that the importer accepts.
pub fn export_meals_csv(pool: &MealPool) -> Result<String> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    wtr.write_record(["name", "type", "kcal", "protein"])?;
    for meal in pool.iter() {
        wtr.write_record([
            meal.name.as_str(),
            meal.meal_type.label(),
            meal.kcal.to_string().as_str(),
            meal.protein.to_string().as_str(),
        ])
        .with_context(|| format!("Failed to write CSV record for meal '{}'", meal.name))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("Exported CSV was not valid UTF-8")
}
