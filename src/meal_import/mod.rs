pub mod export;
pub mod loader;
pub mod tokenizer;

pub use export::export_meals_csv;
pub use loader::{import_meals, parse_meals_csv, ImportMode, CSV_SOURCE};
pub use tokenizer::tokenize;
