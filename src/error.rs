use thiserror::Error;

/// Structural failure of a whole CSV import. Nothing is added to the pool when one of
/// these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV has no data rows.")]
    NoDataRows,
    #[error("Missing required headers. Need: name,type,kcal,protein")]
    MissingHeaders { missing: Vec<String> },
    #[error("No valid meals parsed. Check your rows.")]
    NoValidMeals { skipped: usize },
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("No meal with id '{0}' in the pool")]
    UnknownMeal(String),
    #[error("Enter weight, height and age (all positive) before auto-assigning meals")]
    InsufficientProfile,
}
