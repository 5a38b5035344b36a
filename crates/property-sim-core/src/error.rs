use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropertySimError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown investor category: no stamp duty brackets for '{0}'")]
    UnknownInvestorCategory(String),

    #[error("Year out of range: year {year} requested but the amortization schedule ends at year {max_year}")]
    YearOutOfRange { year: u32, max_year: u32 },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PropertySimError {
    fn from(e: serde_json::Error) -> Self {
        PropertySimError::SerializationError(e.to_string())
    }
}
