// Numeric coercion for salary, experience and remote-preference inputs
use crate::record::NumericInput;

/// Outcome of coercing a [`NumericInput`] to a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Nothing was entered (null or blank text)
    Missing,
    /// Something was entered but it is not a finite number
    Invalid,
    Value(f64),
}

impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Coerce user input to a number before any range check runs
pub fn coerce_number(input: &NumericInput) -> Coerced {
    match input {
        NumericInput::Missing => Coerced::Missing,
        NumericInput::Number(n) if n.is_finite() => Coerced::Value(*n),
        NumericInput::Number(_) => Coerced::Invalid,
        NumericInput::Text(text) => coerce_text(text),
    }
}

fn coerce_text(text: &str) -> Coerced {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Coerced::Missing;
    }

    // "30,000" is how people type salaries
    let normalized: String = trimmed.chars().filter(|c| *c != ',').collect();
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Value(v),
        _ => Coerced::Invalid,
    }
}
