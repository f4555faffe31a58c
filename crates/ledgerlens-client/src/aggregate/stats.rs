use crate::aggregate::AggregateError;

/// Arithmetic mean. Falls back to summing pre-scaled terms when the plain
/// sum leaves the finite range, so finite inputs give a finite mean.
pub fn mean(amounts: &[f64]) -> Result<f64, AggregateError> {
    if amounts.is_empty() {
        return Err(AggregateError::EmptyInput { records_read: 0 });
    }

    let count = amounts.len() as f64;
    let sum: f64 = amounts.iter().sum();
    let value = if sum.is_finite() {
        sum / count
    } else {
        amounts.iter().map(|amount| amount / count).sum()
    };
    finite("mean_amount", value)
}

/// Median over a sorted copy; the caller's slice is left untouched.
pub fn median(amounts: &[f64]) -> Result<f64, AggregateError> {
    if amounts.is_empty() {
        return Err(AggregateError::EmptyInput { records_read: 0 });
    }

    let mut sorted = amounts.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return finite("median_amount", sorted[mid]);
    }
    let (low, high) = (sorted[mid - 1], sorted[mid]);
    finite("median_amount", low / 2.0 + high / 2.0)
}

pub(crate) fn finite(figure: &str, value: f64) -> Result<f64, AggregateError> {
    if value.is_finite() {
        return Ok(value);
    }
    Err(AggregateError::NonFinite {
        figure: figure.to_string(),
    })
}
