#[derive(Debug, Clone, PartialEq)]
pub enum AmountField {
    Value(f64),
    Missing,
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudStatus {
    NoFraud,
    Fraud,
}

/// Outcome of matching a categorical field against its fixed domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Categorical<T> {
    Known(T),
    Missing,
    Unknown(String),
}

const MARKER_QUOTES: [char; 3] = ['\'', '"', '`'];

pub fn parse_amount(value: Option<&str>) -> AmountField {
    let Some(candidate) = normalize_key(value) else {
        return AmountField::Missing;
    };

    match candidate.parse::<f64>() {
        Ok(amount) if amount.is_finite() => AmountField::Value(amount),
        _ => AmountField::Invalid(candidate),
    }
}

/// Trims a grouping key. Blank keys count as absent.
pub fn normalize_key(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

pub fn classify_gender(value: Option<&str>) -> Categorical<Gender> {
    let Some(marker) = normalize_marker(value) else {
        return Categorical::Missing;
    };

    match marker.as_str() {
        "M" | "MALE" => Categorical::Known(Gender::Male),
        "F" | "FEMALE" => Categorical::Known(Gender::Female),
        _ => Categorical::Unknown(marker),
    }
}

pub fn classify_fraud(value: Option<&str>) -> Categorical<FraudStatus> {
    let Some(marker) = normalize_marker(value) else {
        return Categorical::Missing;
    };

    match marker.parse::<f64>() {
        Ok(flag) if flag == 0.0 => Categorical::Known(FraudStatus::NoFraud),
        Ok(flag) if flag == 1.0 => Categorical::Known(FraudStatus::Fraud),
        _ => Categorical::Unknown(marker),
    }
}

/// Upstream exports wrap markers in stray quotes (`'M'`, `"F"`), so those
/// are peeled off before matching.
fn normalize_marker(value: Option<&str>) -> Option<String> {
    let mut current = value?.trim();
    while let Some(inner) = strip_wrapping_quote(current) {
        current = inner.trim();
    }

    if current.is_empty() {
        return None;
    }
    Some(current.to_ascii_uppercase())
}

fn strip_wrapping_quote(value: &str) -> Option<&str> {
    let first = value.chars().next()?;
    if !MARKER_QUOTES.contains(&first) {
        return None;
    }

    let inner = &value[first.len_utf8()..];
    Some(inner.strip_suffix(first).unwrap_or(inner))
}
