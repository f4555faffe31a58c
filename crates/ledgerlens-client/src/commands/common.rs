const REQUIRED_RECORD_FIELDS: [&str; 3] = ["amount", "merchant", "category"];

const OPTIONAL_RECORD_FIELDS: [&str; 2] = ["gender", "fraud"];

pub(crate) fn required_record_field_names() -> Vec<&'static str> {
    REQUIRED_RECORD_FIELDS.to_vec()
}

pub(crate) fn optional_record_field_names() -> Vec<&'static str> {
    OPTIONAL_RECORD_FIELDS.to_vec()
}
