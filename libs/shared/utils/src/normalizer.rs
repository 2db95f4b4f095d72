//! Display-name helpers.

fn clean(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// "First Last", or whichever part is present.
pub fn normalize_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    normalize_name_with_middle(first_name, None, last_name)
}

pub fn normalize_name_with_middle(
    first_name: Option<&str>,
    middle_name: Option<&str>,
    last_name: Option<&str>,
) -> Option<String> {
    let parts: Vec<&str> = [first_name, middle_name, last_name]
        .into_iter()
        .filter_map(clean)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// "Last, First", or whichever part is present.
pub fn normalize_name_with_last_first(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    match (clean(first_name), clean(last_name)) {
        (Some(first), Some(last)) => Some(format!("{}, {}", last, first)),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}
