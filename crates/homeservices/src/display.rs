/// Shown when a user has no usable name.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Public form of a person's name: first name and the initial of the last one.
///
/// `"Maria da Silva"` becomes `"Maria S."`; single names are kept whole.
pub fn mask_display_name(full_name: &str) -> String {
    let mut parts = full_name.split_whitespace();
    let Some(first) = parts.next() else {
        return ANONYMOUS_NAME.to_string();
    };

    match parts.last().and_then(|last| last.chars().next()) {
        Some(initial) => format!("{first} {}.", initial.to_uppercase()),
        None => first.to_string(),
    }
}
