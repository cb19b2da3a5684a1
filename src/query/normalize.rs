//! Column identifier normalization
//!
//! Catalog columns are named in upper or lower snake case (`SERVICE_NAME`).
//! JSON keys are emitted in lowerCamelCase (`serviceName`).

/// Convert a snake_case identifier into lowerCamelCase.
///
/// The identifier is lowercased and split on `_`. The first component is kept
/// as-is and every later component has its first letter capitalized. Empty
/// components (from leading or repeated underscores) contribute nothing.
pub fn to_camel_case(identifier: &str) -> String {
    let lowered = identifier.to_lowercase();
    let mut components = lowered.split('_');

    let mut output = String::with_capacity(lowered.len());
    if let Some(first) = components.next() {
        output.push_str(first);
    }

    for component in components {
        let mut chars = component.chars();
        if let Some(head) = chars.next() {
            output.extend(head.to_uppercase());
            output.push_str(chars.as_str());
        }
    }

    output
}
