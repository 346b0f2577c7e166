//! User-facing confirmation and failure copy. The store returns typed
//! results; turning those into flash messages is the boundary layer's job,
//! and the strings live here so they stay out of the data-access code.

use crate::error::DirectoryError;

pub fn listed(entity: &str, name: &str) -> String {
    format!("{entity} {name} was successfully listed!")
}

pub fn updated(entity: &str, name: &str) -> String {
    format!("{entity} {name} was successfully updated!")
}

pub fn not_listed(entity: &str, name: &str) -> String {
    format!("An error occurred. {entity} {name} could not be listed.")
}

pub fn not_updated(entity: &str, name: &str) -> String {
    format!("An error occurred. {entity} {name} could not be updated.")
}

pub fn show_listed() -> String {
    "Show was successfully listed!".to_string()
}

pub fn show_not_listed() -> String {
    "An error occurred. Show could not be listed.".to_string()
}

/// Message for a failed write. Validation problems are shown verbatim;
/// persistence faults get the generic line while the detail is logged
/// server-side.
pub fn write_failure(entity: &str, name: &str, err: &DirectoryError) -> String {
    match err {
        DirectoryError::Validation(problems) => problems.join("; "),
        _ => not_listed(entity, name),
    }
}
