//! Prompt templates and the topic tables they draw from.

pub mod listening;
pub mod reading;
pub mod speaking;
pub mod writing;

use rand::seq::SliceRandom;

pub(crate) const JSON_ONLY: &str = "Return ONLY the JSON object. Do not wrap it in prose. \
Use double quotes for every key and string, and do not include comments or trailing commas.";

/// Random entry from a static topic table.
pub fn pick<T: Copy + Default>(items: &[T]) -> T {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
