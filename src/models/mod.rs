pub mod images;
pub mod listening;
pub mod reading;
pub mod speaking;
pub mod writing;

pub(crate) fn default_difficulty() -> String {
    "intermediate".to_string()
}
