pub mod storage;
pub mod types;

pub use storage::{get_last_result_path, load_last_result, save_last_result};
pub use types::SavedDiagnostic;
