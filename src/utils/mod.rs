pub mod size;

pub use size::{compute_directory_size, run_with_deadline};
