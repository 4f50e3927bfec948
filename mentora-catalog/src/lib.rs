pub mod directory;

pub use directory::{DirectoryError, TutorDirectory};
