pub mod error;

pub use error::{MechlabError, Result};
