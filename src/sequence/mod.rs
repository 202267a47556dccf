pub mod artifact;
pub mod conversion;
pub mod definition;
pub mod history;
pub mod validation;

pub use artifact::*;
pub use conversion::*;
pub use definition::*;
pub use history::*;
pub use validation::*;
