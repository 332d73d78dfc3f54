//! Domain models and field validation

pub mod camper;
pub mod signup;
pub mod validation;

pub use camper::{CamperAge, CamperName, CamperPatch};
pub use signup::SignupTime;
pub use validation::ValidationError;
