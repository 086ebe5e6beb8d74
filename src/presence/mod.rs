//! Campus-presence construction from parsed course records.

pub mod builder;
pub mod validator;

pub use builder::{build_schedule, BuildOptions, DEFAULT_CO_CURRICULAR_END, SENIOR_GRADE};
pub use validator::{CourseValidator, ValidationResult, ValidationStats};
