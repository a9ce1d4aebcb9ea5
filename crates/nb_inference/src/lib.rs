pub mod brief;
pub mod models;

pub use brief::BriefGenerator;
pub use models::{create_model, ModelKind};
pub use nb_core::InferenceModel;

pub mod prelude {
    pub use super::brief::BriefGenerator;
    pub use super::models::{create_model, ModelKind};
    pub use nb_core::{ContactInfo, Error, InferenceModel, Result};
}
