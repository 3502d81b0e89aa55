pub mod state;
pub mod wizard;

pub use state::{DraftProduct, FieldErrors, Step};
pub use wizard::EstimationWizard;
