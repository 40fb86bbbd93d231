pub mod analysis;
pub mod context;
pub mod kb;

pub use analysis::AnalyzeResult;
pub use context::{CompanyType, Context};
