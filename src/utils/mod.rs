pub mod errors;

pub use errors::{render_error, ChartError};
