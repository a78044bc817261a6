pub mod dates;
pub mod error;
pub mod extract;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod source;
pub mod telemetry;

pub use error::SourceError;
pub use layout::{Game, LIQUIPEDIA_ORIGIN};
pub use models::Tournament;
pub use provider::MarkupSource;
pub use source::TournamentsApi;
pub use telemetry::TracingReporter;
