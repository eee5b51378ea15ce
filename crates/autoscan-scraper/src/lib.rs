//! Marketplace acquisition: the platform catalog, the page-source
//! collaborator, and the per-platform worker plus its fan-out orchestrator.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod page_source;
pub mod platforms;
pub mod registry;
pub mod session;
pub mod text;
pub mod worker;

pub use config::ScraperConfig;
pub use error::{AcquireError, ScraperError};
pub use orchestrator::AcquisitionOrchestrator;
pub use page_source::{HttpPageSource, PageSource};
pub use platforms::PlatformDescriptor;
pub use registry::PlatformRegistry;
pub use session::SessionHost;
pub use text::ContentLimits;
pub use worker::AcquisitionWorker;
