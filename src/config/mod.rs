//! Configuration module

mod site;

pub use site::AboutConfig;
pub use site::AboutEntry;
pub use site::CompileConfig;
pub use site::ContentConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::SourceKind;
pub use site::StyleConfig;
