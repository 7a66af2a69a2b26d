pub mod dictionary;
pub mod gloss;
pub mod loader;
pub mod tags;

pub use dictionary::parse_entries;
pub use gloss::JMdictGlossFormatter;
pub use loader::JMdictLoader;
