mod brain_wizard;
mod connections;
mod knowledge_table;
mod search;
mod settings;

pub use brain_wizard::render_brain_wizard;
pub use connections::render_connections;
pub use knowledge_table::render_knowledge_table;
pub use search::render_search;
pub use settings::render_settings;
