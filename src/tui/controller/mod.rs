pub mod brain_wizard;
pub mod common;
pub mod connections;
pub mod knowledge_table;
pub mod search;
pub mod settings;

pub use brain_wizard::handle_brain_wizard_key;
pub use common::{
    handle_confirm_brain_removal_key, handle_confirm_delete_key, handle_help_key, handle_result_key,
};
pub use connections::handle_connections_key;
pub use knowledge_table::{handle_knowledge_table_click, handle_knowledge_table_key};
pub use search::handle_search_key;
pub use settings::handle_settings_key;
