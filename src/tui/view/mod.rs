pub mod components;
pub mod screens;

pub use screens::{
    render_brain_wizard, render_connections, render_knowledge_table, render_search,
    render_settings,
};
