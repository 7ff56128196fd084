pub mod components;
pub mod frequency;
pub mod quality_tier;
pub mod render_settings;
pub mod sample;
pub mod settings_error;
pub mod viz_plugin;
