mod defaults;
mod io;
mod schema;
mod validate;

pub use io::load_config;
pub use schema::{ApiConfig, Config, Convention, DisplayConfig, DisplayMode, PanelColor};
