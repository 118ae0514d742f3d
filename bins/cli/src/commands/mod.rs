//! CLI command handlers.

pub mod cameras;
pub mod schema;
pub mod show;
pub mod template;
pub mod validate;

pub use cameras::{run_add_camera, run_remove_camera};
pub use schema::run_schema;
pub use show::run_show;
pub use template::run_template;
pub use validate::run_validate;
