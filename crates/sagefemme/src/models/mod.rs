mod template;

pub use template::{CreateTemplate, UpdateTemplate};
