mod central_panel;
mod clear_prompt;
mod tools_panel;

pub use central_panel::central_panel;
pub use clear_prompt::clear_prompt;
pub use tools_panel::tools_panel;
