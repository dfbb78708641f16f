mod format;
mod statusline;
mod theme;

pub(crate) use statusline::{
    assistant_fallback_line, project_fallback_line, render_assistant_line, render_project_line,
};
