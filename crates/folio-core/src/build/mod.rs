//! Build pipeline: isolated workspaces, compiler invocation and copy-back.

pub mod clean;
pub mod pdf;
pub mod workspace;

pub use clean::clean_output;
pub use pdf::{PdfBuildOptions, build_command, create_pdf_given_tex_export};
pub use workspace::{BuildWorkspace, copy_contents};
