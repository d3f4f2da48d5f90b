//! LaTeX support for folio exports
//!
//! This crate turns the packages and math macros collected while rendering a
//! document into preamble text, and loads the LaTeX templates that wrap the
//! rendered body.
//!
//! # Example
//!
//! ```
//! use folio_tex::{
//!     TemplateImports, TexTemplateImports, merge_tex_template_imports, render_tex_imports,
//! };
//!
//! let from_renderer = TexTemplateImports::new().with_import("graphicx");
//! let from_frontmatter = TexTemplateImports::new().with_command("\\R", "\\mathbb{R}");
//! let merged = merge_tex_template_imports(Some(&from_renderer), Some(&from_frontmatter));
//!
//! let imports: TemplateImports = merged.into();
//! let preamble = render_tex_imports(Some(&imports), None, None);
//! assert!(preamble.contains("\\usepackage{graphicx}"));
//! assert!(preamble.contains("\\newcommand{\\R}{\\mathbb{R}}"));
//! ```

pub mod comment;
pub mod error;
pub mod imports;
pub mod template;

pub use comment::{COMMENT_LENGTH, write_tex_labelled_comment};
pub use error::{Result, TexError};
pub use imports::{
    TemplateImports, TexTemplateImports, create_tex_import_commands, create_tex_math_commands,
    merge_tex_template_imports, render_tex_imports,
};
pub use template::{
    TemplateConfig, TemplateContent, TexTemplate, pdf_export_command, render_default_document,
};
