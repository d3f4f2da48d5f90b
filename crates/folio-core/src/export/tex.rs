/*
 * tex.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * LaTeX (.tex) exports.
 */

use std::path::{Path, PathBuf};

use folio_system_runtime::PathKind;
use folio_tex::{
    TemplateContent, TemplateImports, TexTemplate, TexTemplateImports, merge_tex_template_imports,
    render_default_document, render_tex_imports,
};
use tracing::{debug, info};

use crate::batch::{BatchReport, resolve_and_log_errors};
use crate::build::{clean_output, copy_contents};
use crate::error::Result;
use crate::export::{collect_article_exports, ensure_parent};
use crate::format::ExportFormat;
use crate::project::ProjectContext;
use crate::resolve::ResolvedExport;
use crate::session::ExportSession;

#[derive(Debug, Clone, Default)]
pub struct TexExportOptions {
    pub filename: Option<String>,
    pub clean: bool,
    /// Where named templates are looked up, overriding the project setting
    pub template_dir: Option<PathBuf>,
}

/// Write one `.tex` export of `file`, returning the template it used.
///
/// Supporting files of the template are copied next to the output, so the
/// output folder is self-contained for a later PDF build.
pub async fn run_tex_export(
    session: &ExportSession,
    file: &Path,
    export: &ResolvedExport,
    project: &ProjectContext,
    clean: bool,
) -> Result<Option<TexTemplate>> {
    let runtime = session.runtime.as_ref();
    let output = &export.output;
    if clean {
        clean_output(runtime, output)?;
    }

    let template = export
        .template
        .as_deref()
        .map(|t| TexTemplate::resolve(runtime, t, Some(&project.templates_dir())))
        .transpose()?;

    let content = session.loader.load(runtime, file).await?;
    let rendered = session.tex.render(runtime, &content).await?;

    let math = TexTemplateImports {
        commands: content.frontmatter.math.clone(),
        ..Default::default()
    };
    let imports = TemplateImports::from(merge_tex_template_imports(
        Some(&rendered.imports),
        Some(&math),
    ));
    let preamble = render_tex_imports(
        Some(&imports),
        template.as_ref().map(TexTemplate::packages),
        export.spec.extra_str("preamble"),
    );

    let values = TemplateContent {
        imports: &preamble,
        content: &rendered.body,
        title: content.frontmatter.title.as_deref(),
    };
    let document = match &template {
        Some(template) => template.render(values),
        None => render_default_document(values),
    };

    info!("Writing tex to {}", output.display());
    ensure_parent(session, output)?;
    runtime.file_write(output, document.as_bytes())?;

    if let Some(template) = &template
        && let Some(out_dir) = output.parent()
    {
        for support in template.support_files(runtime)? {
            let Some(name) = support.file_name() else {
                continue;
            };
            let dest = out_dir.join(name);
            debug!("Copying template file {}", support.display());
            if runtime.path_metadata(&support)?.kind == PathKind::Directory {
                if !runtime.is_dir(&dest)? {
                    runtime.dir_create(&dest, true)?;
                }
                copy_contents(runtime, &support, &dest)?;
            } else {
                runtime.file_copy(&support, &dest)?;
            }
        }
    }
    Ok(template)
}

/// Export `file` to every LaTeX output its front matter declares.
pub async fn local_article_to_tex(
    session: &ExportSession,
    file: &Path,
    opts: &TexExportOptions,
) -> Result<BatchReport> {
    let article = collect_article_exports(
        session,
        file,
        ExportFormat::Tex,
        opts.filename.as_deref(),
        opts.template_dir.clone(),
    )?;
    let report = resolve_and_log_errors(article.exports.iter().map(|export| {
        run_tex_export(session, &article.file, export, &article.project, opts.clean)
    }))
    .await;
    Ok(report)
}
