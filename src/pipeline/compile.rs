//! Compiler invocation: write the layout source, then run
//! `<compiler> compile <source> <output>`.
//!
//! Compiler failures never abort the run. They are logged with the captured
//! diagnostics and returned inside a [`CompileReport`] so the images and the
//! layout source stay on disk for a manual retry.
//!
//! The child runs under a timeout with `kill_on_drop`, so a hung compiler is
//! killed rather than blocking the process forever. On Unix the child gets
//! its own process group so anything it spawns dies with it.

use crate::config::SheetConfig;
use crate::error::{CompileError, StickerError};
use crate::output::CompileReport;
use crate::pipeline::layout::LayoutDocument;
use crate::progress::ProgressCallback;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// How to run the external compiler.
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    pub program: String,
    pub timeout: Duration,
}

impl From<&SheetConfig> for CompilerOptions {
    fn from(config: &SheetConfig) -> Self {
        Self {
            program: config.compiler.clone(),
            timeout: Duration::from_secs(config.compile_timeout_secs),
        }
    }
}

/// Write `document` to `source_path`, replacing any existing file.
///
/// Uses a temp file + rename so a crash never leaves a half-written source.
pub async fn write_layout(document: &LayoutDocument, source_path: &Path) -> Result<(), StickerError> {
    if let Some(parent) = source_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StickerError::io(parent, e))?;
    }

    let tmp_path = tmp_path_for(source_path);
    tokio::fs::write(&tmp_path, document.as_str())
        .await
        .map_err(|e| StickerError::io(&tmp_path, e))?;
    if let Err(e) = tokio::fs::rename(&tmp_path, source_path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(StickerError::io(source_path, e));
    }

    info!("Typst file written to {}", source_path.display());
    Ok(())
}

/// Write the layout, then compile it. Only the write can fail the call.
pub async fn write_and_compile(
    document: &LayoutDocument,
    source_path: &Path,
    output_path: &Path,
    options: &CompilerOptions,
    progress: Option<&ProgressCallback>,
) -> Result<CompileReport, StickerError> {
    write_layout(document, source_path).await?;
    if let Some(cb) = progress {
        cb.on_layout_written(source_path);
        cb.on_compile_start(&options.program);
    }
    Ok(compile(source_path, output_path, options).await)
}

/// Run the compiler once on an already-written source.
pub async fn compile(source_path: &Path, output_path: &Path, options: &CompilerOptions) -> CompileReport {
    let start = Instant::now();
    let error = run_compiler(source_path, output_path, options).await.err();
    let duration_ms = start.elapsed().as_millis() as u64;

    match &error {
        None => info!(
            "QR code stickers PDF generated successfully: {} ({}ms)",
            output_path.display(),
            duration_ms
        ),
        Some(e @ CompileError::Launch { .. }) => error!("Error executing compiler command: {}", e),
        Some(e) => error!("Failed to compile {}: {}", source_path.display(), e),
    }

    CompileReport {
        program: options.program.clone(),
        source_path: source_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        duration_ms,
        error,
    }
}

async fn run_compiler(
    source_path: &Path,
    output_path: &Path,
    options: &CompilerOptions,
) -> Result<(), CompileError> {
    let mut cmd = tokio::process::Command::new(&options.program);
    cmd.arg("compile")
        .arg(source_path)
        .arg(output_path)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    debug!(
        "Running {} compile {} {}",
        options.program,
        source_path.display(),
        output_path.display()
    );

    let output = match tokio::time::timeout(options.timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            let detail = if e.kind() == ErrorKind::NotFound {
                format!("program not found ({e})")
            } else {
                e.to_string()
            };
            return Err(CompileError::Launch {
                program: options.program.clone(),
                detail,
            });
        }
        Err(_) => {
            return Err(CompileError::TimedOut {
                program: options.program.clone(),
                timeout: options.timeout,
            });
        }
    };

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let diagnostics = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim_end().to_string()
    } else {
        stderr.trim_end().to_string()
    };

    Err(CompileError::Failed {
        program: options.program.clone(),
        code: output.status.code(),
        diagnostics,
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
