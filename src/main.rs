//! annodoc — generate API reference pages from annotated `/** ... */` comments.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `annodoc < source.js > doc.html`
//! - **file mode**: `annodoc -o docs --page index=tpl/index.html src/*.js`
//!
//! In file mode every input is parsed as one stream, in sorted path order, so
//! a class opened in one file can be extended by comments in the next.

mod model;
mod page;
mod parser;
mod render;
mod toc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use page::{FragmentDir, Fragments, NoFragments, PageSet};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "annodoc",
    about = "Generate HTML documentation from annotated block comments"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: html (default), json, markdown
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Page to generate, as NAME=TEMPLATE_FILE. Can be specified multiple times.
    /// Templates may use %(include NAME), %(index) and %(contents).
    #[arg(long = "page", value_name = "NAME=TEMPLATE")]
    pages: Vec<String>,

    /// Directory that %(include NAME) fragments are read from
    #[arg(long, value_name = "DIR")]
    fragments: Option<PathBuf>,

    /// Log dropped annotations and other details to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Log to stderr. `ANNODOC_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ANNODOC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// stdin mode: read stdin, render the default page to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    if !cli.pages.is_empty() {
        bail!("--page requires input files and --output");
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let ns = parser::parse(&input);
    let renderer = render::create_renderer(&cli.format)?;
    let pages = PageSet::default_for(renderer.as_ref());
    let fragments = fragment_source(cli.fragments.as_deref());

    for (_, text) in pages.render(renderer.as_ref(), &ns, fragments.as_ref()) {
        print!("{}", text);
    }
    Ok(())
}

/// file mode: parse all files as one stream, write each page to the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    // Validate everything that can fail before touching the output directory
    let renderer = render::create_renderer(&cli.format)?;
    let pages = if cli.pages.is_empty() {
        PageSet::default_for(renderer.as_ref())
    } else {
        PageSet::from_specs(&cli.pages)?
    };
    let fragments = fragment_source(cli.fragments.as_deref());

    let input_files = expand_globs(&cli.files)?;

    let mut builder = parser::builder::Builder::new();
    for path in &input_files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        tracing::debug!(file = %path.display(), "parsing");
        builder = parser::parse_into(builder, &content);
    }
    let ns = builder.finish();
    if ns.is_empty() {
        tracing::warn!("no documented classes or mixins found");
    }
    tracing::info!(entities = ns.len(), files = input_files.len(), "parsed");

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for (name, text) in pages.render(renderer.as_ref(), &ns, fragments.as_ref()) {
        let out_path = output_dir.join(page_file_name(&name, renderer.file_extension()));
        fs::write(&out_path, &text)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::info!(page = %name, path = %out_path.display(), "wrote page");
    }

    Ok(())
}

fn fragment_source(dir: Option<&Path>) -> Box<dyn Fragments> {
    match dir {
        Some(dir) => Box::new(FragmentDir(dir.to_path_buf())),
        None => Box::new(NoFragments),
    }
}

/// File extensions recognized as source files when scanning directories.
const SUPPORTED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// "index" + "html" → "index.html"
fn page_file_name(name: &str, ext: &str) -> String {
    format!("{}.{}", name, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn page_file_names() {
        assert_eq!(page_file_name("index", "html"), "index.html");
        assert_eq!(page_file_name("api", "json"), "api.json");
    }

    #[test]
    fn supported_extensions() {
        assert!(has_supported_extension(Path::new("src/layer.js")));
        assert!(has_supported_extension(Path::new("lib.mjs")));
        assert!(!has_supported_extension(Path::new("doc.py")));
        assert!(!has_supported_extension(Path::new("Makefile")));
    }

    #[test]
    fn expand_directory_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.js", "a.js", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = expand_globs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.js", "b.js"]);
    }

    #[test]
    fn expand_dedups_overlapping_patterns() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "").unwrap();
        let pattern = format!("{}/*.js", dir.path().display());
        let files = expand_globs(&[file.to_string_lossy().to_string(), pattern]).unwrap();
        assert_eq!(files.len(), 1);
    }
}
