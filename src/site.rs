//! Page generation: turns a tree of markdown files into HTML pages.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::markdown_to_html;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// The text of the first line starting with `# `.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::MissingTitle)
}

/// Render one page into `template`, pointing root-relative links at
/// `base_path`.
pub fn render_page(markdown: &str, template: &str, base_path: &str) -> Result<String> {
    let title = extract_title(markdown)?;
    let content = markdown_to_html(markdown)?;

    let page = template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content)
        .replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"));
    Ok(page)
}

pub fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Template {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the markdown file at `from` to `dest`, creating parent directories.
pub fn generate_page(from: &Path, template: &str, dest: &Path, base_path: &str) -> Result<()> {
    info!("Generating page {} -> {}", from.display(), dest.display());

    let markdown = read(from)?;
    let page = render_page(&markdown, template, base_path).map_err(|source| Error::Page {
        path: from.to_path_buf(),
        source: Box::new(source),
    })?;

    if let Some(parent) = dest.parent() {
        create_dir_all(parent)?;
    }
    fs::write(dest, page).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout into `dest_dir`. Returns the number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
) -> Result<usize> {
    let mut count = 0;

    for path in sorted_entries(content_dir)? {
        let name = path.file_name().unwrap_or_default();
        if path.is_dir() {
            count += generate_pages_recursive(&path, template, &dest_dir.join(name), base_path)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let dest = dest_dir.join(name).with_extension("html");
            generate_page(&path, template, &dest, base_path)?;
            count += 1;
        } else {
            warn!("Skipping non-markdown file {}", path.display());
        }
    }

    Ok(count)
}

/// Replace `dest_dir` with a copy of `static_dir`. Returns the number of
/// files copied.
pub fn copy_static(static_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if dest_dir.exists() {
        debug!("Removing {}", dest_dir.display());
        fs::remove_dir_all(dest_dir).map_err(|source| Error::Write {
            path: dest_dir.to_path_buf(),
            source,
        })?;
    }
    copy_dir(static_dir, dest_dir)
}

fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    create_dir_all(to)?;
    let mut count = 0;

    for path in sorted_entries(from)? {
        let target = to.join(path.file_name().unwrap_or_default());
        if path.is_dir() {
            count += copy_dir(&path, &target)?;
        } else {
            debug!("Copying {} -> {}", path.display(), target.display());
            fs::copy(&path, &target).map_err(|source| Error::Write {
                path: target.clone(),
                source,
            })?;
            count += 1;
        }
    }

    Ok(count)
}

// Sorted so generation order and logs are stable across platforms.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| Error::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;
    paths.sort();
    Ok(paths)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
