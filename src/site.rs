use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};

/// Delete `dir` if it exists and recreate it empty.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        log::info!("Deleting {}", dir.display());
        fs::remove_dir_all(dir).map_err(Error::io(dir))?;
    }
    fs::create_dir_all(dir).map_err(Error::io(dir))?;
    log::info!("Created {}", dir.display());
    Ok(())
}

/// Copy every file under `src` into `dst`, creating directories as needed.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(Error::io(dst))?;
    for entry in sorted_entries(src)? {
        let from = entry.as_path();
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dst.join(name);
        if from.is_dir() {
            copy_dir_recursive(from, &to)?;
        } else {
            fs::copy(from, &to).map_err(Error::io(from))?;
            log::info!("Copied {} -> {}", from.display(), to.display());
        }
    }
    Ok(())
}

/// Fill the template placeholders and rewrite site-absolute references to
/// live under the configured base path.
pub fn render_page(template: &str, config: &Config, title: &str, content: &str) -> String {
    let page = template
        .replace(&config.template.title_placeholder, title)
        .replace(&config.template.content_placeholder, content);

    let base = &config.site.base_path;
    if base == "/" {
        return page;
    }
    page.replace("href=\"/", &format!("href=\"{base}"))
        .replace("src=\"/", &format!("src=\"{base}"))
}

/// Render one Markdown file to `dest` through the template at `template_path`.
pub fn generate_page(from: &Path, template_path: &Path, dest: &Path, config: &Config) -> Result<()> {
    log::info!(
        "Generating page from {} to {} using {}",
        from.display(),
        dest.display(),
        template_path.display()
    );
    let markdown = fs::read_to_string(from).map_err(Error::io(from))?;
    let template = fs::read_to_string(template_path).map_err(Error::io(template_path))?;

    let convert_err = |source| Error::Convert {
        path: from.to_path_buf(),
        source,
    };
    let content = crate::markdown_to_html(&markdown).map_err(convert_err)?;
    let title = crate::extract_title(&markdown).map_err(convert_err)?;

    let page = render_page(&template, config, &title, &content);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    fs::write(dest, page).map_err(Error::io(dest))
}

/// Render every `.md` file under `content_dir` to the mirrored `.html` path
/// under `dest_dir` and copy other files across unchanged. Returns the
/// number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    config: &Config,
) -> Result<usize> {
    let mut count = 0;
    for entry in sorted_entries(content_dir)? {
        let from = entry.as_path();
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dest_dir.join(name);
        if from.is_dir() {
            count += generate_pages_recursive(from, template_path, &to, config)?;
        } else if from.extension().is_some_and(|ext| ext == "md") {
            generate_page(from, template_path, &to.with_extension("html"), config)?;
            count += 1;
        } else {
            fs::create_dir_all(dest_dir).map_err(Error::io(dest_dir))?;
            fs::copy(from, &to).map_err(Error::io(from))?;
            log::info!("Copied {} -> {}", from.display(), to.display());
        }
    }
    Ok(count)
}

/// Build the whole site described by `config`. Returns the number of pages
/// generated.
pub fn build_site(config: &Config) -> Result<usize> {
    let site = &config.site;
    prepare_output_dir(&site.output_dir)?;
    if site.static_dir.is_dir() {
        copy_dir_recursive(&site.static_dir, &site.output_dir)?;
    } else {
        log::debug!("No static directory at {}", site.static_dir.display());
    }
    generate_pages_recursive(
        &site.content_dir,
        &config.template.path,
        &site.output_dir,
        config,
    )
}

fn sorted_entries(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(Error::io(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(Error::io(dir))?;
    paths.sort();
    Ok(paths)
}
