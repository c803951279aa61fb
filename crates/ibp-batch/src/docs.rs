//! Markdown documentation for processed plugins.
//!
//! Each plugin gets a page under `<docs>/plugins/` pairing every sample image
//! with its processed output, followed by the configuration that produced
//! it. Image links are relative to that directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BatchError;
use crate::task::output_file_name;

/// Title of the documentation index.
pub const INDEX_TITLE: &str = "Image Batch Processor Filters";

const DOCS_TARGET: &str = "ibp_batch::docs";

/// Content of one plugin page.
#[derive(Debug, Clone, Copy)]
pub struct PluginPage<'a> {
    /// Plugin short id, used as title and output suffix.
    pub short_id: &'a str,
    /// Plugin description.
    pub description: &'a str,
    /// Sample images, in table order.
    pub images: &'a [PathBuf],
    /// Rendered legacy configuration.
    pub config: &'a str,
}

impl PluginPage<'_> {
    /// Renders the page.
    #[must_use]
    pub fn render(&self) -> String {
        let mut page = format!(
            "# {}\n\n{}\n\n| Input | Output |\n|--------|--------|\n",
            self.short_id, self.description
        );
        for image in self.images {
            let stem = image
                .file_stem()
                .map(|stem| stem.to_string_lossy())
                .unwrap_or_default();
            let file = image
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            let output = output_file_name(image, self.short_id);
            let output_stem = Path::new(&output)
                .file_stem()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            page.push_str(&format!(
                "| ![{stem}](../assets/img_in/{file}) \
                 | ![{output_stem}](../assets/img_out/{output}) |\n"
            ));
        }
        page.push_str(&format!(
            "\n### Configuration\n\n```ini\n{}\n```\n",
            self.config
        ));
        page
    }
}

/// One plugin listed in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Plugin short id, naming its page.
    pub short_id: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Renders the index linking every plugin page, in the order given.
#[must_use]
pub fn index_page(entries: &[IndexEntry]) -> String {
    let mut page = format!("# {INDEX_TITLE}\n\n");
    for entry in entries {
        page.push_str(&format!(
            "- [{}](plugins/{}.md): {}\n",
            entry.name, entry.short_id, entry.description
        ));
    }
    page
}

/// Writes a documentation file, creating its parent directory.
///
/// # Errors
///
/// Returns [`BatchError::Write`] if the directory or file cannot be written.
pub fn write_page(path: &Path, content: &str) -> Result<(), BatchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| BatchError::write(parent, err))?;
    }
    fs::write(path, content).map_err(|err| BatchError::write(path, err))?;
    debug!(target: DOCS_TARGET, path = %path.display(), "wrote documentation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use tempfile::TempDir;

    #[test]
    fn plugin_pages_pair_inputs_with_outputs() {
        let images = vec![PathBuf::from("img_in/female.jpg"), PathBuf::from("img_in/Scan.PNG")];
        let page = PluginPage {
            short_id: "blur",
            description: "Softens the image",
            images: &images,
            config: "[imageFilter1]\nid=ibp.imagefilter.blur\nbypass=false",
        };

        assert_snapshot!(page.render(), @r"
        # blur

        Softens the image

        | Input | Output |
        |--------|--------|
        | ![female](../assets/img_in/female.jpg) | ![female_blur](../assets/img_out/female_blur.jpg) |
        | ![Scan](../assets/img_in/Scan.PNG) | ![Scan_blur](../assets/img_out/Scan_blur.png) |

        ### Configuration

        ```ini
        [imageFilter1]
        id=ibp.imagefilter.blur
        bypass=false
        ```
        ");
    }

    #[test]
    fn index_links_every_page() {
        let entries = vec![
            IndexEntry {
                short_id: "blur".to_owned(),
                name: "Blur".to_owned(),
                description: "Softens the image".to_owned(),
            },
            IndexEntry {
                short_id: "sharpen".to_owned(),
                name: "Sharpen".to_owned(),
                description: "Crisps edges".to_owned(),
            },
        ];

        assert_snapshot!(index_page(&entries), @r"
        # Image Batch Processor Filters

        - [Blur](plugins/blur.md): Softens the image
        - [Sharpen](plugins/sharpen.md): Crisps edges
        ");
    }

    #[test]
    fn write_page_creates_parent_directories() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("plugins/blur.md");

        write_page(&path, "# blur\n").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "# blur\n");
    }
}
