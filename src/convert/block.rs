//! Headings, lists and images.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::assets::{AssetFs, Relocation};
use crate::dom::ArenaNodeId;
use crate::error::Result;

use super::classify::{Kind, ListKind, classify};
use super::context::RenderContext;
use super::{DEFAULT_ALT, MISSING_IMAGE};

/// Characters that would end or break a Markdown link destination.
const LINK_DESTINATION: &AsciiSet = &CONTROLS.add(b' ').add(b'(').add(b')').add(b'<').add(b'>');

impl<F: AssetFs> RenderContext<'_, F> {
    /// `### Title\n`; nothing when the heading has no text.
    pub(super) fn render_heading(&mut self, id: ArenaNodeId, level: u8) -> String {
        self.visited.insert_subtree(self.dom, id);
        let text = self.dom.collect_text(id);
        if text.is_empty() {
            return String::new();
        }
        format!("{} {}\n", "#".repeat(usize::from(level)), text)
    }

    /// One line per item, each with the list's marker, plus a trailing newline.
    pub(super) fn render_list(&mut self, id: ArenaNodeId, kind: ListKind) -> Result<String> {
        let mut lines = Vec::new();
        self.render_items(id, kind, "", &mut lines)?;
        if lines.is_empty() {
            return Ok(String::new());
        }
        Ok(lines.join("\n") + "\n")
    }

    fn render_items(
        &mut self,
        list: ArenaNodeId,
        kind: ListKind,
        indent: &str,
        lines: &mut Vec<String>,
    ) -> Result<()> {
        let dom = self.dom;
        let marker = kind.marker();
        let nested_indent = format!("{indent}{}", " ".repeat(marker.len()));

        for item in dom.children(list) {
            if classify(dom, item, self.options) != Kind::ListItem || !self.visited.insert(item) {
                continue;
            }

            let text = self.render_inline(item)?;
            let mut started = !text.is_empty();
            if started {
                lines.push(format!("{indent}{marker}{text}"));
            }

            // Block content the inline pass left behind (nested lists,
            // headings, notes, also when wrapped in a div or a link) stays
            // inside the item.
            for child in dom.descendants(item) {
                if !self.visited.insert(child) {
                    continue;
                }
                if let Kind::List(nested) = classify(dom, child, self.options) {
                    self.render_items(child, nested, &nested_indent, lines)?;
                    started = true;
                    continue;
                }
                let fragment = self.dispatch(child)?;
                for line in fragment.trim().lines() {
                    if !started {
                        lines.push(format!("{indent}{marker}{line}"));
                        started = true;
                    } else if line.trim().is_empty() {
                        lines.push(String::new());
                    } else {
                        lines.push(format!("{nested_indent}{line}"));
                    }
                }
            }
        }

        Ok(())
    }

    /// `![alt](media/<file>)`, copying the file; `![alt](image-not-found)`
    /// when it does not exist.
    pub(super) fn render_image(&mut self, id: ArenaNodeId) -> Result<String> {
        let dom = self.dom;
        let Some(src) = dom
            .get_attr(id, "src")
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return Ok(String::new());
        };
        let alt = dom
            .get_attr(id, "alt")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_ALT);

        let target = match self
            .relocator
            .relocate(src, self.base_dir, &self.media_root)?
        {
            Relocation::Copied(asset) => {
                let name = asset.file_name().into_owned();
                self.record_asset(asset);
                format!(
                    "{}/{}",
                    self.options.media_dir,
                    utf8_percent_encode(&name, LINK_DESTINATION)
                )
            }
            Relocation::Missing => MISSING_IMAGE.to_string(),
            Relocation::Remote => src.to_string(),
        };

        Ok(format!("![{alt}]({target})"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::assets::{AssetRelocator, StdFs};
    use crate::dom::parse_html;
    use crate::options::ConvertOptions;

    fn render_first(html: &str, tag: &str, base: &Path) -> String {
        let dom = parse_html(html);
        let options = ConvertOptions::default();
        let mut relocator = AssetRelocator::new(StdFs);
        let mut ctx = RenderContext::new(&dom, base, &options, &mut relocator);
        let id = dom.find_by_tag(tag).unwrap();
        ctx.visited.insert(id);
        ctx.dispatch(id).unwrap()
    }

    #[test]
    fn test_heading_levels() {
        let base = Path::new("/nonexistent");
        assert_eq!(render_first("<h3>Setup</h3>", "h3", base), "### Setup\n");
        assert_eq!(render_first("<h1> Intro  text </h1>", "h1", base), "# Intro text\n");
        assert_eq!(render_first("<h3>  </h3>", "h3", base), "");
    }

    #[test]
    fn test_lists() {
        let base = Path::new("/nonexistent");
        assert_eq!(
            render_first("<ul><li>A</li><li>B</li></ul>", "ul", base),
            "- A\n- B\n"
        );
        assert_eq!(
            render_first("<ol><li>A</li><li>B</li></ol>", "ol", base),
            "1. A\n1. B\n"
        );
        assert_eq!(render_first("<ul><li> </li></ul>", "ul", base), "");
    }

    #[test]
    fn test_list_skips_empty_items() {
        let base = Path::new("/nonexistent");
        assert_eq!(
            render_first("<ul><li>A</li><li></li><li>C</li></ul>", "ul", base),
            "- A\n- C\n"
        );
    }

    #[test]
    fn test_nested_list_is_indented() {
        let base = Path::new("/nonexistent");
        let html = "<ol><li>Open<ul><li>File</li><li>Edit</li></ul></li><li>Close</li></ol>";
        assert_eq!(
            render_first(html, "ol", base),
            "1. Open\n   - File\n   - Edit\n1. Close\n"
        );
    }

    #[test]
    fn test_block_content_stays_in_its_item() {
        let base = Path::new("/nonexistent");
        assert_eq!(
            render_first("<ul><li><h3>Alpha</h3></li><li>Beta</li></ul>", "ul", base),
            "- ### Alpha\n- Beta\n"
        );
        assert_eq!(
            render_first("<ul><li>X<div><ul><li>Y</li></ul></div></li><li>Z</li></ul>", "ul", base),
            "- X\n  - Y\n- Z\n"
        );
        assert_eq!(
            render_first(
                r#"<ol><li>Step<div class="note">Mind this</div></li><li>Next</li></ol>"#,
                "ol",
                base
            ),
            "1. Step\n   {% hint style=\"info\" %}\n   Mind this\n   {% endhint %}\n1. Next\n"
        );
        assert_eq!(
            render_first(r#"<ul><li><a href="b.html"><h3>Billing</h3></a></li></ul>"#, "ul", base),
            "- [Untitled](b.html)\n  ### Billing\n"
        );
    }

    #[test]
    fn test_image_copied_into_media() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("img.png"), b"png").unwrap();

        let out = render_first(r#"<img src="img.png" alt="Logo">"#, "img", dir.path());
        assert_eq!(out, "![Logo](media/img.png)");
        assert_eq!(fs::read(dir.path().join("media/img.png")).unwrap(), b"png");
    }

    #[test]
    fn test_missing_image() {
        let dir = TempDir::new().unwrap();
        let out = render_first(r#"<img src="img.png" alt="Logo">"#, "img", dir.path());
        assert_eq!(out, "![Logo](image-not-found)");
        assert!(!dir.path().join("media").exists());
    }

    #[test]
    fn test_image_defaults() {
        let base = Path::new("/nonexistent");
        assert_eq!(render_first("<img alt=x>", "img", base), "");
        assert_eq!(render_first(r#"<img src=" ">"#, "img", base), "");
        assert_eq!(
            render_first(r#"<img src="a.png" alt="">"#, "img", base),
            "![Image](image-not-found)"
        );
    }

    #[test]
    fn test_remote_image_kept() {
        let base = Path::new("/nonexistent");
        assert_eq!(
            render_first(r#"<img src="https://cdn.example.com/a.png" alt="A">"#, "img", base),
            "![A](https://cdn.example.com/a.png)"
        );
    }

    #[test]
    fn test_image_name_with_spaces() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("shots")).unwrap();
        fs::write(dir.path().join("shots/step 1.png"), b"png").unwrap();

        let out = render_first(r#"<img src="shots/step%201.png">"#, "img", dir.path());
        assert_eq!(out, "![Image](media/step%201.png)");
        assert!(dir.path().join("media/step 1.png").is_file());
    }
}
