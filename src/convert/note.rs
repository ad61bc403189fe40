//! Note/callout containers as hint blocks.

use crate::assets::AssetFs;
use crate::dom::ArenaNodeId;
use crate::error::Result;

use super::context::RenderContext;

impl<F: AssetFs> RenderContext<'_, F> {
    /// Render a note container as a `{% hint %}` block.
    ///
    /// The interior goes through the same walk as the page body and shares
    /// its visited set, so once this returns every descendant of the note is
    /// marked and the outer walk will skip them.
    pub(super) fn render_note(&mut self, id: ArenaNodeId) -> Result<String> {
        let fragments = self.walk(id)?;
        let content = fragments.join(" ");
        let content = content.trim();
        if content.is_empty() {
            return Ok(String::new());
        }

        Ok(format!(
            "\n{{% hint style=\"{}\" %}}\n{}\n{{% endhint %}}\n",
            self.options.hint_style, content
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::assets::{AssetRelocator, StdFs};
    use crate::convert::ConvertedDocument;
    use crate::dom::parse_html;
    use crate::options::ConvertOptions;

    fn convert(html: &str, options: &ConvertOptions) -> ConvertedDocument {
        let dom = parse_html(html);
        let mut relocator = AssetRelocator::new(StdFs);
        RenderContext::new(&dom, Path::new("/nonexistent"), options, &mut relocator)
            .render()
            .unwrap()
    }

    #[test]
    fn test_single_paragraph_note() {
        let doc = convert(
            r#"<body><div class="note"><p>Careful!</p></div></body>"#,
            &ConvertOptions::default(),
        );
        assert_eq!(
            doc.markdown,
            "{% hint style=\"info\" %}\nCareful!\n{% endhint %}"
        );
        assert_eq!(doc.markdown.matches("Careful!").count(), 1);
    }

    #[test]
    fn test_note_between_paragraphs() {
        let doc = convert(
            r#"<body><p>Before</p><div class="callout"><p>Inside</p></div><p>After</p></body>"#,
            &ConvertOptions::default(),
        );
        assert_eq!(
            doc.markdown,
            "Before\n\n{% hint style=\"info\" %}\nInside\n{% endhint %}\n\nAfter"
        );
    }

    #[test]
    fn test_note_fragments_joined_with_space() {
        let doc = convert(
            r#"<body><div class="note"><p>One</p>two<p>Three <a href="x.html">x</a></p></div></body>"#,
            &ConvertOptions::default(),
        );
        assert_eq!(
            doc.markdown,
            "{% hint style=\"info\" %}\nOne two Three [x](x.html)\n{% endhint %}"
        );
    }

    #[test]
    fn test_note_keeps_block_structure() {
        let doc = convert(
            r#"<body><div class="note"><h4>Tip</h4><ul><li>A</li><li>B</li></ul></div></body>"#,
            &ConvertOptions::default(),
        );
        assert_eq!(
            doc.markdown,
            "{% hint style=\"info\" %}\n#### Tip\n - A\n- B\n{% endhint %}"
        );
    }

    #[test]
    fn test_empty_note_dropped() {
        let doc = convert(
            r#"<body><div class="note">  <span> </span></div><p>Text</p></body>"#,
            &ConvertOptions::default(),
        );
        assert_eq!(doc.markdown, "Text");
    }

    #[test]
    fn test_nested_notes() {
        let doc = convert(
            r#"<body><div class="note">Outer<div class="note">Inner</div></div></body>"#,
            &ConvertOptions::default(),
        );
        assert_eq!(
            doc.markdown,
            "{% hint style=\"info\" %}\nOuter \n{% hint style=\"info\" %}\nInner\n{% endhint %}\n{% endhint %}"
        );
        assert_eq!(doc.markdown.matches("Inner").count(), 1);
    }

    #[test]
    fn test_custom_hint_style() {
        let options = ConvertOptions::new().with_hint_style("warning");
        let doc = convert(r#"<body><div class="note">Mind the gap</div></body>"#, &options);
        assert_eq!(
            doc.markdown,
            "{% hint style=\"warning\" %}\nMind the gap\n{% endhint %}"
        );
    }
}
