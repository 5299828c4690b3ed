use anyhow::Result;
use std::fmt::Write;

use crate::generator::outlet::{GalleryView, ProjectCard, Renderer};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; padding: 2rem; background: #0f1115; color: #e6e6e6; }
.filter-controls { display: flex; flex-wrap: wrap; gap: .5rem; margin-bottom: 1.5rem; }
.filter-btn { padding: .4rem .9rem; border: 1px solid #444; border-radius: 999px; color: inherit; text-decoration: none; }
.filter-btn.active { background: #3b82f6; border-color: #3b82f6; }
.project-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1.25rem; }
.project-card { display: flex; flex-direction: column; border-radius: 12px; overflow: hidden; background: #1a1d24; color: inherit; text-decoration: none; }
.project-thumb { height: 160px; background: #2a2f3a center / cover no-repeat; }
.project-info { padding: 1rem; }
.lang-tag { display: inline-block; margin: .15rem; padding: .1rem .5rem; border-radius: 6px; background: #2a2f3a; font-size: .8rem; }
.empty { text-align: center; color: #9aa0aa; margin-top: 1.5rem; }
"#;

/// 静态HTML渲染器
///
/// 每个筛选键对应一个页面，筛选按钮是指向其他页面的链接。
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            title: "Projects".to_string(),
        }
    }

    fn render_card(&self, html: &mut String, card: &ProjectCard) -> std::fmt::Result {
        let thumb_style = match &card.image_url {
            Some(url) => format!(" style=\"background-image:url('{}');\"", escape(url)),
            None => String::new(),
        };

        write!(
            html,
            "<a href=\"{}\" target=\"_blank\" class=\"project-card\">\
             <div class=\"project-thumb\"{}></div>\
             <div class=\"project-info\"><h3>{}</h3><p>{}</p><div class=\"project-topics\">",
            escape(&card.source_url),
            thumb_style,
            escape(&card.title),
            escape(&card.description)
        )?;
        for tag in &card.tags {
            write!(html, "<span class=\"lang-tag\">{}</span>", escape(tag))?;
        }
        html.push_str("</div></div></a>\n");
        Ok(())
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, view: &GalleryView) -> Result<String> {
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(
            html,
            "<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
            escape(&self.title),
            STYLE
        )?;

        html.push_str("<nav class=\"filter-controls\">\n");
        for button in &view.filters {
            writeln!(
                html,
                "<a class=\"filter-btn{}\" data-filter=\"{}\" href=\"{}.{}\">{}</a>",
                if button.active { " active" } else { "" },
                escape(&button.key),
                escape(&button.page),
                self.file_extension(),
                escape(&button.label)
            )?;
        }
        html.push_str("</nav>\n");

        html.push_str("<main id=\"projects-grid\" class=\"project-grid\">\n");
        match &view.empty_message {
            Some(message) => writeln!(html, "<p class=\"empty\">{}</p>", escape(message))?,
            None => {
                for card in &view.cards {
                    self.render_card(&mut html, card)?;
                }
            }
        }
        html.push_str("</main>\n</body></html>\n");

        Ok(html)
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}

/// 最基本的HTML转义，内容视为可信的纯文本
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
