use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::supabase::ArticleMeta;

/// Fixed suffix of every article page title.
const SITE_NAME: &str = "The Limelight";

/// Which metadata field a placeholder tag carries.
#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Excerpt,
    Author,
    Image,
    PageUrl,
}

/// The placeholder `<meta>` tags of the template head, in document order.
/// The `<title>` element is handled separately.
const META_TAGS: [(&str, &str, Field); 10] = [
    ("name", "description", Field::Excerpt),
    ("name", "author", Field::Author),
    ("property", "og:title", Field::Title),
    ("property", "og:description", Field::Excerpt),
    ("property", "og:image", Field::Image),
    ("property", "og:url", Field::PageUrl),
    ("property", "twitter:title", Field::Title),
    ("property", "twitter:description", Field::Excerpt),
    ("property", "twitter:image", Field::Image),
    ("property", "twitter:url", Field::PageUrl),
];

static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>.*?</title>").expect("title tag pattern"));

static META_PATTERNS: LazyLock<Vec<(&'static str, &'static str, Field, Regex)>> =
    LazyLock::new(|| {
        META_TAGS
            .iter()
            .map(|&(attr, key, field)| {
                let pattern = format!(r#"<meta {attr}="{key}" content=".*?"\s*/?>"#);
                let regex = Regex::new(&pattern).expect("meta tag pattern");
                (attr, key, field, regex)
            })
            .collect()
    });

/// Replace `"` so a value can sit inside a double-quoted HTML attribute.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Substitute the eleven placeholder head tags with article metadata.
///
/// Each tag is replaced at its first occurrence only, top to bottom; a tag
/// the template does not carry is left alone. Every value is quote-escaped,
/// URLs included.
pub fn inject(template: &str, meta: &ArticleMeta, page_url: &str) -> String {
    let title = escape_quotes(&meta.title);
    let excerpt = escape_quotes(&meta.excerpt);
    let author = escape_quotes(&meta.author_name);
    let image = escape_quotes(&meta.image_url);
    let url = escape_quotes(page_url);

    let mut html = replace_tag(
        template.to_string(),
        "title",
        &TITLE_TAG,
        &format!("<title>{title} | {SITE_NAME}</title>"),
    );

    for (attr, key, field, regex) in META_PATTERNS.iter() {
        let value = match field {
            Field::Title => &title,
            Field::Excerpt => &excerpt,
            Field::Author => &author,
            Field::Image => &image,
            Field::PageUrl => &url,
        };
        let replacement = format!(r#"<meta {attr}="{key}" content="{value}" />"#);
        html = replace_tag(html, key, regex, &replacement);
    }

    html
}

/// Splice `replacement` over the first match of `regex`, verbatim. Values
/// never pass through regex expansion, so `$` stays literal.
fn replace_tag(html: String, name: &str, regex: &Regex, replacement: &str) -> String {
    if let Some(found) = regex.find(&html) {
        let mut out = String::with_capacity(html.len() + replacement.len());
        out.push_str(&html[..found.start()]);
        out.push_str(replacement);
        out.push_str(&html[found.end()..]);
        out
    } else {
        warn!("template has no {} tag, leaving it unsubstituted", name);
        html
    }
}
