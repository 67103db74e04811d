//! Pure HTML extraction helpers.
//!
//! These operate on already-fetched page bodies so the scraping heuristics
//! can be tested without touching the network.

use scraper::{Html, Selector};
use url::Url;

/// Scan a landing page for a hyperlink that looks like a PDF.
///
/// Matches `<a>` elements whose href ends in `.pdf` or contains `pdf`,
/// in document order. Relative hrefs are resolved against the page's
/// origin, not against its path.
pub fn find_pdf_link(html: &str, page_url: &Url) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"a[href$=".pdf"], a[href*="pdf"]"#).ok()?;

    let href = document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .find(|href| !href.trim().is_empty())?;

    resolve_against_origin(href, page_url)
}

/// Extract the source of an embedded PDF viewer from a mirror page.
///
/// Mirrors render the document either in an `<iframe id="pdf">` /
/// `<embed id="pdf">` or in an `<embed type="application/pdf">`. Returns
/// the raw `src` attribute; the caller normalizes it.
pub fn find_pdf_embed(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let by_id = Selector::parse("#pdf").ok()?;
    if let Some(src) = document
        .select(&by_id)
        .filter_map(|el| el.value().attr("src"))
        .next()
    {
        return Some(src.to_string());
    }

    let by_type = Selector::parse(r#"embed[type="application/pdf"]"#).ok()?;
    document
        .select(&by_type)
        .filter_map(|el| el.value().attr("src"))
        .next()
        .map(|s| s.to_string())
}

/// Resolve a possibly-relative href against the origin of `page_url`.
///
/// Absolute hrefs pass through untouched. Everything else joins onto
/// `scheme://host`, so `paper.pdf` found on
/// `https://journal.example/articles/42` becomes
/// `https://journal.example/paper.pdf`.
fn resolve_against_origin(href: &str, page_url: &Url) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    let origin = page_url.origin().ascii_serialization();
    let base = Url::parse(&origin).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_find_pdf_link_absolute() {
        let html = r#"<html><body>
            <a href="https://cdn.example.org/files/paper.pdf">Download</a>
        </body></html>"#;

        let link = find_pdf_link(html, &page("https://journal.example/articles/42"));
        assert_eq!(link.as_deref(), Some("https://cdn.example.org/files/paper.pdf"));
    }

    #[test]
    fn test_find_pdf_link_relative_resolves_against_origin() {
        let html = r#"<a href="files/paper.pdf">PDF</a>"#;

        // Resolved against the origin, not the /articles/ path.
        let link = find_pdf_link(html, &page("https://journal.example/articles/42"));
        assert_eq!(link.as_deref(), Some("https://journal.example/files/paper.pdf"));
    }

    #[test]
    fn test_find_pdf_link_root_relative() {
        let html = r#"<a href="/pdf/42.pdf">full text</a>"#;

        let link = find_pdf_link(html, &page("https://journal.example/articles/42"));
        assert_eq!(link.as_deref(), Some("https://journal.example/pdf/42.pdf"));
    }

    #[test]
    fn test_find_pdf_link_contains_pdf() {
        // No .pdf suffix, but "pdf" appears in the href.
        let html = r#"<a href="/download?format=pdf&id=42">download</a>"#;

        let link = find_pdf_link(html, &page("https://journal.example/a"));
        assert_eq!(
            link.as_deref(),
            Some("https://journal.example/download?format=pdf&id=42")
        );
    }

    #[test]
    fn test_find_pdf_link_none() {
        let html = r#"<a href="/about">About</a><a href="/contact">Contact</a>"#;
        assert!(find_pdf_link(html, &page("https://journal.example/")).is_none());
    }

    #[test]
    fn test_find_pdf_link_first_match_wins() {
        let html = r#"
            <a href="/pdf/first.pdf">one</a>
            <a href="/pdf/second.pdf">two</a>
        "#;

        let link = find_pdf_link(html, &page("https://journal.example/"));
        assert_eq!(link.as_deref(), Some("https://journal.example/pdf/first.pdf"));
    }

    #[test]
    fn test_find_pdf_embed_by_id() {
        let html = r#"<iframe id="pdf" src="//mirror.example/papers/x.pdf"></iframe>"#;
        assert_eq!(
            find_pdf_embed(html).as_deref(),
            Some("//mirror.example/papers/x.pdf")
        );
    }

    #[test]
    fn test_find_pdf_embed_by_type() {
        let html = r#"<embed type="application/pdf" src="/downloads/x.pdf">"#;
        assert_eq!(find_pdf_embed(html).as_deref(), Some("/downloads/x.pdf"));
    }

    #[test]
    fn test_find_pdf_embed_none() {
        let html = r#"<div class="captcha">prove you are human</div>"#;
        assert!(find_pdf_embed(html).is_none());
    }
}
