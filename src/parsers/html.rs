use crate::parsers::text::{join_fragments, non_empty, normalize_whitespace};
use crate::parsers::{PageParser, ParseError};
use crate::results::{Metadata, MetadataKey, MetadataValue, PageRecord};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Elements whose text never counts as page content
const NON_CONTENT_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// Extracts title, text, links and metadata from an HTML document
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl PageParser for HtmlParser {
    fn parse(&self, page_url: &str, html: &str) -> Result<PageRecord, ParseError> {
        let doc = Html::parse_document(html);

        let title = extract_title(&doc)?;
        let text_content = extract_text_content(&doc)?;
        let links = extract_links(&doc)?;
        let metadata = extract_metadata(&doc, page_url)?;

        ::log::debug!("HTML parser found {} links on {}", links.len(), page_url);

        Ok(PageRecord {
            url: page_url.to_string(),
            title,
            text_content,
            links,
            metadata,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn first<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, ParseError> {
    Ok(doc.select(&selector(css)?).next())
}

fn last<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, ParseError> {
    Ok(doc.select(&selector(css)?).last())
}

/// `content` attribute of the first element matching `css`, trimmed
fn meta_content(doc: &Html, css: &str) -> Result<Option<String>, ParseError> {
    Ok(first(doc, css)?
        .and_then(|e| e.value().attr("content"))
        .and_then(non_empty))
}

/// Visible text below `element`, skipping script-like subtrees
fn content_text(element: ElementRef<'_>) -> String {
    let fragments = element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| NON_CONTENT_TAGS.contains(&e.name()))
        });
        if hidden { None } else { Some(&**text) }
    });
    join_fragments(fragments)
}

/// og:title, then `<title>`, then the first `<h1>`
pub fn extract_title(doc: &Html) -> Result<String, ParseError> {
    if let Some(og_title) = meta_content(doc, r#"meta[property="og:title"]"#)? {
        return Ok(og_title);
    }

    for css in ["title", "h1"] {
        if let Some(element) = first(doc, css)? {
            let text = normalize_whitespace(&element.text().collect::<String>());
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    Ok(String::new())
}

/// Text of `main`, else `article`, else the first `.content`, else `body`
pub fn extract_text_content(doc: &Html) -> Result<String, ParseError> {
    for css in ["main", "article"] {
        let text = join_fragments(
            doc.select(&selector(css)?)
                .map(content_text)
                .collect::<Vec<_>>()
                .iter()
                .map(String::as_str),
        );
        if !text.is_empty() {
            return Ok(text);
        }
    }

    for css in [".content", "body"] {
        if let Some(element) = first(doc, css)? {
            let text = content_text(element);
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    Ok(String::new())
}

/// Raw `href` values, trimmed and de-duplicated in first-seen order
///
/// Empty, `javascript:` and same-page `#` links are dropped; everything else
/// is left for the crawler to resolve.
pub fn extract_links(doc: &Html) -> Result<Vec<String>, ParseError> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in doc.select(&selector("a[href]")?) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with("javascript:") || href.starts_with('#') {
            continue;
        }
        if seen.insert(href) {
            links.push(href.to_string());
        }
    }

    Ok(links)
}

pub fn extract_metadata(doc: &Html, page_url: &str) -> Result<Metadata, ParseError> {
    let mut metadata = Metadata::new();
    let mut put = |key, value: Option<String>| {
        if let Some(value) = value {
            metadata.insert(key, MetadataValue::Text(value));
        }
    };

    let language = match doc.root_element().value().attr("lang").and_then(non_empty) {
        Some(lang) => Some(lang),
        None => meta_content(doc, r#"meta[http-equiv="content-language"]"#)?,
    };
    put(MetadataKey::Language, language);

    put(
        MetadataKey::Description,
        meta_content(doc, r#"meta[name="description"]"#)?,
    );
    put(
        MetadataKey::OpenGraphType,
        meta_content(doc, r#"meta[property="og:type"]"#)?,
    );
    put(
        MetadataKey::OpenGraphLocale,
        meta_content(doc, r#"meta[property="og:locale"]"#)?,
    );
    put(MetadataKey::Category, extract_category(doc)?);

    if let Some(keywords) = meta_content(doc, r#"meta[name="keywords"]"#)? {
        let list: Vec<String> = keywords.split(',').filter_map(non_empty).collect();
        if !list.is_empty() {
            metadata.insert(MetadataKey::Keywords, MetadataValue::List(list));
        }
    }

    metadata.insert(
        MetadataKey::SourceUrl,
        MetadataValue::Text(page_url.to_string()),
    );

    Ok(metadata)
}

/// Category meta tags, falling back to the last breadcrumb entry
fn extract_category(doc: &Html) -> Result<Option<String>, ParseError> {
    if let Some(category) = meta_content(doc, r#"meta[name="category"]"#)? {
        return Ok(Some(category));
    }
    if let Some(section) = meta_content(doc, r#"meta[property="article:section"]"#)? {
        return Ok(Some(section));
    }

    for css in [".breadcrumb li", r#"[itemprop="itemListElement"]"#] {
        if let Some(element) = last(doc, css)? {
            let text = normalize_whitespace(&element.text().collect::<String>());
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
    }

    Ok(None)
}
