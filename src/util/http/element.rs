use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::util::text;

/// Finds the first element, in document order, that matches any of the given
/// CSS selectors.
///
/// The selectors are combined into one selector group, so an element that
/// appears earlier in the markup wins over a later one regardless of which
/// variant it matched.
///
/// # Arguments
///
/// * `document` - The parsed HTML document.
/// * `variants` - The CSS selectors accepted for the element, in precedence order.
///
/// # Returns
///
/// * `Result<Option<ElementRef>>` - `Ok(None)` when nothing matches, or an error
///   if the selector list cannot be parsed.
///
/// # Examples
///
/// ```
/// let document = Html::parse_document(r#"<div class="a">1</div><div class="b">2</div>"#);
/// let element = select_first_of(&document, &["div.b", "div.a"]).unwrap().unwrap();
/// assert_eq!(stripped_text(&element), "1");
/// ```
pub fn select_first_of<'a>(document: &'a Html, variants: &[&str]) -> Result<Option<ElementRef<'a>>> {
    if variants.is_empty() {
        return Ok(None);
    }

    let group = variants.join(", ");
    let selector = Selector::parse(&group)
        .map_err(|why| anyhow!("Failed to Selector::parse({}) because: {:?}", group, why))?;

    Ok(document.select(&selector).next())
}

/// 取出元素所有可見文字，去除多餘空白後以單一空白串接
pub fn stripped_text(element: &ElementRef) -> String {
    text::join_stripped(element.text())
}
