//! Text extraction helpers over parsed markup

use scraper::ElementRef;

/// Concatenated text of an element with tags stripped and entities decoded
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// [`element_text`] with surrounding whitespace removed
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element_text(element).trim().to_string()
}

/// Element children of `element`, skipping text and comment nodes
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

/// Element children with the given tag name(s)
pub fn children_named<'a>(
    element: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    child_elements(element).filter(move |child| names.contains(&child.value().name()))
}
