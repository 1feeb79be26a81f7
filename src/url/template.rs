/// Replaces `placeholder` in `template` with `value`
///
/// # Examples
///
/// ```
/// use ccan_archiver::url::fill_template;
///
/// let url = fill_template("https://example.com/view?pg={page}", "{page}", 3);
/// assert_eq!(url, "https://example.com/view?pg=3");
/// ```
pub fn fill_template(template: &str, placeholder: &str, value: impl std::fmt::Display) -> String {
    template.replace(placeholder, &value.to_string())
}
