const EMBEDDED_STYLESHEET: &str = include_str!("../../assets/style.css");
const EMBEDDED_MARKUP: &str = include_str!("../../assets/index.html");

/// Static presentation handed to a render target once during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assets<'a> {
    /// Stylesheet content.
    pub stylesheet: &'a str,
    /// Initial markup. Must contain elements with the `time` and `date` classes.
    pub markup: &'a str,
}

impl Assets<'static> {
    /// The stylesheet and markup compiled into this crate.
    pub fn embedded() -> Self {
        Self {
            stylesheet: EMBEDDED_STYLESHEET,
            markup: EMBEDDED_MARKUP,
        }
    }
}

impl Assets<'_> {
    /// Returns true if the markup declares an element with `class_name`.
    pub fn declares_class(&self, class_name: &str) -> bool {
        self.markup.split("class=").skip(1).any(|rest| {
            let mut chars = rest.chars();
            let Some(quote @ ('"' | '\'')) = chars.next() else {
                return false;
            };
            chars
                .as_str()
                .split(quote)
                .next()
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
        })
    }
}
