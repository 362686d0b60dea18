/// One options-menu entry as the menu bar shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuChipView {
    /// Function key that picks the entry, e.g. `F1`.
    pub key: String,
    pub label: String,
    /// Set for language entries; shown instead of the label on emphasized chips.
    pub code: Option<String>,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub headword: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub title: String,
    pub input: String,
    /// Caret position in characters.
    pub cursor: usize,
    pub caret_visible: bool,
    pub chips: Vec<MenuChipView>,
    pub rows: Vec<ResultRowView>,
    pub selected: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub title: String,
    pub senses: Vec<String>,
    pub mark: usize,
    /// Sense drawn on the first body row.
    pub first_sense: usize,
}
