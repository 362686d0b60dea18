mod article;
mod chrome;
mod layout;
mod overlay;
mod search;
mod view;

pub use article::draw_article;
pub use chrome::draw_status_line;
pub use layout::{SearchLayout, split_search_layout};
pub use overlay::draw_about_overlay;
pub use search::draw_search;
pub use view::{ArticleView, MenuChipView, ResultRowView, SearchView};
