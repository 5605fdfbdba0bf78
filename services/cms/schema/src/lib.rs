//! sea-orm entities for the CMS database.

pub mod categories;
pub mod content_item_categories;
pub mod content_items;
pub mod users;
