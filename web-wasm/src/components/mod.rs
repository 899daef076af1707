pub mod header;
pub mod link;
pub mod not_found;
pub mod notice;
pub mod progress_bar;
pub mod record_table;
pub mod sidebar;
