pub mod form;
pub mod log_view;
pub mod sidebar;
pub mod workout_list;
