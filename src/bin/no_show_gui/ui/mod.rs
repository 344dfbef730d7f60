pub mod form;
pub mod result_view;
pub mod theme;
