pub mod mode;
pub mod parameter_form;
pub mod result_view;
