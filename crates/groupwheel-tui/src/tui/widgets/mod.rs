pub mod groups;
pub mod result_banner;
pub mod setup_form;
pub mod status_bar;
pub mod wheel;
