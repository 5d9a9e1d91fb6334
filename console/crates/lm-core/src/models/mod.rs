pub mod entity_id;
pub mod issued_license;
pub mod license;
pub mod license_request;
pub mod license_type;
pub mod report;
pub mod user;
pub mod user_form;
