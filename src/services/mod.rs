pub mod appointment_service;
pub mod booking_service;
pub mod contact_service;
pub mod doctor_service;
pub mod review_service;
pub mod token_service;
pub mod user_service;
