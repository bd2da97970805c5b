pub mod request_dto;
pub mod response_dto;
