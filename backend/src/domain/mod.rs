pub mod crew_service;
pub mod flight_record_service;
pub mod galley_service;

pub use crew_service::CrewDetailService;
pub use flight_record_service::FlightRecordService;
pub use galley_service::GalleyDetailService;
