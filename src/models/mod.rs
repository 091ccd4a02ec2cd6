pub mod catalogue;
pub mod company;
pub mod job_listing;
