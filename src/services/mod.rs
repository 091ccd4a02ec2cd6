pub mod catalogue_service;
pub mod criteria;
pub mod job_store;
pub mod pagination;
pub mod predicate;
pub mod result_assembler;
pub mod search_service;

#[cfg(test)]
pub(crate) mod fixtures;
