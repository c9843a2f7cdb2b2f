// Business domains
pub mod business;
pub mod contacts;
pub mod followups;
pub mod messages;
pub mod scan;
pub mod workflows;
