pub mod claim;
pub mod reference;
