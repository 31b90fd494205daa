pub mod campaign;
pub mod leads;
