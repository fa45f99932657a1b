pub mod cell;
pub mod reconcile;
pub mod row;
pub mod sheets;
pub mod table;
