use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Invalid slot {0}")]
    InvalidSlot(usize),
    #[error("Inventory is full")]
    Full,
}
