pub mod fork;
pub mod packbits;
pub mod resource;
