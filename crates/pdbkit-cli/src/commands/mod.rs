pub mod inspect;
pub mod repack;
