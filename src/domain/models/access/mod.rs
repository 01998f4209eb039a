pub mod access_check;

pub use access_check::AccessCheck;
