//! Contract interfaces.
//!
//! Each contract function the actions use is declared explicitly with
//! `sol!`. The JSON descriptors on disk are loaded once per run and checked
//! against those declarations when a wrapper is constructed.

pub mod descriptor;
pub mod diamond;
pub mod multiaccount;

pub use descriptor::InterfaceDescriptor;
