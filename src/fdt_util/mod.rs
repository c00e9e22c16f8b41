//! Helpers for extending device construction through a [`BindingTable`](crate::base::BindingTable).
pub mod props;
