//! Cart synchronization across bindings and tabs.

mod in_tab;
mod lost_update;
mod persistence;
