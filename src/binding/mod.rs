mod binding;

pub use binding::{BindingPhase, CartBinding};
