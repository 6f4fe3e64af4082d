//! Form rendering module
//!
//! - `field_renderer`: single input with inline error text
//! - `payment_form`: the checkout card form

mod field_renderer;
mod payment_form;

pub use payment_form::draw_payment_form;
