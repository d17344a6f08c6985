//! Output of a generator run.
//!
//! This module handles everything written for the user:
//! - [`render`] - Template rendering into the output directory
//! - [`table`] - CSV table of the subnet plan
//! - [`terminal`] - Field formatting and closing instructions

mod render;
mod table;
mod terminal;

pub use render::{
    find_template, render_templates, template_context, template_search_path, TEMPLATES,
    TEMPLATE_EXT,
};
pub use table::{plan_rows, write_plan, PlanRow};
pub use terminal::{format_field, write_next_steps};
