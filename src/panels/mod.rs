mod calibration_dialog;
mod central_panel;
mod help_panel;
mod top_panel;

pub use calibration_dialog::calibration_dialog;
pub use central_panel::central_panel;
pub use help_panel::help_panel;
pub use top_panel::top_panel;
