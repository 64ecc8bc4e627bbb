//! UI layer for camdebug using egui.

pub mod integration;
pub mod panels;

pub use integration::EguiIntegration;
pub use panels::{build_status_panel, PanelResponse, PollState, StatusInfo, ViewerControls};
