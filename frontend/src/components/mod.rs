pub mod online_pill;
pub mod result_modal;

pub use online_pill::OnlinePill;
pub use result_modal::ResultModal;
