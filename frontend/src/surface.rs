use std::cell::RefCell;
use std::rc::Rc;

use kiosk_shared::{Eligibility, KioskSurface, Presentation, SpinFormData, SpinOrchestrator};
use yew::UseStateHandle;

use crate::exchange::KioskExchange;
use crate::timer::GlooTimer;

pub type KioskOrchestrator = SpinOrchestrator<KioskExchange, GlooTimer, YewSurface>;

/// Bridges the orchestrator to the kiosk page's state hooks. The form is read
/// from a shared cell so a spin always sees the latest keystrokes.
#[derive(Clone)]
pub struct YewSurface {
    pub form: Rc<RefCell<SpinFormData>>,
    pub spin_enabled: UseStateHandle<bool>,
    pub eligibility: UseStateHandle<Eligibility>,
    pub rotation: UseStateHandle<f64>,
    pub presentation: UseStateHandle<Option<Presentation>>,
    pub online: UseStateHandle<bool>,
}

impl KioskSurface for YewSurface {
    fn read_form(&self) -> SpinFormData {
        self.form.borrow().clone()
    }

    fn set_spin_enabled(&self, enabled: bool) {
        self.spin_enabled.set(enabled);
    }

    fn show_eligibility(&self, eligibility: &Eligibility) {
        self.eligibility.set(eligibility.clone());
    }

    fn rotate_wheel(&self, degrees: f64) {
        self.rotation.set(degrees);
    }

    fn present(&self, presentation: &Presentation) {
        self.presentation.set(Some(presentation.clone()));
    }

    fn set_online(&self, online: bool) {
        self.online.set(online);
    }
}
