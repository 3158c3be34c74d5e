use std::cell::Cell;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::bootstrap::Booted;
use crate::constants::ACTION_SPIN;
use crate::eligibility::{evaluate, Eligibility};
use crate::form::SpinFormData;
use crate::kiosk_config::SpinSettings;
use crate::presenter::{online_after_failure, present, Presentation};
use crate::session::SessionContext;
use crate::shared_spin_wheel::{next_rotation, SpinOutcome, StoreConfig};
use crate::transport::{Exchange, Timer, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settling,
}

/// The parts of the kiosk screen the orchestrator reads and drives.
pub trait KioskSurface {
    /// The form exactly as the inputs hold it right now.
    fn read_form(&self) -> SpinFormData;
    fn set_spin_enabled(&self, enabled: bool);
    fn show_eligibility(&self, eligibility: &Eligibility);
    fn rotate_wheel(&self, degrees: f64);
    fn present(&self, presentation: &Presentation);
    fn set_online(&self, online: bool);
}

impl<S: KioskSurface + ?Sized> KioskSurface for Rc<S> {
    fn read_form(&self) -> SpinFormData {
        (**self).read_form()
    }

    fn set_spin_enabled(&self, enabled: bool) {
        (**self).set_spin_enabled(enabled)
    }

    fn show_eligibility(&self, eligibility: &Eligibility) {
        (**self).show_eligibility(eligibility)
    }

    fn rotate_wheel(&self, degrees: f64) {
        (**self).rotate_wheel(degrees)
    }

    fn present(&self, presentation: &Presentation) {
        (**self).present(presentation)
    }

    fn set_online(&self, online: bool) {
        (**self).set_online(online)
    }
}

struct Inner<X, T, S> {
    session: SessionContext,
    store: StoreConfig,
    transport: Transport<X, T>,
    surface: S,
    settings: SpinSettings,
    phase: Cell<SpinPhase>,
    rotation: Cell<f64>,
}

/// Owns the spin state machine `Idle -> Spinning -> Settling -> Idle`. The
/// spin affordance is disabled on leaving `Idle` and only re-enabled by a
/// fresh eligibility check once back in `Idle`.
pub struct SpinOrchestrator<X, T, S> {
    inner: Rc<Inner<X, T, S>>,
}

impl<X, T, S> Clone for SpinOrchestrator<X, T, S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<X, T, S> SpinOrchestrator<X, T, S>
where
    X: Exchange + 'static,
    T: Timer + 'static,
    S: KioskSurface + 'static,
{
    pub fn new(booted: Booted<X, T>, surface: S, settings: SpinSettings) -> Self {
        let Booted { session, store, transport } = booted;
        Self {
            inner: Rc::new(Inner {
                session,
                store,
                transport,
                surface,
                settings,
                phase: Cell::new(SpinPhase::Idle),
                rotation: Cell::new(0.0),
            }),
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.inner.phase.get()
    }

    pub fn rotation(&self) -> f64 {
        self.inner.rotation.get()
    }

    pub fn store(&self) -> &StoreConfig {
        &self.inner.store
    }

    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.inner.settings
    }

    /// Called once after bootstrap: the store config has loaded, so the
    /// endpoint is reachable.
    pub fn start(&self) -> Eligibility {
        self.inner.surface.set_online(true);
        self.inner.refresh()
    }

    /// Re-runs the gate against the current form. Call on every field change.
    pub fn refresh(&self) -> Eligibility {
        self.inner.refresh()
    }

    /// Starts a spin if the machine is idle and the gate allows it. The
    /// returned future drives the spin to completion and must be polled (for
    /// example by `spawn_local`); `None` means the request was swallowed.
    pub fn request_spin(&self) -> Option<LocalBoxFuture<'static, Presentation>> {
        let inner = &self.inner;
        if inner.phase.get() != SpinPhase::Idle {
            log::debug!("Spin ignored while {:?}", inner.phase.get());
            return None;
        }
        let form = inner.surface.read_form();
        let eligibility = evaluate(&form, Some(&inner.store));
        if !eligibility.eligible {
            log::debug!("Spin ignored, gate says {:?}", eligibility.reason);
            return None;
        }

        inner.phase.set(SpinPhase::Spinning);
        inner.surface.set_spin_enabled(false);

        let rotation = next_rotation(inner.rotation.get(), inner.settings.full_turns, &mut rand::thread_rng());
        inner.rotation.set(rotation);
        inner.surface.rotate_wheel(rotation);

        let params = form.spin_params(&inner.session);
        let inner = self.inner.clone();
        Some(
            async move {
                let call = inner.transport.call(ACTION_SPIN, &params, inner.settings.call_timeout);
                let floor = inner.transport.timer().sleep(inner.settings.spin_floor);
                let (result, ()) = future::join(call, floor).await;

                inner.phase.set(SpinPhase::Settling);
                let presentation = inner.settle(SpinOutcome::from_call(result));

                inner.phase.set(SpinPhase::Idle);
                inner.refresh();
                presentation
            }
            .boxed_local(),
        )
    }
}

impl<X, T, S> Inner<X, T, S>
where
    X: Exchange,
    T: Timer,
    S: KioskSurface,
{
    fn refresh(&self) -> Eligibility {
        let eligibility = evaluate(&self.surface.read_form(), Some(&self.store));
        self.surface.show_eligibility(&eligibility);
        let idle = self.phase.get() == SpinPhase::Idle;
        self.surface.set_spin_enabled(idle && eligibility.eligible);
        eligibility
    }

    fn settle(&self, outcome: SpinOutcome) -> Presentation {
        match &outcome {
            SpinOutcome::Failure(failure) => {
                log::warn!("Spin failed: {}", failure);
                if let Some(online) = online_after_failure(failure) {
                    self.surface.set_online(online);
                }
            }
            other => {
                log::info!("Spin settled: {:?}", other);
                self.surface.set_online(true);
            }
        }
        let presentation = present(&outcome, &self.settings.currency, self.store.qualify_amount());
        self.surface.present(&presentation);
        presentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureKind;
    use crate::kiosk_config::Delivery;
    use crate::presenter::Tone;
    use crate::test_helpers::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    type TestOrchestrator = SpinOrchestrator<Rc<FakeExchange>, TokioTimer, Rc<RecordingSurface>>;

    const FLOOR: Duration = Duration::from_millis(3900);

    fn orchestrator(reply: Reply, form: SpinFormData) -> (TestOrchestrator, Rc<FakeExchange>, Rc<RecordingSurface>) {
        let exchange = FakeExchange::new(Delivery::Callback, reply);
        let surface = RecordingSurface::new(form);
        let booted = Booted {
            session: session(),
            store: store_config(100.0),
            transport: Transport::new(endpoint(), exchange.clone(), TokioTimer),
        };
        let orchestrator = SpinOrchestrator::new(booted, surface.clone(), SpinSettings::default());
        (orchestrator, exchange, surface)
    }

    fn win_reply() -> Reply {
        Reply::Respond(json!({ "ok": true, "result": "Win", "prizeName": "Free Wings", "prizeCode": "ABC123" }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ineligible_request_is_swallowed() {
        let (orchestrator, exchange, surface) = orchestrator(win_reply(), complete_form("80"));

        let eligibility = orchestrator.refresh();
        assert!(!eligibility.eligible);
        assert!(orchestrator.request_spin().is_none());
        assert_eq!(orchestrator.phase(), SpinPhase::Idle);
        assert!(exchange.urls().is_empty());
        assert_eq!(surface.enabled_history(), vec![false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_marks_kiosk_online_and_gates_form() {
        let (orchestrator, exchange, surface) = orchestrator(win_reply(), complete_form("150"));

        let eligibility = orchestrator.start();
        assert!(eligibility.eligible);
        assert_eq!(surface.online_history(), vec![true]);
        assert_eq!(surface.enabled_history(), vec![true]);
        assert!(exchange.urls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_numeric_prize_code_is_a_win_and_keeps_kiosk_online() {
        let reply = Reply::Respond(json!({ "ok": true, "result": "Win", "prizeName": "Free Wings", "prizeCode": 483920 }));
        let (orchestrator, _exchange, surface) = orchestrator(reply, complete_form("150"));

        let presentation = orchestrator.request_spin().unwrap().await;

        assert_eq!(presentation.tone, Tone::Celebrate);
        assert!(presentation.body.contains("483920"));
        assert_eq!(surface.online_history(), vec![true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_triggers_issue_one_spin_call() {
        let (orchestrator, exchange, surface) = orchestrator(win_reply(), complete_form("150"));

        let spin = orchestrator.request_spin().expect("first spin is accepted");
        assert_eq!(orchestrator.phase(), SpinPhase::Spinning);
        assert_eq!(surface.last_enabled(), Some(false));
        for _ in 0..10 {
            assert!(orchestrator.request_spin().is_none());
        }

        let hammer = async {
            for _ in 0..10 {
                tokio::time::sleep(Duration::from_millis(300)).await;
                assert!(orchestrator.request_spin().is_none());
            }
        };
        futures::join!(spin, hammer);

        assert_eq!(exchange.urls().len(), 1);
        assert_eq!(orchestrator.phase(), SpinPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_reply_still_waits_for_the_floor() {
        let (orchestrator, _exchange, surface) = orchestrator(win_reply(), complete_form("150"));
        let started = Instant::now();

        orchestrator.request_spin().unwrap().await;

        let presented_at = surface.presented_at()[0];
        assert!(presented_at.duration_since(started) >= FLOOR);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_reply_is_presented_only_after_it_arrives() {
        let (orchestrator, exchange, surface) = orchestrator(Reply::Hold, complete_form("150"));
        let started = Instant::now();

        let answer = async {
            tokio::time::sleep(Duration::from_millis(5000)).await;
            assert!(surface.presented().is_empty());
            assert_eq!(orchestrator.phase(), SpinPhase::Spinning);
            let call = exchange.held().pop().unwrap();
            assert!(call.resolve(Ok(json!({ "ok": true, "result": "Lose", "qualifyAmount": 100 }))));
        };
        let (presentation, ()) = futures::join!(orchestrator.request_spin().unwrap(), answer);

        assert_eq!(presentation.title, "NOT THIS TIME…");
        assert!(surface.presented_at()[0].duration_since(started) >= Duration::from_millis(5000));
        assert_eq!(orchestrator.phase(), SpinPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_turns_at_least_the_full_turns() {
        let (orchestrator, _exchange, surface) = orchestrator(win_reply(), complete_form("150"));

        orchestrator.request_spin().unwrap().await;
        let first = orchestrator.rotation();
        assert!(first >= 6.0 * 360.0 && first < 7.0 * 360.0);

        orchestrator.request_spin().unwrap().await;
        assert!(orchestrator.rotation() - first >= 6.0 * 360.0);
        assert_eq!(surface.rotations().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_during_spin_never_enable_the_button() {
        let (orchestrator, exchange, surface) = orchestrator(Reply::Hold, complete_form("150"));
        let spin = orchestrator.request_spin().unwrap();

        let edit = async {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            surface.edit(|form| form.basket_amount = "200".into());
            let eligibility = orchestrator.refresh();
            assert!(eligibility.eligible);
            assert_eq!(surface.last_enabled(), Some(false));

            tokio::time::sleep(Duration::from_millis(1000)).await;
            surface.edit(|form| form.basket_amount = "20".into());
            let call = exchange.held().pop().unwrap();
            call.resolve(Ok(json!({ "ok": true, "result": "Win", "prizeName": "Chips", "prizeCode": "X1" })));
        };
        futures::join!(spin, edit);

        // The form was edited below the threshold mid-spin, so the button
        // stays off once the machine is idle again.
        assert_eq!(orchestrator.phase(), SpinPhase::Idle);
        assert_eq!(surface.last_enabled(), Some(false));
        let history = surface.enabled_history();
        assert!(!history[1..].contains(&true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_recovers_to_idle_and_goes_offline() {
        let (orchestrator, exchange, surface) = orchestrator(Reply::Hold, complete_form("150"));

        let presentation = orchestrator.request_spin().unwrap().await;
        assert_eq!(presentation.tone, Tone::Problem);
        assert!(presentation.body.contains("took too long"));
        assert_eq!(surface.online_history(), vec![false]);
        assert_eq!(orchestrator.phase(), SpinPhase::Idle);
        assert_eq!(surface.last_enabled(), Some(true));

        let late = exchange.held().pop().unwrap();
        assert!(!late.resolve(Ok(json!({ "ok": true, "result": "Win" }))));
        assert_eq!(surface.presented().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_win() {
        let exchange = FakeExchange::new(Delivery::Callback, Reply::Respond(config_reply(100.0)));
        let surface = RecordingSurface::new(complete_form("80"));
        let devices = crate::session::MemoryStore::default();
        let launch = crate::session::LaunchParams::from_query("?store=CL-001&device=TAB-A9-HIGHVELD-01");

        let booted = crate::bootstrap::bootstrap(&launch, &kiosk_config(), &devices, |endpoint| {
            Transport::new(endpoint, exchange.clone(), TokioTimer)
        })
        .await
        .unwrap();
        let orchestrator = SpinOrchestrator::new(booted, surface.clone(), SpinSettings::default());

        let below = orchestrator.refresh();
        assert!(!below.eligible);
        assert!(below.reason.status_message("R").contains("100"));
        assert!(orchestrator.request_spin().is_none());

        surface.edit(|form| form.basket_amount = "150".into());
        assert!(orchestrator.refresh().eligible);
        assert_eq!(surface.last_enabled(), Some(true));
        assert_eq!(surface.last_eligibility().map(|e| e.reason), Some(crate::eligibility::GateReason::Ready));

        exchange.set_reply(win_reply());
        let presentation = orchestrator.request_spin().unwrap().await;

        let spin_calls: Vec<_> = exchange
            .urls()
            .into_iter()
            .filter(|url| url.query_pairs().any(|(k, v)| k == "action" && v == "spin"))
            .collect();
        assert_eq!(spin_calls.len(), 1);
        assert!(presentation.body.contains("Free Wings"));
        assert!(presentation.body.contains("ABC123"));
        assert_eq!(surface.presented(), vec![presentation]);
        assert_eq!(surface.last_enabled(), Some(true));
        assert_eq!(surface.online_history(), vec![true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_pin_leaves_online_alone() {
        let reply = Reply::Respond(json!({ "ok": false, "error": "bad_pin" }));
        let (orchestrator, _exchange, surface) = orchestrator(reply, complete_form("150"));

        for _ in 0..2 {
            let presentation = orchestrator.request_spin().unwrap().await;
            assert!(presentation.body.contains("cashier PIN is incorrect"));
        }
        assert!(surface.online_history().is_empty());
        assert_eq!(orchestrator.phase(), SpinPhase::Idle);
        assert_eq!(surface.last_enabled(), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_is_retryable() {
        let (orchestrator, exchange, surface) =
            orchestrator(Reply::Fail(crate::failure::Failure::network("Could not reach API")), complete_form("150"));

        let failed = orchestrator.request_spin().unwrap().await;
        assert!(failed.body.contains("Could not reach the spin service"));
        assert_eq!(surface.online_history(), vec![false]);

        exchange.set_reply(win_reply());
        let retried = orchestrator.request_spin().expect("retry is accepted once idle").await;
        assert!(retried.body.contains("ABC123"));
        assert_eq!(surface.online_history(), vec![false, true]);
        assert_eq!(exchange.urls().len(), 2);
    }

    #[test]
    fn test_failure_kind_reaches_presentation() {
        let outcome = SpinOutcome::Failure(crate::failure::Failure::new(FailureKind::ConsentRequired));
        let shown = present(&outcome, "R", 100.0);
        assert!(shown.body.contains("consent"));
    }
}
