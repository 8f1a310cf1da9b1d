use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

use crate::booking::message::Message;
use crate::booking::validation::filter_digits;
use crate::config;
use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Desktop,
    Mobile,
    Android,
}

impl ClientKind {
    pub fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Android") {
            return ClientKind::Android;
        }
        const MOBILE_MARKERS: [&str; 7] = ["iPhone", "iPad", "iPod", "Mobile", "Opera Mini", "IEMobile", "BlackBerry"];
        if MOBILE_MARKERS.iter().any(|m| user_agent.contains(m)) {
            ClientKind::Mobile
        } else {
            ClientKind::Desktop
        }
    }
}

/// International dialing digits: no `+`, no separators, no leading `0`/`00`.
pub fn normalize_number(raw: &str) -> String {
    filter_digits(raw).trim_start_matches('0').to_string()
}

pub fn wa_me_link(digits: &str, encoded_text: &str) -> String {
    format!("https://wa.me/{}?text={}", digits, encoded_text)
}

pub fn web_link(digits: &str, encoded_text: &str) -> String {
    format!("https://web.whatsapp.com/send?phone={}&text={}", digits, encoded_text)
}

pub fn android_intent_link(digits: &str, encoded_text: &str) -> String {
    format!(
        "intent://send/?phone={}&text={}#Intent;scheme=whatsapp;package=com.whatsapp;S.browser_fallback_url={};end",
        digits,
        encoded_text,
        urlencoding::encode(&wa_me_link(digits, encoded_text))
    )
}

/// Links for one hand-off. `fallback` is always the plain `wa.me` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    pub kind: ClientKind,
    pub primary: String,
    pub fallback: String,
}

impl DispatchTarget {
    pub fn build(number: &str, message: &Message, kind: ClientKind) -> Self {
        let digits = normalize_number(number);
        let text = message.encoded();
        let primary = match kind {
            ClientKind::Desktop => web_link(&digits, &text),
            ClientKind::Mobile => wa_me_link(&digits, &text),
            ClientKind::Android => android_intent_link(&digits, &text),
        };
        Self {
            kind,
            primary,
            fallback: wa_me_link(&digits, &text),
        }
    }
}

/// Browser side of the hand-off.
pub trait Navigator {
    fn user_agent(&self) -> String;
    /// Opens `url` in a new tab or window.
    fn open(&self, url: &str) -> Result<(), DispatchError>;
    /// Replaces the current page with `url`.
    fn assign(&self, url: &str) -> Result<(), DispatchError>;
    /// Whether this page still holds focus, i.e. no app took over.
    fn has_focus(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackStage {
    Retry,
    InPage,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStep {
    /// Check again after another delay.
    Rearm,
    Finished,
}

/// Deferred checks run after the first link was opened. Each step bails out
/// as soon as the page has lost focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    url: String,
    stage: FallbackStage,
}

impl FallbackChain {
    fn starting_at(url: String, stage: FallbackStage) -> Self {
        Self { url, stage }
    }

    pub fn finished() -> Self {
        Self::starting_at(String::new(), FallbackStage::Done)
    }

    pub fn is_pending(&self) -> bool {
        self.stage != FallbackStage::Done
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn step(&mut self, navigator: &dyn Navigator) -> Result<FallbackStep, DispatchError> {
        if self.stage == FallbackStage::Done {
            return Ok(FallbackStep::Finished);
        }
        if !navigator.has_focus() {
            log::debug!("Page lost focus, WhatsApp took over");
            self.stage = FallbackStage::Done;
            return Ok(FallbackStep::Finished);
        }
        match self.stage {
            FallbackStage::Retry => match navigator.open(&self.url) {
                Ok(()) => {
                    log::info!("Still focused, retried with wa.me link");
                    self.stage = FallbackStage::InPage;
                    Ok(FallbackStep::Rearm)
                }
                Err(e) => {
                    log::warn!("Retry failed ({}), navigating in page", e);
                    self.navigate_in_page(navigator)
                }
            },
            _ => {
                log::info!("Still focused after retry, navigating in page");
                self.navigate_in_page(navigator)
            }
        }
    }

    fn navigate_in_page(&mut self, navigator: &dyn Navigator) -> Result<FallbackStep, DispatchError> {
        self.stage = FallbackStage::Done;
        navigator.assign(&self.url).map_err(|e| {
            log::error!("In-page navigation failed: {}", e);
            DispatchError::Exhausted
        })?;
        Ok(FallbackStep::Finished)
    }
}

/// Opens the best link for this client. Fails only when a new tab and
/// in-page navigation are both impossible.
pub fn dispatch(navigator: &dyn Navigator, number: &str, message: &Message) -> Result<FallbackChain, DispatchError> {
    let kind = ClientKind::detect(&navigator.user_agent());
    let target = DispatchTarget::build(number, message, kind);
    log::info!("Dispatching booking to WhatsApp as {:?}", kind);

    match navigator.open(&target.primary) {
        Ok(()) => return Ok(FallbackChain::starting_at(target.fallback, FallbackStage::Retry)),
        Err(e) => log::warn!("Primary link failed: {}", e),
    }
    if target.primary != target.fallback {
        match navigator.open(&target.fallback) {
            Ok(()) => return Ok(FallbackChain::starting_at(target.fallback, FallbackStage::InPage)),
            Err(e) => log::warn!("wa.me link failed: {}", e),
        }
    }
    navigator.assign(&target.fallback).map_err(|e| {
        log::error!("In-page navigation failed: {}", e);
        DispatchError::Exhausted
    })?;
    Ok(FallbackChain::finished())
}

pub struct BrowserNavigator {
    window: web_sys::Window,
}

impl BrowserNavigator {
    pub fn new() -> Result<Self, DispatchError> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or(DispatchError::NoWindow)
    }
}

impl Navigator for BrowserNavigator {
    fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    fn open(&self, url: &str) -> Result<(), DispatchError> {
        match self.window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(DispatchError::Blocked(url.to_string())),
            Err(e) => Err(DispatchError::Navigation {
                url: url.to_string(),
                reason: format!("{:?}", e),
            }),
        }
    }

    fn assign(&self, url: &str) -> Result<(), DispatchError> {
        self.window.location().set_href(url).map_err(|e| DispatchError::Navigation {
            url: url.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn has_focus(&self) -> bool {
        self.window
            .document()
            .and_then(|d| d.has_focus().ok())
            .unwrap_or(false)
    }
}

/// One-shot timer behind the fallback chain.
pub trait FallbackTimer {
    /// Dropping a handle cancels its timer.
    type Handle;

    fn start(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Handle;

    /// Disposes of a handle from inside its own callback without cancelling
    /// the callback that is running.
    fn release(&self, handle: Self::Handle);
}

pub struct GlooTimer;

impl FallbackTimer for GlooTimer {
    type Handle = Timeout;

    fn start(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, fire)
    }

    fn release(&self, handle: Timeout) {
        handle.forget();
    }
}

/// Holds the pending fallback timer, if any.
pub type FallbackSlot<H> = Rc<RefCell<Option<H>>>;

/// Drops the pending timer. Returns whether one was armed.
pub fn cancel_fallback<H>(slot: &FallbackSlot<H>) -> bool {
    slot.borrow_mut().take().is_some()
}

/// Runs `chain` on `timer`, re-arming as it asks. Each arm replaces the
/// handle in `slot`. `on_exhausted` is called if the last in-page
/// navigation fails.
pub fn schedule_fallback<T>(
    timer: Rc<T>,
    slot: FallbackSlot<T::Handle>,
    mut chain: FallbackChain,
    navigator: Rc<dyn Navigator>,
    on_exhausted: Rc<dyn Fn(DispatchError)>,
) where
    T: FallbackTimer + 'static,
    T::Handle: 'static,
{
    if !chain.is_pending() {
        slot.borrow_mut().take();
        return;
    }
    log::debug!("WhatsApp fallback armed for {}", chain.url());
    let own_timer = timer.clone();
    let own_slot = slot.clone();
    let handle = timer.start(
        config::DISPATCH_FALLBACK_DELAY_MS,
        Box::new(move || {
            let fired = own_slot.borrow_mut().take();
            if let Some(fired) = fired {
                own_timer.release(fired);
            }
            match chain.step(navigator.as_ref()) {
                Ok(FallbackStep::Rearm) => schedule_fallback(own_timer, own_slot, chain, navigator, on_exhausted),
                Ok(FallbackStep::Finished) => {}
                Err(e) => on_exhausted(e),
            }
        }),
    );
    *slot.borrow_mut() = Some(handle);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Open(String),
        Assign(String),
    }

    /// Records calls; `fail_opens` fails that many `open` calls first.
    pub struct FakeNavigator {
        pub user_agent: String,
        pub calls: RefCell<Vec<Call>>,
        pub fail_opens: Cell<usize>,
        pub fail_assign: bool,
        pub focused: Cell<bool>,
    }

    impl FakeNavigator {
        pub fn new(user_agent: &str) -> Self {
            Self {
                user_agent: user_agent.to_string(),
                calls: RefCell::new(Vec::new()),
                fail_opens: Cell::new(0),
                fail_assign: false,
                focused: Cell::new(true),
            }
        }

        pub fn broken(user_agent: &str) -> Self {
            let mut nav = Self::new(user_agent);
            nav.fail_opens.set(usize::MAX);
            nav.fail_assign = true;
            nav
        }
    }

    impl Navigator for FakeNavigator {
        fn user_agent(&self) -> String {
            self.user_agent.clone()
        }

        fn open(&self, url: &str) -> Result<(), DispatchError> {
            self.calls.borrow_mut().push(Call::Open(url.to_string()));
            let remaining = self.fail_opens.get();
            if remaining > 0 {
                self.fail_opens.set(remaining.saturating_sub(1));
                return Err(DispatchError::Blocked(url.to_string()));
            }
            Ok(())
        }

        fn assign(&self, url: &str) -> Result<(), DispatchError> {
            self.calls.borrow_mut().push(Call::Assign(url.to_string()));
            if self.fail_assign {
                return Err(DispatchError::Navigation {
                    url: url.to_string(),
                    reason: "refused".to_string(),
                });
            }
            Ok(())
        }

        fn has_focus(&self) -> bool {
            self.focused.get()
        }
    }

    pub const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36";
    pub const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
    pub const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/126.0 Mobile Safari/537.36";

    fn message() -> Message {
        Message::new("hi there\nok")
    }

    #[test]
    fn normalizes_numbers() {
        assert_eq!(normalize_number("+971 50 814 9362"), "971508149362");
        assert_eq!(normalize_number("00971508149362"), "971508149362");
        assert_eq!(normalize_number("0508149362"), "508149362");
        assert_eq!(normalize_number("971508149362"), "971508149362");
    }

    #[test]
    fn classifies_clients() {
        assert_eq!(ClientKind::detect(DESKTOP_UA), ClientKind::Desktop);
        assert_eq!(ClientKind::detect(IPHONE_UA), ClientKind::Mobile);
        assert_eq!(ClientKind::detect(ANDROID_UA), ClientKind::Android);
    }

    #[test]
    fn builds_canonical_links() {
        let desktop = DispatchTarget::build("+971508149362", &message(), ClientKind::Desktop);
        assert_eq!(desktop.primary, "https://web.whatsapp.com/send?phone=971508149362&text=hi%20there%0Aok");
        assert_eq!(desktop.fallback, "https://wa.me/971508149362?text=hi%20there%0Aok");

        let mobile = DispatchTarget::build("971508149362", &message(), ClientKind::Mobile);
        assert_eq!(mobile.primary, mobile.fallback);

        let android = DispatchTarget::build("971508149362", &message(), ClientKind::Android);
        assert!(android.primary.starts_with("intent://send/?phone=971508149362&text=hi%20there%0Aok#Intent;"));
        assert!(android.primary.contains("package=com.whatsapp"));
        assert!(android.primary.ends_with(";end"));
    }

    #[test]
    fn opens_primary_link_and_arms_retry() {
        let nav = FakeNavigator::new(DESKTOP_UA);
        let chain = dispatch(&nav, "971508149362", &message()).unwrap();
        assert!(chain.is_pending());
        assert_eq!(
            nav.calls.borrow().as_slice(),
            &[Call::Open("https://web.whatsapp.com/send?phone=971508149362&text=hi%20there%0Aok".to_string())]
        );
    }

    #[test]
    fn falls_back_when_primary_open_fails() {
        let nav = FakeNavigator::new(ANDROID_UA);
        nav.fail_opens.set(1);
        let chain = dispatch(&nav, "971508149362", &message()).unwrap();
        assert!(chain.is_pending());
        let calls = nav.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], Call::Open(chain.url().to_string()));
    }

    #[test]
    fn navigates_in_page_when_no_tab_can_open() {
        let nav = FakeNavigator::new(IPHONE_UA);
        nav.fail_opens.set(usize::MAX);
        let chain = dispatch(&nav, "971508149362", &message()).unwrap();
        assert!(!chain.is_pending());
        // Mobile primary is already the wa.me link, so it is not reopened.
        assert_eq!(
            nav.calls.borrow().as_slice(),
            &[
                Call::Open("https://wa.me/971508149362?text=hi%20there%0Aok".to_string()),
                Call::Assign("https://wa.me/971508149362?text=hi%20there%0Aok".to_string()),
            ]
        );
    }

    #[test]
    fn exhausted_when_everything_fails() {
        let nav = FakeNavigator::broken(DESKTOP_UA);
        assert_eq!(dispatch(&nav, "971508149362", &message()), Err(DispatchError::Exhausted));
        assert_eq!(nav.calls.borrow().len(), 3);
    }

    #[test]
    fn fallback_stops_once_focus_is_lost() {
        let nav = FakeNavigator::new(ANDROID_UA);
        let mut chain = dispatch(&nav, "971508149362", &message()).unwrap();
        nav.focused.set(false);
        assert_eq!(chain.step(&nav), Ok(FallbackStep::Finished));
        assert!(!chain.is_pending());
        assert_eq!(nav.calls.borrow().len(), 1);
    }

    #[test]
    fn fallback_retries_then_navigates_in_page() {
        let nav = FakeNavigator::new(ANDROID_UA);
        let mut chain = dispatch(&nav, "971508149362", &message()).unwrap();
        let wa_me = chain.url().to_string();

        assert_eq!(chain.step(&nav), Ok(FallbackStep::Rearm));
        assert_eq!(chain.step(&nav), Ok(FallbackStep::Finished));
        assert_eq!(chain.step(&nav), Ok(FallbackStep::Finished));

        let calls = nav.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], Call::Open(wa_me.clone()));
        assert_eq!(calls[2], Call::Assign(wa_me));
    }

    #[test]
    fn failed_retry_goes_straight_to_in_page() {
        let nav = FakeNavigator::new(DESKTOP_UA);
        let mut chain = dispatch(&nav, "971508149362", &message()).unwrap();
        nav.fail_opens.set(1);
        assert_eq!(chain.step(&nav), Ok(FallbackStep::Finished));
        assert!(matches!(nav.calls.borrow().last(), Some(Call::Assign(_))));
    }

    #[test]
    fn exhausted_when_final_in_page_navigation_fails() {
        let mut nav = FakeNavigator::new(DESKTOP_UA);
        nav.fail_assign = true;
        let mut chain = dispatch(&nav, "971508149362", &message()).unwrap();
        nav.fail_opens.set(1);
        assert_eq!(chain.step(&nav), Err(DispatchError::Exhausted));
        assert!(!chain.is_pending());
    }

    /// Timer driven by hand. Handles flip their entry to dead when dropped.
    #[derive(Default)]
    struct ManualTimer {
        queue: RefCell<Vec<(Rc<Cell<bool>>, Box<dyn FnOnce()>)>>,
        started: Cell<usize>,
    }

    struct ManualHandle(Rc<Cell<bool>>);

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.0.set(false);
        }
    }

    impl FallbackTimer for ManualTimer {
        type Handle = ManualHandle;

        fn start(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> ManualHandle {
            assert_eq!(delay_ms, config::DISPATCH_FALLBACK_DELAY_MS);
            self.started.set(self.started.get() + 1);
            let live = Rc::new(Cell::new(true));
            self.queue.borrow_mut().push((live.clone(), fire));
            ManualHandle(live)
        }

        fn release(&self, handle: ManualHandle) {
            drop(handle);
        }
    }

    impl ManualTimer {
        /// Fires the oldest live timer. False when none is left.
        fn fire_next(&self) -> bool {
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    if queue.is_empty() {
                        return false;
                    }
                    queue.remove(0)
                };
                let (live, fire) = next;
                if live.get() {
                    fire();
                    return true;
                }
            }
        }

        fn live(&self) -> usize {
            self.queue.borrow().iter().filter(|(live, _)| live.get()).count()
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<DispatchError>>>, Rc<dyn Fn(DispatchError)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Rc::new(move |e| sink.borrow_mut().push(e)))
    }

    #[test]
    fn timer_rearms_once_then_navigates_in_page() {
        let nav = Rc::new(FakeNavigator::new(DESKTOP_UA));
        let chain = dispatch(nav.as_ref(), "971508149362", &message()).unwrap();
        let timer = Rc::new(ManualTimer::default());
        let slot = FallbackSlot::default();
        let (errors, on_exhausted) = recorder();

        schedule_fallback(timer.clone(), slot.clone(), chain, nav.clone(), on_exhausted);
        assert!(slot.borrow().is_some());
        assert_eq!(timer.live(), 1);

        assert!(timer.fire_next());
        assert!(slot.borrow().is_some());
        assert_eq!(timer.started.get(), 2);
        assert_eq!(timer.live(), 1);

        assert!(timer.fire_next());
        assert!(slot.borrow().is_none());
        assert!(!timer.fire_next());

        let calls = nav.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[1], Call::Open(_)));
        assert!(matches!(calls[2], Call::Assign(_)));
        assert!(errors.borrow().is_empty());
    }

    #[test]
    fn cancelling_the_slot_stops_the_chain() {
        let nav = Rc::new(FakeNavigator::new(ANDROID_UA));
        let chain = dispatch(nav.as_ref(), "971508149362", &message()).unwrap();
        let timer = Rc::new(ManualTimer::default());
        let slot = FallbackSlot::default();
        let (errors, on_exhausted) = recorder();

        schedule_fallback(timer.clone(), slot.clone(), chain, nav.clone(), on_exhausted);
        assert!(cancel_fallback(&slot));
        assert!(!cancel_fallback(&slot));
        assert_eq!(timer.live(), 0);
        assert!(!timer.fire_next());
        assert_eq!(nav.calls.borrow().len(), 1);
        assert!(errors.borrow().is_empty());
    }

    #[test]
    fn timer_reports_exhaustion() {
        let mut nav = FakeNavigator::new(DESKTOP_UA);
        nav.fail_assign = true;
        let nav = Rc::new(nav);
        let chain = dispatch(nav.as_ref(), "971508149362", &message()).unwrap();
        let timer = Rc::new(ManualTimer::default());
        let slot = FallbackSlot::default();
        let (errors, on_exhausted) = recorder();

        schedule_fallback(timer.clone(), slot.clone(), chain, nav.clone(), on_exhausted);
        nav.fail_opens.set(1);
        assert!(timer.fire_next());
        assert_eq!(errors.borrow().as_slice(), &[DispatchError::Exhausted]);
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn finished_chain_arms_nothing() {
        let nav = Rc::new(FakeNavigator::new(DESKTOP_UA));
        let timer = Rc::new(ManualTimer::default());
        let slot: FallbackSlot<ManualHandle> = FallbackSlot::default();
        let (_, on_exhausted) = recorder();

        schedule_fallback(timer.clone(), slot.clone(), FallbackChain::finished(), nav, on_exhausted);
        assert!(slot.borrow().is_none());
        assert_eq!(timer.started.get(), 0);
    }
}
