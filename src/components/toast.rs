use gloo_timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

use crate::config;
use crate::notify::{NoticeKind, Notifier};

#[derive(Clone, PartialEq)]
struct Toast {
    id: u32,
    kind: NoticeKind,
    message: String,
}

enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

#[derive(Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

/// Handle given to components through context. Each toast closes itself
/// after a short delay.
#[derive(Clone)]
pub struct Toaster {
    dispatcher: UseReducerDispatcher<ToastList>,
    next_id: Rc<Cell<u32>>,
}

impl PartialEq for Toaster {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.next_id, &other.next_id)
    }
}

impl Notifier for Toaster {
    fn notify(&self, kind: NoticeKind, message: &str) {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.dispatcher.dispatch(ToastAction::Push(Toast {
            id,
            kind,
            message: message.to_string(),
        }));

        let dispatcher = self.dispatcher.clone();
        let timeout = Timeout::new(config::TOAST_AUTO_CLOSE_MS, move || {
            dispatcher.dispatch(ToastAction::Dismiss(id));
        });
        timeout.forget();
    }
}

#[hook]
pub fn use_toaster() -> Option<Toaster> {
    use_context::<Toaster>()
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_memo(|_| Cell::new(0u32), ());
    let toaster = Toaster {
        dispatcher: list.dispatcher(),
        next_id,
    };

    let dismiss = {
        let dispatcher = list.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Toaster> context={toaster}>
            <style>
                {r#"
                    .toast-stack {
                        position: fixed;
                        top: 1rem;
                        inset-inline-end: 1rem;
                        z-index: 60;
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                        width: min(400px, calc(100vw - 2rem));
                    }
                    .toast {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                        padding: 0.75rem 1rem;
                        background: #fff;
                        border-radius: 8px;
                        border-inline-start: 4px solid #94a3b8;
                        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12);
                        animation: toastIn 0.3s ease-out;
                        cursor: pointer;
                    }
                    .toast-success { border-inline-start-color: #16a34a; }
                    .toast-error { border-inline-start-color: #dc2626; }
                    .toast-info { border-inline-start-color: #0891b2; }
                    .toast-warning { border-inline-start-color: #d97706; }
                    .toast-icon {
                        font-weight: bold;
                        min-width: 1rem;
                        text-align: center;
                    }
                    @keyframes toastIn {
                        from { transform: translateY(-20px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                "#}
            </style>
            { props.children.clone() }
            <div class="toast-stack" role="status" aria-live="polite">
                { for list.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let onclick = dismiss.reform(move |_: MouseEvent| id);
                    html! {
                        <div key={id} class={toast.kind.class()} {onclick}>
                            <span class="toast-icon">{ toast.kind.icon() }</span>
                            <span>{ toast.message.clone() }</span>
                        </div>
                    }
                }) }
            </div>
        </ContextProvider<Toaster>>
    }
}
