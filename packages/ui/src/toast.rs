use std::time::Duration;

use dioxus::prelude::*;

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast info",
            ToastKind::Success => "toast success",
            ToastKind::Warning => "toast warning",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handle to the toast queue. `Copy`, so it can move into any handler.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    entries: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
    auto_close: Signal<Duration>,
}

impl Toasts {
    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut entries = self.entries;
        entries.write().retain(|t| t.id != id);
    }

    pub fn entries(&self) -> Vec<Toast> {
        (self.entries)()
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut entries = self.entries;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        entries.write().push(Toast { id, kind, message });

        let delay = (self.auto_close)();
        let this = *self;
        spawn(async move {
            sleep(delay).await;
            this.dismiss(id);
        });
    }
}

pub(crate) async fn sleep(delay: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(delay).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(delay).await;
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] to its children and renders the stack.
#[component]
pub fn ToastProvider(#[props(default = 3000)] auto_close_ms: u64, children: Element) -> Element {
    let entries = use_signal(Vec::new);
    let next_id = use_signal(|| 0u64);
    let auto_close = use_signal(|| Duration::from_millis(auto_close_ms));
    let toasts = use_context_provider(|| Toasts {
        entries,
        next_id,
        auto_close,
    });

    rsx! {
        {children}
        ToastStack { toasts }
    }
}

#[component]
fn ToastStack(toasts: Toasts) -> Element {
    let entries = toasts.entries();

    rsx! {
        document::Stylesheet { href: TOAST_CSS }

        div {
            class: "toast-stack",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: toast.kind.class(),
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        title: "Dismiss",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
