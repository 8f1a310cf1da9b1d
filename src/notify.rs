/// Style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
    #[allow(dead_code)]
    Warning,
    #[allow(dead_code)]
    Plain,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast toast-success",
            NoticeKind::Error => "toast toast-error",
            NoticeKind::Info => "toast toast-info",
            NoticeKind::Warning => "toast toast-warning",
            NoticeKind::Plain => "toast",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✕",
            NoticeKind::Info => "i",
            NoticeKind::Warning => "!",
            NoticeKind::Plain => "",
        }
    }
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Without a surface mounted, notices only reach the log.
impl<T: Notifier> Notifier for Option<T> {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match self {
            Some(inner) => inner.notify(kind, message),
            None => log::info!("[{:?}] {}", kind, message),
        }
    }
}
