use tictactoe_core::MoveOutcome;
use yew::prelude::*;

pub(crate) type ToastId = u32;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Notice {
    pub message: String,
    pub icon: Option<&'static str>,
    pub duration_ms: u32,
}

impl Notice {
    pub const DURATION_MS: u32 = 2500;

    /// Announcement for a finished round, `None` while the round goes on.
    pub fn for_outcome(outcome: MoveOutcome) -> Option<Self> {
        match outcome {
            MoveOutcome::Won { winner, .. } => Some(Self {
                message: format!("Congrats player {}! You are the winner!", winner),
                icon: Some("👏"),
                duration_ms: Self::DURATION_MS,
            }),
            MoveOutcome::Draw => Some(Self {
                message: "The game ends in a draw!!".to_string(),
                icon: None,
                duration_ms: Self::DURATION_MS,
            }),
            MoveOutcome::Ignored | MoveOutcome::Continued => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Toast {
    pub id: ToastId,
    pub notice: Notice,
}

/// Visible notices, each paired with the handle of its dismissal timer.
///
/// Dropping a handle must cancel its timer, which is what `gloo`'s `Timeout` does.
#[derive(Debug)]
pub(crate) struct ToastQueue<H> {
    next_id: ToastId,
    entries: Vec<(Toast, H)>,
}

impl<H> ToastQueue<H> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// `schedule` receives the new id and the display duration and returns the timer handle.
    pub fn push(&mut self, notice: Notice, schedule: impl FnOnce(ToastId, u32) -> H) -> ToastId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let handle = schedule(id, notice.duration_ms);
        self.entries.push((Toast { id, notice }, handle));
        id
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(toast, _)| toast.id != id);
        self.entries.len() != before
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.entries.iter().map(|(toast, _)| toast.clone()).collect()
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ToasterProps {
    #[prop_or_default]
    pub toasts: Vec<Toast>,
}

#[function_component]
pub(crate) fn Toaster(props: &ToasterProps) -> Html {
    html! {
        <ul class="toaster" aria-live="polite">
            {
                for props.toasts.iter().map(|toast| html! {
                    <li key={toast.id} class="toast" role="status">
                        if let Some(icon) = toast.notice.icon {
                            <span class="icon">{icon}</span>
                        }
                        <span>{toast.notice.message.clone()}</span>
                    </li>
                })
            }
        </ul>
    }
}
