use crate::storage::LocalScoreStore;
use crate::toast::{Notice, ToastId, ToastQueue, Toaster};
use bitflags::bitflags;
use clap::{Args, ValueEnum};
use gloo::timers::callback::Timeout;
use tictactoe_core as game;
use yew::prelude::*;

const BOARD_SIDE: game::CellIndex = 3;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellPointerState {
    index: game::CellIndex,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    /// Mouse down, the only event that starts a press.
    Press(CellPointerState),
    /// Mouse up or enter.
    Update(CellPointerState),
    Leave,
    /// Keyboard activation, no press tracking involved.
    Activate(game::CellIndex),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    ResetScores,
    DismissToast(ToastId),
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum PointerAction {
    Select(game::CellIndex),
    Redraw,
    Nothing,
}

/// Folds a cell event into the currently pressed cell.
///
/// A cell is selected when the left button alone was pressed on it and is
/// released over the same cell. Leaving the cell drops the press.
fn track_pointer(current: &mut Option<CellPointerState>, msg: CellMsg) -> PointerAction {
    use CellMsg::*;

    match msg {
        Press(state) => {
            let previous = current.replace(state);
            if previous == Some(state) {
                PointerAction::Nothing
            } else {
                PointerAction::Redraw
            }
        }
        Leave => {
            if current.take().is_some() {
                PointerAction::Redraw
            } else {
                PointerAction::Nothing
            }
        }
        Activate(index) => {
            *current = None;
            PointerAction::Select(index)
        }
        Update(update) => match *current {
            // hovering, or dragging in from another cell
            None => PointerAction::Nothing,
            Some(pressed) if pressed.index != update.index => {
                *current = None;
                PointerAction::Redraw
            }
            // all buttons released, the pressed state says which ones were down
            Some(pressed) if update.buttons.is_empty() => {
                *current = None;
                if pressed.buttons == MouseButtons::LEFT {
                    PointerAction::Select(pressed.index)
                } else {
                    // any other combination cancels, pressed styling has to go
                    PointerAction::Redraw
                }
            }
            Some(pressed) => {
                // buttons added or partly released, remember the widest combination
                let buttons = pressed.buttons | update.buttons;
                *current = Some(CellPointerState { buttons, ..pressed });
                if buttons == pressed.buttons {
                    PointerAction::Nothing
                } else {
                    PointerAction::Redraw
                }
            }
        },
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    cell: game::Cell,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        cell,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell.owner() {
            None => classes!(),
            Some(game::Player::X) => classes!("x", "locked"),
            Some(game::Player::O) => classes!("o", "locked"),
        }
    );
    if pressed {
        class.push("pressed");
    }
    let label = cell.owner().map_or("", game::Player::symbol);

    let pointer_event = |event: &'static str, msg: fn(CellPointerState) -> CellMsg| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(msg(CellPointerState { index, buttons }));
            log::trace!("cell {} mouse {} ({:?})", index, event, buttons);
        })
    };
    let onmousedown = pointer_event("down", CellMsg::Press);
    let onmouseup = pointer_event("up", CellMsg::Update);
    let onmouseenter = pointer_event("enter", CellMsg::Update);

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Leave);
            log::trace!("cell {} mouse leave", index);
        })
    };

    let onkeydown = Callback::from(move |e: KeyboardEvent| {
        if matches!(e.key().as_str(), "Enter" | " ") {
            e.prevent_default();
            callback.emit(CellMsg::Activate(index));
        }
    });

    html! {
        <td
            {class}
            tabindex="0"
            role="button"
            aria-label={format!("cell {}", index)}
            {onmousedown}
            {onmouseup}
            {onmouseenter}
            {onmouseleave}
            {onkeydown}
        >
            {label}
        </td>
    }
}

/// Who opens the next round, as accepted on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Starter {
    /// Winner, or last mover after a draw, keeps the turn
    #[default]
    Carry,
    /// Every round starts with X
    X,
    /// Every round starts with O
    O,
}

impl From<Starter> for game::StartPolicy {
    fn from(starter: Starter) -> Self {
        match starter {
            Starter::Carry => Self::CarryOver,
            Starter::X => Self::Fixed(game::Player::X),
            Starter::O => Self::Fixed(game::Player::O),
        }
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Who starts each new round
    #[arg(long, value_enum, default_value_t)]
    pub starter: Starter,
}

pub(crate) struct GameView {
    game: game::GameController<LocalScoreStore>,
    current_cell_state: Option<CellPointerState>,
    toasts: ToastQueue<Timeout>,
}

/// Turns the result of a selection into at most one queued notice.
///
/// Errors are only logged, the board is left as it was.
fn announce<H>(
    toasts: &mut ToastQueue<H>,
    index: game::CellIndex,
    result: game::Result<game::MoveOutcome>,
    schedule: impl FnOnce(ToastId, u32) -> H,
) -> Option<ToastId> {
    match result {
        Ok(outcome) => {
            log::debug!("select cell {}: {:?}", index, outcome);
            Notice::for_outcome(outcome).map(|notice| toasts.push(notice, schedule))
        }
        Err(err) => {
            log::error!("cannot select cell {}: {}", index, err);
            None
        }
    }
}

impl GameView {
    fn select_cell(&mut self, ctx: &Context<Self>, index: game::CellIndex) {
        let result = self.game.select_cell(index);
        let link = ctx.link().clone();
        announce(&mut self.toasts, index, result, move |id, duration_ms| {
            Timeout::new(duration_ms, move || link.send_message(Msg::DismissToast(id)))
        });
    }

    fn is_pressed(&self, index: game::CellIndex) -> bool {
        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                index: pressed,
                buttons: MouseButtons::LEFT,
            }) if pressed == index
        ) && self.game.cell_at(index).is_ok_and(|cell| cell.is_empty())
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let policy = ctx.props().starter.into();
        log::debug!("start policy: {:?}", policy);
        Self {
            game: game::GameController::new(LocalScoreStore, policy),
            current_cell_state: None,
            toasts: ToastQueue::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CellEvent(cell_msg) => {
                log::trace!("cell event: {:?}", cell_msg);
                match track_pointer(&mut self.current_cell_state, cell_msg) {
                    PointerAction::Select(index) => {
                        self.select_cell(ctx, index);
                        true
                    }
                    PointerAction::Redraw => true,
                    PointerAction::Nothing => false,
                }
            }
            ResetScores => {
                self.game.reset_scores();
                true
            }
            DismissToast(id) => self.toasts.dismiss(id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let scores = self.game.scores();
        let next_player = self.game.active_player();
        let cb_reset_scores = ctx.link().callback(|_: MouseEvent| Msg::ResetScores);

        html! {
            <div class="tictactoe">
                <h1>{"Tic Tac Toe Game"}</h1>
                <table>
                    {
                        for (0..BOARD_SIDE).map(|row| html! {
                            <tr>
                                {
                                    for (0..BOARD_SIDE).map(|col| {
                                        let index = row * BOARD_SIDE + col;
                                        let cell = self.game.board()[index];
                                        let pressed = self.is_pressed(index);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {index} {cell} {pressed} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <section>
                    <p>{"Next Player: "}<span>{next_player.symbol()}</span></p>
                    <p>{"Player X wins: "}<span>{scores[game::Player::X]}</span></p>
                    <p>{"Player O wins: "}<span>{scores[game::Player::O]}</span></p>
                    <button onclick={cb_reset_scores}>{"Reset Scores"}</button>
                </section>
                <Toaster toasts={self.toasts.toasts()}/>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellMsg::*;

    fn pointer(index: game::CellIndex, buttons: MouseButtons) -> CellPointerState {
        CellPointerState { index, buttons }
    }

    #[derive(Debug, Default)]
    struct NoStore;

    impl game::ScoreStore for NoStore {
        fn load(&self) -> Option<game::Scores> {
            None
        }

        fn save(&mut self, _scores: &game::Scores) {}

        fn clear(&mut self) {}
    }

    #[test]
    fn left_press_and_release_selects_the_cell() {
        let mut current = None;

        assert_eq!(
            track_pointer(&mut current, Press(pointer(4, MouseButtons::LEFT))),
            PointerAction::Redraw
        );
        assert_eq!(
            track_pointer(&mut current, Update(pointer(4, MouseButtons::empty()))),
            PointerAction::Select(4)
        );
        assert_eq!(current, None);
    }

    #[test]
    fn dragging_to_another_cell_cancels_the_press() {
        let mut current = None;

        track_pointer(&mut current, Press(pointer(0, MouseButtons::LEFT)));
        assert_eq!(track_pointer(&mut current, Leave), PointerAction::Redraw);
        assert_eq!(
            track_pointer(&mut current, Update(pointer(1, MouseButtons::LEFT))),
            PointerAction::Nothing
        );
        assert_eq!(
            track_pointer(&mut current, Update(pointer(1, MouseButtons::empty()))),
            PointerAction::Nothing
        );
        assert_eq!(current, None);
    }

    #[test]
    fn release_over_a_different_cell_does_not_select() {
        let mut current = Some(pointer(3, MouseButtons::LEFT));

        assert_eq!(
            track_pointer(&mut current, Update(pointer(5, MouseButtons::empty()))),
            PointerAction::Redraw
        );
        assert_eq!(current, None);
    }

    #[test]
    fn other_buttons_cancel_the_press() {
        let mut current = None;

        track_pointer(&mut current, Press(pointer(2, MouseButtons::LEFT)));
        track_pointer(
            &mut current,
            Press(pointer(2, MouseButtons::LEFT | MouseButtons::RIGHT)),
        );
        // right released first, left still held
        track_pointer(&mut current, Update(pointer(2, MouseButtons::LEFT)));

        assert_eq!(
            track_pointer(&mut current, Update(pointer(2, MouseButtons::empty()))),
            PointerAction::Redraw
        );
    }

    #[test]
    fn right_click_never_selects() {
        let mut current = None;

        track_pointer(&mut current, Press(pointer(6, MouseButtons::RIGHT)));

        assert_eq!(
            track_pointer(&mut current, Update(pointer(6, MouseButtons::empty()))),
            PointerAction::Redraw
        );
    }

    #[test]
    fn hovering_without_buttons_does_nothing() {
        let mut current = None;

        assert_eq!(
            track_pointer(&mut current, Update(pointer(7, MouseButtons::empty()))),
            PointerAction::Nothing
        );
        assert_eq!(track_pointer(&mut current, Leave), PointerAction::Nothing);
    }

    #[test]
    fn keyboard_activation_selects_and_drops_any_press() {
        let mut current = Some(pointer(1, MouseButtons::LEFT));

        assert_eq!(
            track_pointer(&mut current, Activate(8)),
            PointerAction::Select(8)
        );
        assert_eq!(current, None);
    }

    #[test]
    fn invalid_index_is_logged_without_a_notice() {
        let mut toasts = ToastQueue::<()>::new();

        let queued = announce(&mut toasts, 9, Err(game::GameError::InvalidIndex), |_, _| {});

        assert_eq!(queued, None);
        assert!(toasts.toasts().is_empty());
    }

    #[test]
    fn finished_round_queues_exactly_one_notice() {
        let mut game = game::GameController::new(NoStore, game::StartPolicy::CarryOver);
        let mut toasts = ToastQueue::new();
        let mut timers = Vec::new();

        for index in [0, 4, 1, 8, 2] {
            let result = game.select_cell(index);
            announce(&mut toasts, index, result, |id, ms| timers.push((id, ms)));
        }
        // selecting a taken cell of the fresh board is not announced either
        let result = game.select_cell(0).and_then(|_| game.select_cell(0));
        announce(&mut toasts, 0, result, |id, ms| timers.push((id, ms)));

        let toasts = toasts.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(
            toasts[0].notice.message,
            "Congrats player X! You are the winner!"
        );
        assert_eq!(timers, [(toasts[0].id, Notice::DURATION_MS)]);
    }

    #[test]
    fn starter_maps_to_start_policy() {
        use game::{Player, StartPolicy};

        assert_eq!(StartPolicy::from(Starter::Carry), StartPolicy::CarryOver);
        assert_eq!(StartPolicy::from(Starter::X), StartPolicy::Fixed(Player::X));
        assert_eq!(StartPolicy::from(Starter::O), StartPolicy::Fixed(Player::O));
    }
}
