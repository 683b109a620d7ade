use crate::audio::AudioEmitter;
use crate::settings::{CUSTOM_NAME, CustomForm, SettingsView};
use crate::theme;
use crate::utils::*;
use bitflags::bitflags;
use clap::Args;
use gloo::timers::callback::Interval;
use sapper_core as game;
use game::{
    AudioCue, CellView, Difficulty, GameSession, GameStatus, InputField, Preferences,
    RandomMinefieldGenerator,
};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

const TICK_MILLIS: u32 = 1000;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    NewGame,
    SelectDifficulty(String),
    EditCustom(InputField, String),
    ApplyCustom,
    ToggleTheme,
    ToggleMute,
    SetVolume(f32),
}

fn cell_classes(view: CellView) -> Classes {
    match view {
        CellView::Hidden => classes!(),
        CellView::Flagged => classes!("flag"),
        CellView::Revealed(count) => classes!("open", format!("num-{}", count)),
        CellView::Mine => classes!("open", "mine"),
        CellView::TriggeredMine => classes!("open", "mine", "oops"),
    }
}

/// Text drawn inside a cell: the count when non-zero, a flag, or a mine.
fn cell_label(view: CellView) -> &'static str {
    const COUNTS: [&str; 9] = ["", "1", "2", "3", "4", "5", "6", "7", "8"];

    match view {
        CellView::Hidden => "",
        CellView::Flagged => "🚩",
        CellView::Revealed(count) => COUNTS.get(usize::from(count)).copied().unwrap_or_default(),
        CellView::Mine | CellView::TriggeredMine => "💣",
    }
}

fn status_class(status: GameStatus, mid_open: bool) -> &'static str {
    match status {
        GameStatus::NotStarted | GameStatus::InProgress if mid_open => "mid-open",
        GameStatus::NotStarted => "not-started",
        GameStatus::InProgress => "in-progress",
        GameStatus::Won => "win",
        GameStatus::Lost => "lose",
    }
}

fn game_over_message(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Won => Some("Congratulations! You won! 🎉"),
        GameStatus::Lost => Some("Game Over! 💥"),
        GameStatus::NotStarted | GameStatus::InProgress => None,
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    view: CellView,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellTile)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        view,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!("cell", cell_classes(view));
    if pressed {
        class.push("open");
    }

    let pointer = |kind: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Update(CellPointerState {
                pos: (row, col),
                buttons,
            }));
            log::trace!("({}, {}) mouse {} ({:?})", row, col, kind, buttons);
        })
    };
    let onmousedown = pointer("down");
    let onmouseup = pointer("up");
    let onmouseenter = pointer("enter");
    let onmouseleave = Callback::from(move |_: MouseEvent| callback.emit(CellMsg::Leave));

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}>{cell_label(view)}</td>
    }
}

#[derive(Args, Properties, Debug, Default, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first board instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty to start with: beginner, intermediate or expert
    #[arg(short, long)]
    difficulty: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    store: LocalPreferenceStore,
    prefs: Preferences,
    audio: AudioEmitter,
    difficulty: Difficulty,
    session: GameSession,
    custom_open: bool,
    custom: CustomForm,
    current_cell_state: Option<CellPointerState>,
    timer: Option<Interval>,
}

impl GameView {
    fn new_session(difficulty: Difficulty, seed: u64) -> GameSession {
        let generator = RandomMinefieldGenerator::new(seed);
        log::debug!("new {} game, seed {}", difficulty.name(), seed);
        GameSession::generate(difficulty.config(), generator)
    }

    fn restart(&mut self) {
        self.timer = None;
        self.current_cell_state = None;
        self.session = Self::new_session(self.difficulty, js_random_seed());
    }

    fn play(&mut self, cue: Option<AudioCue>) {
        if let Some(cue) = cue {
            self.audio.play(cue, &self.prefs);
        }
    }

    /// Starts the clock on the first reveal and stops it once the game ends.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        match self.session.status() {
            GameStatus::InProgress if self.timer.is_none() => {
                let link = ctx.link().clone();
                self.timer = Some(Interval::new(TICK_MILLIS, move || {
                    link.send_message(Msg::Tick)
                }));
            }
            status if status.is_finished() => self.timer = None,
            _ => {}
        }
    }

    fn reveal_cell(&mut self, ctx: &Context<Self>, coords: game::Coord2) -> bool {
        let outcome = self.session.handle_reveal(coords);
        log::debug!("reveal {:?}: {:?}", coords, outcome);
        self.play(outcome.cue());
        self.sync_timer(ctx);
        outcome.has_update()
    }

    fn mark_cell(&mut self, coords: game::Coord2) -> bool {
        let outcome = self.session.toggle_flag(coords);
        log::debug!("mark {:?}: {:?}", coords, outcome);
        self.play(outcome.cue());
        outcome.has_update()
    }

    fn is_mid_open(&self) -> bool {
        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                buttons: MouseButtons::LEFT,
                ..
            })
        )
    }

    fn is_pressed(&self, coords: game::Coord2, view: CellView) -> bool {
        if self.session.is_finished() || view != CellView::Hidden {
            return false;
        }
        self.current_cell_state
            == Some(CellPointerState {
                pos: coords,
                buttons: MouseButtons::LEFT,
            })
    }

    fn handle_pointer(&mut self, ctx: &Context<Self>, cell_state: CellPointerState) -> bool {
        if !cell_state.buttons.is_empty() {
            return match self.current_cell_state.replace(cell_state) {
                None => true,
                Some(previous) => previous != cell_state,
            };
        }

        match self.current_cell_state.take() {
            None => false,
            Some(CellPointerState { pos, buttons }) => match buttons {
                MouseButtons::LEFT => {
                    self.reveal_cell(ctx, pos);
                    true
                }
                MouseButtons::RIGHT => {
                    self.mark_cell(pos);
                    true
                }
                _ => true,
            },
        }
    }

    fn select_difficulty(&mut self, name: &str) -> bool {
        if name == CUSTOM_NAME {
            self.custom = CustomForm::from_config(self.difficulty.config());
            self.custom_open = true;
            return true;
        }

        let Some(difficulty) = Difficulty::from_name(name) else {
            log::warn!("unknown difficulty: {}", name);
            return false;
        };
        self.custom_open = false;
        self.difficulty = difficulty;
        self.restart();
        true
    }

    fn apply_custom(&mut self) -> bool {
        match self.custom.parse() {
            Ok(config) => {
                self.difficulty = Difficulty::Custom(config);
                self.restart();
                true
            }
            Err(err) => {
                log::warn!("invalid custom difficulty: {}", err);
                false
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let store = LocalPreferenceStore;
        let prefs = Preferences::load(&store);
        theme::apply(prefs.theme());

        let difficulty = match props.difficulty.as_deref().map(Difficulty::from_name) {
            Some(Some(difficulty)) => difficulty,
            Some(None) => {
                log::warn!("unknown difficulty {:?}, using default", props.difficulty);
                Difficulty::default()
            }
            None => Difficulty::default(),
        };
        let seed = props.seed.unwrap_or_else(js_random_seed);

        Self {
            store,
            prefs,
            audio: AudioEmitter::default(),
            difficulty,
            session: Self::new_session(difficulty, seed),
            custom_open: false,
            custom: CustomForm::from_config(difficulty.config()),
            current_cell_state: None,
            timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                self.handle_pointer(ctx, cell_state)
            }
            Tick => self.session.tick(),
            NewGame => {
                self.restart();
                true
            }
            SelectDifficulty(name) => self.select_difficulty(&name),
            EditCustom(field, value) => {
                self.custom.edit(field, value);
                true
            }
            ApplyCustom => self.apply_custom(),
            ToggleTheme => {
                let theme = self.prefs.toggle_theme(&mut self.store);
                theme::apply(theme);
                true
            }
            ToggleMute => {
                let muted = self.prefs.toggle_muted(&mut self.store);
                log::debug!("muted: {}", muted);
                true
            }
            SetVolume(volume) => {
                self.prefs.set_volume(volume, &mut self.store);
                self.audio.set_volume(self.prefs.volume());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.session.size();
        let status = self.session.status();
        let status_class = status_class(status, self.is_mid_open());
        let mines_left = format_for_counter(self.session.mines_left());
        let elapsed_time = format_for_counter(
            i32::try_from(self.session.elapsed_seconds()).unwrap_or(i32::MAX),
        );

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let link = ctx.link();

        html! {
            <div class="sapper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <SettingsView
                    prefs={self.prefs}
                    difficulty={self.difficulty}
                    custom={self.custom.clone()}
                    custom_open={self.custom_open}
                    on_select_difficulty={link.callback(SelectDifficulty)}
                    on_edit_custom={link.callback(|(field, value): (InputField, String)| EditCustom(field, value))}
                    on_apply_custom={link.callback(|_: ()| ApplyCustom)}
                    on_toggle_theme={link.callback(|_: ()| ToggleTheme)}
                    on_toggle_mute={link.callback(|_: ()| ToggleMute)}
                    on_volume={link.callback(SetVolume)}
                />
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={status_class} onclick={cb_new_game.clone()}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <table class={status.is_playable().then_some("playable")}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let view = self.session.cell_view(pos);
                                        let pressed = self.is_pressed(pos, view);
                                        let callback = link.callback(CellEvent);
                                        html! {
                                            <CellTile {row} {col} {view} {pressed} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if let Some(message) = game_over_message(status) {
                    <dialog id="game-over" open={true}>
                        <p>{message}</p>
                        <button onclick={cb_new_game}>{"Play Again"}</button>
                    </dialog>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_follows_status() {
        assert_eq!(status_class(GameStatus::NotStarted, false), "not-started");
        assert_eq!(status_class(GameStatus::InProgress, true), "mid-open");
        assert_eq!(status_class(GameStatus::Won, true), "win");
        assert_eq!(status_class(GameStatus::Lost, false), "lose");
    }

    #[test]
    fn dialog_only_after_game_over() {
        assert_eq!(game_over_message(GameStatus::InProgress), None);
        assert_eq!(
            game_over_message(GameStatus::Won),
            Some("Congratulations! You won! 🎉")
        );
        assert_eq!(game_over_message(GameStatus::Lost), Some("Game Over! 💥"));
    }

    #[test]
    fn cell_classes_mark_the_triggered_mine() {
        assert!(cell_classes(CellView::Hidden).is_empty());
        assert!(cell_classes(CellView::Revealed(3)).contains("num-3"));
        assert!(cell_classes(CellView::Mine).contains("mine"));
        assert!(!cell_classes(CellView::Mine).contains("oops"));
        assert!(cell_classes(CellView::TriggeredMine).contains("oops"));
    }

    #[test]
    fn cell_label_shows_counts_flags_and_mines() {
        assert_eq!(cell_label(CellView::Hidden), "");
        assert_eq!(cell_label(CellView::Revealed(0)), "");
        assert_eq!(cell_label(CellView::Revealed(3)), "3");
        assert_eq!(cell_label(CellView::Revealed(8)), "8");
        assert_eq!(cell_label(CellView::Flagged), "🚩");
        assert_eq!(cell_label(CellView::Mine), "💣");
        assert_eq!(cell_label(CellView::TriggeredMine), "💣");
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let a = GameView::new_session(Difficulty::Expert, 42);
        let b = GameView::new_session(Difficulty::Expert, 42);
        assert_eq!(a, b);
        assert_eq!(a.mines_left(), 99);
    }
}
