use crate::theme;
use sapper_core::{BoardConfig, Difficulty, InputField, Preferences};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub(crate) const CUSTOM_NAME: &str = "custom";

/// Raw text of the custom difficulty form, kept as typed until applied.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CustomForm {
    pub rows: String,
    pub cols: String,
    pub mines: String,
}

impl CustomForm {
    pub(crate) fn from_config(config: BoardConfig) -> Self {
        Self {
            rows: config.rows().to_string(),
            cols: config.cols().to_string(),
            mines: config.mines().to_string(),
        }
    }

    pub(crate) fn edit(&mut self, field: InputField, value: String) {
        match field {
            InputField::Rows => self.rows = value,
            InputField::Cols => self.cols = value,
            InputField::Mines => self.mines = value,
        }
        self.clamp_mines();
    }

    /// Lowers the mine count to the cap for the typed dimensions, once all three parse.
    fn clamp_mines(&mut self) {
        let (Ok(rows), Ok(cols), Ok(mines)) = (
            self.rows.trim().parse::<u32>(),
            self.cols.trim().parse::<u32>(),
            self.mines.trim().parse::<u32>(),
        ) else {
            return;
        };
        let max = BoardConfig::max_mines(rows, cols);
        if mines > max {
            self.mines = max.to_string();
        }
    }

    pub(crate) fn parse(&self) -> Result<BoardConfig, sapper_core::DifficultyError> {
        BoardConfig::from_input(&self.rows, &self.cols, &self.mines)
    }
}

impl Default for CustomForm {
    fn default() -> Self {
        Self::from_config(BoardConfig::default())
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub prefs: Preferences,
    pub difficulty: Difficulty,
    pub custom: CustomForm,
    #[prop_or_default]
    pub custom_open: bool,
    pub on_select_difficulty: Callback<String>,
    pub on_edit_custom: Callback<(InputField, String)>,
    pub on_apply_custom: Callback<()>,
    pub on_toggle_theme: Callback<()>,
    pub on_toggle_mute: Callback<()>,
    pub on_volume: Callback<f32>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let selected = if props.custom_open {
        CUSTOM_NAME
    } else {
        props.difficulty.name()
    };

    let onchange = {
        let callback = props.on_select_difficulty.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            callback.emit(select.value());
        })
    };

    let on_theme = props.on_toggle_theme.reform(|_: MouseEvent| ());
    let on_mute = props.on_toggle_mute.reform(|_: MouseEvent| ());
    let on_volume = {
        let callback = props.on_volume.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<f32>() {
                Ok(percent) => callback.emit(percent / 100.0),
                Err(err) => log::warn!("bad volume {:?}: {}", input.value(), err),
            }
        })
    };

    let mute_label = if props.prefs.is_muted() { "🔇" } else { "🔊" };
    let volume = ((props.prefs.volume() * 100.0).round() as u32).to_string();

    html! {
        <header id="settings">
            <select {onchange}>
                {
                    for Difficulty::ALL_PRESETS.into_iter().map(|difficulty| html! {
                        <option value={difficulty.name()} selected={difficulty.name() == selected}>
                            {difficulty.label()}
                        </option>
                    })
                }
                <option value={CUSTOM_NAME} selected={selected == CUSTOM_NAME}>{"Custom"}</option>
            </select>
            <button onclick={on_theme}>{theme::label(props.prefs.theme())}</button>
            <button onclick={on_mute}>{mute_label}</button>
            <input type="range" min="0" max="100" value={volume} oninput={on_volume}/>
            if props.custom_open {
                <CustomDifficultyView
                    form={props.custom.clone()}
                    on_edit={props.on_edit_custom.clone()}
                    on_apply={props.on_apply_custom.clone()}
                />
            }
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct CustomDifficultyProps {
    form: CustomForm,
    on_edit: Callback<(InputField, String)>,
    on_apply: Callback<()>,
}

#[function_component]
fn CustomDifficultyView(props: &CustomDifficultyProps) -> Html {
    let field = |field: InputField, value: &str| {
        let callback = props.on_edit.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            callback.emit((field, input.value()));
        });
        html! {
            <label>
                {field.to_string()}
                <input type="number" value={value.to_string()} {oninput}/>
            </label>
        }
    };

    let parsed = props.form.parse();
    let error = parsed.as_ref().err().map(|err| err.to_string());
    let onclick = props.on_apply.reform(|_: MouseEvent| ());

    html! {
        <form id="custom" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            {field(InputField::Rows, &props.form.rows)}
            {field(InputField::Cols, &props.form.cols)}
            {field(InputField::Mines, &props.form.mines)}
            <button type="button" disabled={parsed.is_err()} {onclick}>{"Apply"}</button>
            if let Some(error) = error {
                <small class="error">{error}</small>
            }
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_shows_beginner() {
        let form = CustomForm::default();
        assert_eq!(form.rows, "9");
        assert_eq!(form.cols, "9");
        assert_eq!(form.mines, "10");
        assert_eq!(form.parse(), Ok(BoardConfig::beginner()));
    }

    #[test]
    fn shrinking_the_board_clamps_mines() {
        let mut form = CustomForm::from_config(BoardConfig::expert());
        form.edit(InputField::Rows, "5".to_string());
        form.edit(InputField::Cols, "5".to_string());
        assert_eq!(form.mines, "22");
        assert!(form.parse().is_ok());
    }

    #[test]
    fn partial_input_is_left_alone() {
        let mut form = CustomForm::default();
        form.edit(InputField::Rows, "".to_string());
        form.edit(InputField::Mines, "500".to_string());
        assert_eq!(form.mines, "500");
        assert!(form.parse().is_err());
    }
}
