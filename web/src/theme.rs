use sapper_core::Theme;

pub(crate) const ATTR_NAME: &str = "data-theme";

pub(crate) fn apply(theme: Theme) {
    use gloo::utils::document;

    let Some(html) = document().document_element() else {
        log::error!("no root element to apply theme to");
        return;
    };
    let scheme = theme.scheme();
    log::debug!("theme-scheme: {}", scheme);
    if let Err(err) = html.set_attribute(ATTR_NAME, scheme) {
        log::error!("failed to set theme: {:?}", err);
    }
}

/// Toggle button text, naming the theme currently shown.
pub(crate) const fn label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌞 Light Mode",
        Theme::Dark => "🌙 Dark Mode",
    }
}
