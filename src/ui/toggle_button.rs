/// Per-page "add to favorites" star button

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FavoriteToggleProps {
    pub favorited: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(FavoriteToggle)]
pub fn favorite_toggle(props: &FavoriteToggleProps) -> Html {
    let (class, title, icon, label) = if props.favorited {
        ("favorites-toggle favorited", "Remove from Favorites", "★", "Favorited")
    } else {
        ("favorites-toggle", "Add to Favorites", "☆", "Add to Favorites")
    };

    html! {
        <button
            type="button"
            class={class}
            title={title}
            aria-pressed={props.favorited.to_string()}
            onclick={props.on_toggle.reform(|_| ())}
        >
            <span class="favorite-icon">{icon}</span>
            <span class="favorite-text">{label}</span>
        </button>
    }
}
