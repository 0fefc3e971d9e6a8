/// Compact sidebar view: the first few favorite links

use yew::prelude::*;

use crate::favorite::Entry;
use crate::operations::links;

/// First `limit` links in sequence order; dividers are skipped
pub fn sidebar_links(entries: &[Entry], limit: usize) -> Vec<&Entry> {
    links(entries).map(|(_, entry)| entry).take(limit).collect()
}

#[derive(Properties, PartialEq)]
pub struct FavoritesSidebarProps {
    pub entries: Vec<Entry>,
    pub limit: usize,
    pub collapsed: bool,
    pub page_url: String,
    pub on_toggle_collapsed: Callback<()>,
}

#[function_component(FavoritesSidebar)]
pub fn favorites_sidebar(props: &FavoritesSidebarProps) -> Html {
    let shown = sidebar_links(&props.entries, props.limit);
    let total = links(&props.entries).count();

    html! {
        <div class={classes!("favorites-sidebar", props.collapsed.then_some("collapsed"))}>
            <button
                type="button"
                class="favorites-sidebar-header"
                aria-expanded={(!props.collapsed).to_string()}
                onclick={props.on_toggle_collapsed.reform(|_| ())}
            >
                {if props.collapsed { "▸ Favorites" } else { "▾ Favorites" }}
            </button>

            if !props.collapsed {
                if shown.is_empty() {
                    <p class="favorites-sidebar-empty">{"No favorites yet."}</p>
                } else {
                    <ul class="favorites-sidebar-items">
                        {for shown.iter().map(|entry| html! {
                            <li>
                                <a href={entry.url().unwrap_or_default().to_string()}>{entry.title()}</a>
                            </li>
                        })}
                    </ul>
                }
                <a class="favorites-sidebar-more" href={props.page_url.clone()}>
                    {if total > shown.len() {
                        format!("View all {} favorites", total)
                    } else {
                        "Manage favorites".to_string()
                    }}
                </a>
            }
        </div>
    }
}
