/// Full favorites page: reorderable list with dividers, export and import

use yew::prelude::*;
use web_sys::{File, HtmlInputElement};
use patternfly_yew::prelude::*;

use crate::favorite::Entry;
use crate::transfer::{ImportChoice, PendingImport};
use crate::ui::components::{DragHandle, ExternalBadge, Notice, NoticeBanner};
use crate::ui::import_dialog::ImportDialog;
use crate::urls::{hostname, is_same_origin};

/// An in-progress drag, created on dragstart and gone after drop or dragend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub source: usize,
    pub over: Option<usize>,
}

impl DragSession {
    pub fn start(source: usize) -> DragSession {
        DragSession { source, over: None }
    }

    pub fn hover(self, index: usize) -> DragSession {
        DragSession { over: Some(index), ..self }
    }

    /// The `(from, to)` move for a drop on row `target`; `None` when dropped in place
    pub fn drop_on(self, target: usize) -> Option<(usize, usize)> {
        (self.source != target).then_some((self.source, target))
    }
}

/// A divider rename in progress, pinned to the entry it started on
#[derive(Clone, Debug, PartialEq)]
pub struct DividerEdit {
    pub index: usize,
    pub divider: Entry,
}

impl DividerEdit {
    pub fn start(index: usize, divider: Entry) -> DividerEdit {
        DividerEdit { index, divider }
    }

    /// Row still holding the divider being renamed; `None` once the list shifted under it
    pub fn row(&self, entries: &[Entry]) -> Option<usize> {
        (entries.get(self.index) == Some(&self.divider)).then_some(self.index)
    }
}

#[derive(Properties, PartialEq)]
pub struct FavoritesListProps {
    pub entries: Vec<Entry>,
    pub current_host: String,
    #[prop_or_default]
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub pending_import: Option<PendingImport>,
    #[prop_or(false)]
    pub importing: bool,
    pub on_remove: Callback<usize>,
    pub on_move: Callback<(usize, usize)>,
    pub on_add_divider: Callback<()>,
    pub on_rename: Callback<(usize, String)>,
    pub on_export: Callback<()>,
    pub on_import_file: Callback<File>,
    pub on_confirm_cross_origin: Callback<()>,
    pub on_import_choice: Callback<ImportChoice>,
    pub on_dismiss_notice: Callback<()>,
}

#[function_component(FavoritesList)]
pub fn favorites_list(props: &FavoritesListProps) -> Html {
    let drag = use_state(|| None::<DragSession>);
    let editing = use_state(|| None::<DividerEdit>);
    let edit_input_value = use_state(String::new);

    // Start renaming a divider
    let on_start_edit = {
        let editing = editing.clone();
        let edit_input_value = edit_input_value.clone();

        Callback::from(move |(index, divider): (usize, Entry)| {
            edit_input_value.set(divider.title().to_string());
            editing.set(Some(DividerEdit::start(index, divider)));
        })
    };

    let editing_row = (*editing).as_ref().and_then(|edit| edit.row(&props.entries));

    let on_save_edit = {
        let editing = editing.clone();
        let edit_input_value = edit_input_value.clone();
        let on_rename = props.on_rename.clone();

        Callback::from(move |_: ()| {
            if let Some(index) = editing_row {
                let title = edit_input_value.trim().to_string();
                if !title.is_empty() {
                    on_rename.emit((index, title));
                }
            }
            editing.set(None);
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: ()| {
            editing.set(None);
        })
    };

    let on_edit_input = {
        let edit_input_value = edit_input_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                edit_input_value.set(input.value());
            }
        })
    };

    let on_edit_keydown = {
        let on_save_edit = on_save_edit.clone();
        let on_cancel_edit = on_cancel_edit.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => on_save_edit.emit(()),
            "Escape" => on_cancel_edit.emit(()),
            _ => {}
        })
    };

    // Drag lifecycle
    let on_drag_start = {
        let drag = drag.clone();
        let editing = editing.clone();
        move |index: usize| {
            let drag = drag.clone();
            let editing = editing.clone();
            Callback::from(move |e: DragEvent| {
                editing.set(None);
                if let Some(transfer) = e.data_transfer() {
                    transfer.set_effect_allowed("move");
                    // Firefox will not start a drag without data
                    let _ = transfer.set_data("text/plain", &index.to_string());
                }
                drag.set(Some(DragSession::start(index)));
            })
        }
    };

    let on_drag_over = {
        let drag = drag.clone();
        move |index: usize| {
            let drag = drag.clone();
            Callback::from(move |e: DragEvent| {
                e.prevent_default();
                if let Some(session) = *drag {
                    if session.over != Some(index) {
                        drag.set(Some(session.hover(index)));
                    }
                }
            })
        }
    };

    let on_drop = {
        let drag = drag.clone();
        let on_move = props.on_move.clone();
        move |index: usize| {
            let drag = drag.clone();
            let on_move = on_move.clone();
            Callback::from(move |e: DragEvent| {
                e.prevent_default();
                if let Some(session) = *drag {
                    if let Some(mv) = session.drop_on(index) {
                        on_move.emit(mv);
                    }
                }
                drag.set(None);
            })
        }
    };

    let on_drag_end = {
        let drag = drag.clone();
        Callback::from(move |_: DragEvent| {
            drag.set(None);
        })
    };

    // File picker
    let on_file_change = {
        let on_import_file = props.on_import_file.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    on_import_file.emit(file);
                }
                // Clear so the same file can be picked again
                input.set_value("");
            }
        })
    };

    let on_remove = {
        let editing = editing.clone();
        let on_remove = props.on_remove.clone();
        move |index: usize| {
            let editing = editing.clone();
            let on_remove = on_remove.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                editing.set(None);
                on_remove.emit(index);
            })
        }
    };

    let rows = props.entries.iter().enumerate().map(|(index, entry)| {
        let over = drag.map_or(false, |s| s.over == Some(index) && s.source != index);
        let dragging = drag.map_or(false, |s| s.source == index);
        let row_class = classes!(
            "favorite-item",
            entry.is_divider().then_some("favorite-divider"),
            over.then_some("drag-over"),
            dragging.then_some("dragging")
        );

        let content = match entry {
            Entry::Divider { title, .. } => {
                if editing_row == Some(index) {
                    html! {
                        <div class="divider-edit-mode">
                            <input
                                type="text"
                                value={(*edit_input_value).clone()}
                                oninput={on_edit_input.clone()}
                                onkeydown={on_edit_keydown.clone()}
                                class="divider-title-input"
                            />
                            <Button onclick={on_save_edit.reform(|_| ())}>
                                {"✓"}
                            </Button>
                            <Button onclick={on_cancel_edit.reform(|_| ())} variant={ButtonVariant::Secondary}>
                                {"✗"}
                            </Button>
                        </div>
                    }
                } else {
                    html! {
                        <div class="divider-view-mode">
                            <h3
                                class="divider-title"
                                title="Click to rename"
                                onclick={on_start_edit.reform({
                                    let divider = entry.clone();
                                    move |_| (index, divider.clone())
                                })}
                            >
                                {title}
                            </h3>
                            <span class="edit-icon">{"✏️"}</span>
                        </div>
                    }
                }
            }
            Entry::Link { title, url, .. } => html! {
                <>
                    <a class="favorite-link" href={url.clone()}>{title}</a>
                    if !is_same_origin(url, &props.current_host) {
                        <ExternalBadge host={hostname(url)} />
                    }
                </>
            },
        };

        html! {
            <li
                class={row_class}
                draggable="true"
                ondragstart={on_drag_start(index)}
                ondragover={on_drag_over(index)}
                ondrop={on_drop(index)}
                ondragend={on_drag_end.clone()}
            >
                <DragHandle />
                {content}
                <button
                    type="button"
                    class="remove-favorite"
                    title={if entry.is_divider() { "Remove section" } else { "Remove from favorites" }}
                    onclick={on_remove(index)}
                >
                    {"×"}
                </button>
            </li>
        }
    });

    html! {
        <div class="favorites-page">
            <div class="favorites-toolbar">
                <Button onclick={props.on_add_divider.reform(|_| ())} variant={ButtonVariant::Secondary}>
                    {"➕ Add Section"}
                </Button>
                <Button onclick={props.on_export.reform(|_| ())} variant={ButtonVariant::Secondary}>
                    {"📥 Export"}
                </Button>
                <label class="favorites-import-label">
                    {"📤 Import"}
                    <input
                        id="import-favorites"
                        type="file"
                        accept=".json,application/json"
                        class="favorites-import-input"
                        disabled={props.importing}
                        onchange={on_file_change}
                    />
                </label>
            </div>

            if let Some(notice) = props.notice.clone() {
                <NoticeBanner notice={notice} on_dismiss={props.on_dismiss_notice.clone()} />
            }

            if props.importing {
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{"Reading file..."}</p>
                </div>
            }

            if let Some(pending) = props.pending_import.clone() {
                <ImportDialog
                    pending={pending}
                    current_len={props.entries.len()}
                    on_confirm_cross_origin={props.on_confirm_cross_origin.clone()}
                    on_choice={props.on_import_choice.clone()}
                />
            }

            if props.entries.is_empty() {
                <p class="no-favorites-message">
                    {"No favorites yet. Browse the site and click the star icon to add pages to your favorites!"}
                </p>
            } else {
                <ul class="favorites-items">
                    {for rows}
                </ul>
            }

            <div class="footer">
                {format!("{} favorites • {} sections",
                    props.entries.iter().filter(|e| !e.is_divider()).count(),
                    props.entries.iter().filter(|e| e.is_divider()).count()
                )}
            </div>
        </div>
    }
}
