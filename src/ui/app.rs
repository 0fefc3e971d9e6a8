/// Root component: owns the store handle and portals each view into its mount point

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use yew::prelude::*;
use yew::create_portal;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, File, Window};

use crate::config::FavoritesConfig;
use crate::error::FavoritesError;
use crate::favorite::PageInfo;
use crate::storage::{iso_now, FavoritesStore, LocalStorage};
use crate::transfer::{
    apply_import, export_all, export_filename, parse_import, ImportChoice, ImportOutcome, ImportStep,
    ImportSummary, PendingImport,
};
use crate::ui::components::Notice;
use crate::ui::download::download_json;
use crate::ui::favorites_list::FavoritesList;
use crate::ui::sidebar::FavoritesSidebar;
use crate::ui::toggle_button::FavoriteToggle;

const NEW_DIVIDER_TITLE: &str = "New section";

/// Shared handle to the page's single favorites store
#[derive(Clone)]
pub struct StoreHandle(Rc<RefCell<FavoritesStore<LocalStorage>>>);

impl StoreHandle {
    pub fn new(store: FavoritesStore<LocalStorage>) -> StoreHandle {
        StoreHandle(Rc::new(RefCell::new(store)))
    }

    pub fn borrow(&self) -> Ref<'_, FavoritesStore<LocalStorage>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, FavoritesStore<LocalStorage>> {
        self.0.borrow_mut()
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// DOM elements the views render into; any of them may be absent on a page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mounts {
    pub button: Option<Element>,
    pub list: Option<Element>,
    pub sidebar: Option<Element>,
}

impl Mounts {
    pub fn find(document: &Document, config: &FavoritesConfig) -> Mounts {
        Mounts {
            button: document.get_element_by_id(&config.button_id),
            list: document.get_element_by_id(&config.list_id),
            sidebar: document.get_element_by_id(&config.sidebar_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.button.is_none() && self.list.is_none() && self.sidebar.is_none()
    }
}

/// Title from the button's `data-page-info`, URL from the address bar
pub fn read_page_info(window: &Window, button: Option<&Element>) -> PageInfo {
    let mut page = button
        .and_then(|el| el.get_attribute("data-page-info"))
        .and_then(|raw| match serde_json::from_str::<PageInfo>(&raw) {
            Ok(page) => Some(page),
            Err(e) => {
                log::warn!("Ignoring malformed data-page-info: {}", e);
                None
            }
        })
        .unwrap_or_default();

    page.url = window.location().href().unwrap_or_default();
    if page.title.is_empty() {
        page.title = window
            .document()
            .map(|d| d.title())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| page.url.clone());
    }
    page
}

async fn read_file_text(file: &File) -> Result<String, FavoritesError> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| FavoritesError::FileRead(format!("{:?}", e)))?;
    text.as_string()
        .ok_or_else(|| FavoritesError::FileRead("file is not text".to_string()))
}

/// Show a notice on the favorites page, or fall back to an alert elsewhere
fn notify(notice: &UseStateHandle<Option<Notice>>, on_list_page: bool, message: Notice) {
    if on_list_page {
        notice.set(Some(message));
    } else if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&message.message);
    }
}

/// Result notice for a finished import; links from other sites turn it into a warning
pub fn import_notice(outcome: &ImportOutcome, summary: &ImportSummary) -> Notice {
    match outcome {
        ImportOutcome::Cancelled => Notice::info(outcome.message()),
        _ if summary.cross_origin > 0 => Notice::warning(format!(
            "{} {} of them point at other sites and are marked with ⚠️.",
            outcome.message(),
            summary.cross_origin
        )),
        _ => Notice::success(outcome.message()),
    }
}

#[derive(Properties, PartialEq)]
pub struct FavoritesAppProps {
    pub store: StoreHandle,
    pub mounts: Mounts,
    pub page: PageInfo,
    pub current_host: String,
    pub config: FavoritesConfig,
}

#[function_component(FavoritesApp)]
pub fn favorites_app(props: &FavoritesAppProps) -> Html {
    let refresh = use_force_update();
    let notice = use_state(|| None::<Notice>);
    let pending_import = use_state(|| None::<PendingImport>);
    let importing = use_state(|| false);
    let sidebar_collapsed = {
        let store = props.store.clone();
        use_state(move || store.borrow().sidebar_collapsed())
    };
    let on_list_page = props.mounts.list.is_some();

    // Every mutation ends here: surface a first write failure, then rebuild all views
    let after_mutation = {
        let store = props.store.clone();
        let notice = notice.clone();

        Callback::from(move |_: ()| {
            let write_error = store.borrow_mut().take_write_error();
            if let Some(e) = write_error {
                notify(
                    &notice,
                    on_list_page,
                    Notice::error(format!("{}. Changes are kept until you leave this page.", e)),
                );
            }
            refresh.force_update();
        })
    };

    let on_toggle = {
        let store = props.store.clone();
        let page = props.page.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |_: ()| {
            store.borrow_mut().toggle(&page);
            after_mutation.emit(());
        })
    };

    let on_remove = {
        let store = props.store.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |index: usize| {
            let result = store.borrow_mut().remove_at(index);
            match result {
                Ok(entry) => log::info!("Removed favorite {:?}", entry.title()),
                Err(e) => log::warn!("Remove failed: {}", e),
            }
            after_mutation.emit(());
        })
    };

    let on_move = {
        let store = props.store.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |(from, to): (usize, usize)| {
            let result = store.borrow_mut().move_to(from, to);
            if let Err(e) = result {
                log::warn!("Move failed: {}", e);
            }
            after_mutation.emit(());
        })
    };

    let on_add_divider = {
        let store = props.store.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |_: ()| {
            store.borrow_mut().add_divider(NEW_DIVIDER_TITLE);
            after_mutation.emit(());
        })
    };

    let on_rename = {
        let store = props.store.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |(index, title): (usize, String)| {
            let result = store.borrow_mut().rename_divider(index, title);
            if let Err(e) = result {
                log::warn!("Rename failed: {}", e);
            }
            after_mutation.emit(());
        })
    };

    let on_export = {
        let store = props.store.clone();
        let notice = notice.clone();

        Callback::from(move |_: ()| {
            let now = iso_now();
            let entries = store.borrow().entries().to_vec();
            let result = export_all(&entries, &now)
                .and_then(|json| download_json(&json, &export_filename(&now)));

            match result {
                Ok(()) => log::info!("Exported {} favorites", entries.len()),
                Err(FavoritesError::NothingToExport) => {
                    notify(&notice, on_list_page, Notice::info(FavoritesError::NothingToExport.to_string()));
                }
                Err(e) => notify(&notice, on_list_page, Notice::error(e.to_string())),
            }
        })
    };

    // Move a parsed import forward: ask the next question or apply it
    let advance_import = {
        let store = props.store.clone();
        let pending_import = pending_import.clone();
        let notice = notice.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |pending: PendingImport| {
            let current_len = store.borrow().len();
            match pending.next_step(current_len) {
                ImportStep::Apply => {
                    let summary = pending.summary;
                    let outcome = apply_import(&mut *store.borrow_mut(), pending, ImportChoice::Replace);
                    pending_import.set(None);
                    notify(&notice, on_list_page, import_notice(&outcome, &summary));
                    after_mutation.emit(());
                }
                ImportStep::ConfirmCrossOrigin | ImportStep::ChooseMode => {
                    pending_import.set(Some(pending));
                }
            }
        })
    };

    let on_import_file = {
        let importing = importing.clone();
        let notice = notice.clone();
        let advance_import = advance_import.clone();
        let current_host = props.current_host.clone();

        Callback::from(move |file: File| {
            let importing = importing.clone();
            let notice = notice.clone();
            let advance_import = advance_import.clone();
            let current_host = current_host.clone();

            importing.set(true);
            log::info!("Importing favorites from {}", file.name());

            spawn_local(async move {
                let parsed = match read_file_text(&file).await {
                    Ok(text) => parse_import(&text),
                    Err(e) => Err(e),
                };
                importing.set(false);

                match parsed {
                    Ok(entries) => advance_import.emit(PendingImport::new(entries, &current_host)),
                    Err(e) => {
                        log::warn!("Import rejected: {}", e);
                        notify(
                            &notice,
                            on_list_page,
                            Notice::error(format!("Error importing favorites: {}", e)),
                        );
                    }
                }
            });
        })
    };

    let on_confirm_cross_origin = {
        let pending_import = pending_import.clone();
        let advance_import = advance_import.clone();

        Callback::from(move |_: ()| {
            if let Some(mut pending) = (*pending_import).clone() {
                pending.confirm_cross_origin();
                advance_import.emit(pending);
            }
        })
    };

    let on_import_choice = {
        let store = props.store.clone();
        let pending_import = pending_import.clone();
        let notice = notice.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |choice: ImportChoice| {
            if let Some(pending) = (*pending_import).clone() {
                pending_import.set(None);
                let summary = pending.summary;
                let outcome = apply_import(&mut *store.borrow_mut(), pending, choice);
                notify(&notice, on_list_page, import_notice(&outcome, &summary));
                if outcome != ImportOutcome::Cancelled {
                    after_mutation.emit(());
                }
            }
        })
    };

    let on_dismiss_notice = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    let on_toggle_sidebar = {
        let store = props.store.clone();
        let sidebar_collapsed = sidebar_collapsed.clone();

        Callback::from(move |_: ()| {
            let collapsed = !*sidebar_collapsed;
            store.borrow().set_sidebar_collapsed(collapsed);
            sidebar_collapsed.set(collapsed);
        })
    };

    let (entries, favorited) = {
        let store = props.store.borrow();
        (store.entries().to_vec(), store.contains(&props.page.url))
    };

    let button = props.mounts.button.clone().map(|host| {
        create_portal(
            html! { <FavoriteToggle favorited={favorited} on_toggle={on_toggle} /> },
            host,
        )
    });

    let sidebar = props.mounts.sidebar.clone().map(|host| {
        create_portal(
            html! {
                <FavoritesSidebar
                    entries={entries.clone()}
                    limit={props.config.sidebar_limit}
                    collapsed={*sidebar_collapsed}
                    page_url={props.config.favorites_page_url.clone()}
                    on_toggle_collapsed={on_toggle_sidebar}
                />
            },
            host,
        )
    });

    let list = props.mounts.list.clone().map(|host| {
        create_portal(
            html! {
                <FavoritesList
                    entries={entries.clone()}
                    current_host={props.current_host.clone()}
                    notice={(*notice).clone()}
                    pending_import={(*pending_import).clone()}
                    importing={*importing}
                    on_remove={on_remove}
                    on_move={on_move}
                    on_add_divider={on_add_divider}
                    on_rename={on_rename}
                    on_export={on_export}
                    on_import_file={on_import_file}
                    on_confirm_cross_origin={on_confirm_cross_origin}
                    on_import_choice={on_import_choice}
                    on_dismiss_notice={on_dismiss_notice}
                />
            },
            host,
        )
    });

    html! {
        <>
            {for button}
            {for sidebar}
            {for list}
        </>
    }
}
