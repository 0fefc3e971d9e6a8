/// Merge / replace / cancel prompt for a parsed import file

use yew::prelude::*;
use patternfly_yew::prelude::*;

use crate::transfer::{ImportChoice, ImportStep, ImportSummary, PendingImport};

#[derive(Properties, PartialEq)]
pub struct ImportDialogProps {
    pub pending: PendingImport,
    /// Length of the current favorites list
    pub current_len: usize,
    pub on_confirm_cross_origin: Callback<()>,
    pub on_choice: Callback<ImportChoice>,
}

/// One-line description of what the file contains
pub fn describe(summary: &ImportSummary) -> String {
    let mut parts = vec![format!("{} links", summary.links())];
    if summary.cross_origin > 0 {
        parts.push(format!("{} from other sites", summary.cross_origin));
    }
    if summary.dividers > 0 {
        parts.push(format!("{} section dividers", summary.dividers));
    }
    format!("This file contains {}.", parts.join(", "))
}

/// Question asked once any cross-origin confirmation is out of the way
pub fn prompt(step: ImportStep, current_len: usize) -> String {
    match step {
        ImportStep::Apply => "Your favorites list is empty. Import these favorites?".to_string(),
        _ => format!(
            "You already have {} favorites. Merge the imported ones into your list, or replace it?",
            current_len
        ),
    }
}

#[function_component(ImportDialog)]
pub fn import_dialog(props: &ImportDialogProps) -> Html {
    let summary = props.pending.summary;
    let on_cancel = props.on_choice.reform(|_| ImportChoice::Cancel);

    let step = props.pending.next_step(props.current_len);
    let body = match step {
        ImportStep::ConfirmCrossOrigin => html! {
            <>
                <Alert r#type={AlertType::Warning} title={"All links are from other sites"} inline={true}>
                    {"None of the imported favorites point at this site. They will be kept but marked with a warning. Continue?"}
                </Alert>
                <div class="import-actions">
                    <Button onclick={props.on_confirm_cross_origin.reform(|_| ())} variant={ButtonVariant::Primary}>
                        {"Continue"}
                    </Button>
                    <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>
                        {"Cancel"}
                    </Button>
                </div>
            </>
        },
        ImportStep::Apply => html! {
            <>
                <p class="import-question">{prompt(step, props.current_len)}</p>
                <div class="import-actions">
                    <Button onclick={props.on_choice.reform(|_| ImportChoice::Replace)} variant={ButtonVariant::Primary}>
                        {"Import"}
                    </Button>
                    <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>
                        {"Cancel"}
                    </Button>
                </div>
            </>
        },
        ImportStep::ChooseMode => html! {
            <>
                <p class="import-question">{prompt(step, props.current_len)}</p>
                <div class="import-actions">
                    <Button onclick={props.on_choice.reform(|_| ImportChoice::Merge)} variant={ButtonVariant::Primary}>
                        {"Merge"}
                    </Button>
                    <Button onclick={props.on_choice.reform(|_| ImportChoice::Replace)} variant={ButtonVariant::Danger}>
                        {"Replace all"}
                    </Button>
                    <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>
                        {"Cancel"}
                    </Button>
                </div>
            </>
        },
    };

    html! {
        <div class="import-dialog" role="dialog" aria-label="Import favorites">
            <h3 class="import-title">{"Import favorites"}</h3>
            <p class="import-summary">{describe(&summary)}</p>
            {body}
        </div>
    }
}
