use crate::api::ApiClient;
use crate::components::chart::CategoryPie;
use crate::components::expense_card::ExpenseCard;
use crate::components::icons::icon_plus;
use crate::draft::DraftField;
use crate::ledger::{self, Workspace, WorkspaceAction};
use crate::models::{Category, Expense};
use crate::summary::category_totals;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, InputEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseWorkspaceProps {
    pub client: ApiClient,
}

// Bumped on mount and on teardown. A completion started under an older
// epoch belongs to a workspace that is gone and is dropped.
fn is_current(epoch: &Rc<RefCell<u64>>, started: u64, what: &str) -> bool {
    let current = *epoch.borrow() == started;
    if !current {
        log::debug!("ignoring stale {} response", what);
    }
    current
}

fn field_input(
    kind: &'static str,
    label: &'static str,
    value: &str,
    field: DraftField,
    workspace: &UseReducerHandle<Workspace>,
) -> Html {
    let dispatcher = workspace.dispatcher();
    html! {
        <div class="space-y-1">
            <label class="text-[12px] font-bold text-muted-foreground">{ label }</label>
            <input type={kind} required=true value={value.to_string()} oninput={Callback::from(move |e: InputEvent| {
                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                dispatcher.dispatch(WorkspaceAction::Edit(field, input.value()));
            })} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none" />
        </div>
    }
}

#[function_component(ExpenseWorkspace)]
pub fn expense_workspace(props: &ExpenseWorkspaceProps) -> Html {
    let workspace = use_reducer(Workspace::fetching);
    let epoch = use_mut_ref(|| 0u64);

    {
        let dispatcher = workspace.dispatcher();
        let epoch = epoch.clone();
        let client = props.client.clone();
        use_effect_with_deps(
            move |_| {
                let started = {
                    let mut current = epoch.borrow_mut();
                    *current += 1;
                    *current
                };
                let guard = epoch.clone();
                spawn_local(async move {
                    let expenses = ledger::fetch_expenses(&client).await;
                    if is_current(&guard, started, "list") {
                        dispatcher.dispatch(WorkspaceAction::Loaded(expenses));
                    }
                });
                move || *epoch.borrow_mut() += 1
            },
            props.client.token().map(str::to_string),
        );
    }

    let on_submit = {
        let workspace = workspace.clone();
        let epoch = epoch.clone();
        let client = props.client.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if workspace.submitting {
                return;
            }

            let dispatcher = workspace.dispatcher();
            let send = match ledger::handle_submit(&client, &workspace.draft) {
                Ok(send) => send,
                Err(err) => {
                    dispatcher.dispatch(WorkspaceAction::Rejected(err.to_string()));
                    return;
                }
            };

            dispatcher.dispatch(WorkspaceAction::SubmitStarted);
            let started = *epoch.borrow();
            let epoch = epoch.clone();
            spawn_local(async move {
                let result = send.await;
                if !is_current(&epoch, started, "submit") {
                    return;
                }
                match result {
                    Some(result) => dispatcher.dispatch(WorkspaceAction::Applied(result)),
                    None => dispatcher.dispatch(WorkspaceAction::SubmitFailed),
                }
            });
        })
    };

    let on_edit = {
        let dispatcher = workspace.dispatcher();
        Callback::from(move |expense: Expense| dispatcher.dispatch(WorkspaceAction::BeginEdit(expense)))
    };

    let on_delete = {
        let dispatcher = workspace.dispatcher();
        let epoch = epoch.clone();
        let client = props.client.clone();
        Callback::from(move |id: i64| {
            let dispatcher = dispatcher.clone();
            let started = *epoch.borrow();
            let epoch = epoch.clone();
            let client = client.clone();
            spawn_local(async move {
                if let Some(result) = ledger::delete(&client, id).await {
                    if is_current(&epoch, started, "delete") {
                        dispatcher.dispatch(WorkspaceAction::Applied(result));
                    }
                }
            });
        })
    };

    let on_reset = {
        let dispatcher = workspace.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(WorkspaceAction::Reset))
    };

    let on_category = {
        let dispatcher = workspace.dispatcher();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            dispatcher.dispatch(WorkspaceAction::Edit(DraftField::Category, select.value()));
        })
    };

    let draft = &workspace.draft;
    let totals = category_totals(&workspace.expenses);

    html! {
        <div class="max-w-6xl mx-auto space-y-6">
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 items-stretch">
                <div class="bg-white p-6 rounded-[10px] shadow-md border border-white/50">
                    <h2 class="text-[#173E63] text-2xl font-black text-center mb-5 tracking-tight">{"Expense Tracker"}</h2>
                    <form class="flex flex-col gap-3" onsubmit={on_submit}>
                        { field_input("date", "Date", &draft.date, DraftField::Date, &workspace) }
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                            <select required=true onchange={on_category} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none">
                                <option value="" selected={draft.category.is_empty()} disabled=true>{"Select a category"}</option>
                                { for Category::ALL.iter().map(|category| html! {
                                    <option value={category.as_str()} selected={draft.category == category.as_str()}>{ category.as_str() }</option>
                                }) }
                            </select>
                        </div>
                        { field_input("text", "Description", &draft.description, DraftField::Description, &workspace) }
                        { field_input("number", "Amount", &draft.amount, DraftField::Amount, &workspace) }

                        if let Some(msg) = &workspace.form_error {
                            <p class="text-sm text-red-500">{ msg.clone() }</p>
                        }

                        <button type="submit" disabled={workspace.submitting} class="bg-[#173E63] text-white py-2 rounded-[10px] text-[13px] font-bold flex items-center justify-center gap-2">
                            { icon_plus() }
                            { if workspace.submitting { "Saving..." } else if draft.is_editing { "Update Expense" } else { "Add Expense" } }
                        </button>
                        if draft.is_editing {
                            <button type="button" onclick={on_reset} class="bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-[13px] font-bold">{"Cancel Edit"}</button>
                        }
                    </form>
                </div>

                if !workspace.expenses.is_empty() {
                    <div class="bg-white p-6 rounded-[10px] shadow-md border border-white/50">
                        <h3 class="text-[#1D617A] font-bold text-[15px] text-center mb-4 tracking-wider">{"Expenses by Category"}</h3>
                        <CategoryPie totals={totals} />
                    </div>
                }
            </div>

            if workspace.loading {
                <p class="text-center text-muted-foreground">{"Loading..."}</p>
            } else if !workspace.expenses.is_empty() {
                <div class="space-y-3">
                    <h3 class="text-[#173E63] text-lg font-bold text-center">{"All Expenses"}</h3>
                    <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-4">
                        { for workspace.expenses.iter().map(|expense| html! {
                            <ExpenseCard
                                key={expense.id}
                                expense={expense.clone()}
                                on_edit={on_edit.clone()}
                                on_delete={on_delete.clone()}
                            />
                        }) }
                    </div>
                </div>
            }
        </div>
    }
}
