use crate::components::icons::{icon_edit, icon_trash};
use crate::models::Expense;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseCardProps {
    pub expense: Expense,
    pub on_edit: Callback<Expense>,
    pub on_delete: Callback<i64>,
}

#[function_component(ExpenseCard)]
pub fn expense_card(props: &ExpenseCardProps) -> Html {
    let on_edit = {
        let expense = props.expense.clone();
        let on_edit = props.on_edit.clone();
        Callback::from(move |_| on_edit.emit(expense.clone()))
    };
    let on_delete = {
        let id = props.expense.id;
        let on_delete = props.on_delete.clone();
        Callback::from(move |_| on_delete.emit(id))
    };
    let expense = &props.expense;

    html! {
        <div class="bg-[#fafafa] rounded-xl shadow-sm border border-border p-4 flex flex-col gap-2">
            <div class="flex justify-between items-start flex-wrap gap-2">
                <h4 class="text-[15px] font-bold text-[#173E63] break-words max-w-[78%]">{ expense.description.clone() }</h4>
                <span class="text-[15px] font-bold text-[#1D617A] whitespace-nowrap">{ format!("${}", expense.amount) }</span>
            </div>
            <div class="flex justify-between items-end">
                <div class="flex flex-col">
                    <span class="text-[11px] text-slate-400 font-bold">{ expense.date.clone() }</span>
                    <span class="bg-[#dae3f0] text-[#173E63] px-3 py-0.5 mt-1 rounded-full text-[10px] font-bold w-fit">{ expense.category.as_str() }</span>
                </div>
                <div class="flex gap-1">
                    <button onclick={on_edit} aria-label="edit" class="p-2 rounded-full hover:bg-slate-100 text-[#173E63]">{ icon_edit() }</button>
                    <button onclick={on_delete} aria-label="delete" class="p-2 rounded-full hover:bg-red-50 text-red-500">{ icon_trash() }</button>
                </div>
            </div>
        </div>
    }
}
