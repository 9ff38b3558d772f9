use crate::summary::{format_money, pie_slices, CategoryTotal};
use std::f64::consts::PI;
use yew::prelude::*;

// A stroke as wide as the diameter of its circle fills the whole disc.
const RADIUS: f64 = 25.0;

#[derive(Properties, PartialEq)]
pub struct CategoryPieProps {
    pub totals: Vec<CategoryTotal>,
}

#[function_component(CategoryPie)]
pub fn category_pie(props: &CategoryPieProps) -> Html {
    let circumference = 2.0 * PI * RADIUS;
    let slices = pie_slices(&props.totals, circumference);

    html! {
        <div class="flex flex-col items-center gap-4">
            <svg viewBox="0 0 100 100" class="w-64 h-64 transform -rotate-90">
                { for slices.iter().map(|slice| html! {
                    <circle
                        cx="50"
                        cy="50"
                        r={RADIUS.to_string()}
                        fill="transparent"
                        stroke={slice.color}
                        stroke-width={(RADIUS * 2.0).to_string()}
                        stroke-dasharray={format!("{} {}", slice.dash, circumference)}
                        stroke-dashoffset={(-slice.offset).to_string()}
                    >
                        <title>{ format!("{}: {}", slice.category, format_money(slice.total)) }</title>
                    </circle>
                }) }
            </svg>
            <ul class="flex flex-wrap justify-center gap-3">
                { for slices.iter().map(|slice| html! {
                    <li class="flex items-center gap-2 text-xs text-[#173E63] font-bold">
                        <span class="w-3 h-3 rounded-full" style={format!("background-color: {}", slice.color)}></span>
                        { format!("{} {} ({}%)", slice.category, format_money(slice.total), (slice.fraction * 100.0).round() as i32) }
                    </li>
                }) }
            </ul>
        </div>
    }
}
