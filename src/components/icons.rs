use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_edit() -> Html {
    icon_base("M12 20h9M16.5 3.5a2.1 2.1 0 013 3L7 19l-4 1 1-4z")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
