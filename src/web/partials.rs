use maud::{html, Markup};

use crate::auth::Identity;
use crate::records::Record;
use crate::resource::Resource;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://unpkg.com/bulma-prefers-dark";
        link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.3/css/all.min.css" integrity="sha512-iBBXm8fW90+nuLcSKlbmrPcLa0OT92xO1BIsZ+ywDWZCvqsWgccV3gFoRBv0z+8dLJgyAHIhR35VZc2oM/gI1w==" crossorigin="anonymous" referrerpolicy="no-referrer";
    }
}

pub fn icon_text(class: &str, text: &str) -> Markup {
    html! {
        span.icon-text.is-flex-wrap-nowrap {
            span.icon { i class=(class) {} }
            span { (text) }
        }
    }
}

pub fn navbar(active: Resource, identity: &Identity) -> Markup {
    html! {
        nav.navbar.has-shadow role="navigation" aria-label="main navigation" {
            div.navbar-brand {
                @for resource in Resource::ALL {
                    a.navbar-item.is-tab.is-active[resource == active] href=(resource.dashboard_path()) {
                        (resource.title())
                    }
                }
            }
            div.navbar-menu {
                div.navbar-end {
                    div.navbar-item {
                        (icon_text("fas fa-user", identity.name()))
                    }
                    a.navbar-item href="/sign-out" {
                        (icon_text("fas fa-sign-out-alt", "Sign out"))
                    }
                }
            }
        }
    }
}

/// Renders the records as a table, the columns follow the CSV header.
pub fn records_table(records: &[Record]) -> Markup {
    let Some(first) = records.first() else {
        return html! { div.notification { "No records." } };
    };
    html! {
        div.table-container {
            table.table.is-hoverable.is-striped.is-fullwidth {
                thead {
                    tr {
                        @for column in first.columns() {
                            th { (column) }
                        }
                    }
                }
                tbody {
                    @for record in records {
                        tr {
                            @for (_, value) in record.iter() {
                                td { (value) }
                            }
                        }
                    }
                }
            }
        }
    }
}
