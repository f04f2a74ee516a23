//! HTML views for the public gallery and the admin dashboard.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! malformed markup is a build error and all interpolation is auto-escaped.
//! CSS and the dashboard script are embedded at compile time, so the binary
//! ships no template or asset directory.

use crate::inquiry;
use crate::types::{ImageRecord, ImageStatus, StatusFilter};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../../static/style.css");
const ADMIN_JS: &str = include_str!("../../static/admin.js");

/// Upload dates render as e.g. "June 01, 2025".
const DATE_FORMAT: &str = "%B %d, %Y";

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${p:.2}"),
        None => "Price on request".to_string(),
    }
}

// ============================================================================
// Public gallery
// ============================================================================

/// The public storefront: approved images, newest first.
pub fn gallery_page(images: &[ImageRecord], phone: &str) -> Markup {
    base_document(
        "Gallery",
        html! {
            h1 { "Gallery" }
            @if images.is_empty() {
                p.empty-note { "Nothing here yet. Check back soon." }
            }
            div.gallery-grid {
                @for record in images {
                    (gallery_card(record, phone))
                }
            }
        },
    )
}

fn gallery_card(record: &ImageRecord, phone: &str) -> Markup {
    html! {
        div.gallery-card {
            img src={ "/images/" (record.filename) } alt=(record.filename) loading="lazy";
            div.card-meta {
                span.price { (format_price(record.price)) }
                span.upload-date { (record.date_uploaded.format(DATE_FORMAT)) }
            }
            a.inquire-link href=(inquiry::inquiry_link(phone, &record.filename)) {
                "Inquire"
            }
        }
    }
}

// ============================================================================
// Admin dashboard
// ============================================================================

const FILTERS: &[(&str, &str)] = &[
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("trash", "Trash"),
    ("all", "All"),
];

/// The moderation dashboard, filtered by status.
pub fn admin_page(images: &[ImageRecord], current: StatusFilter) -> Markup {
    base_document(
        "Admin · moderation queue",
        html! {
            h1 { "Moderation queue" }
            (filter_nav(current))
            @if images.is_empty() {
                p.empty-note { "No images match this filter." }
            } @else {
                table.admin-table {
                    thead {
                        tr {
                            th { "#" }
                            th { "Preview" }
                            th { "Filename" }
                            th { "Status" }
                            th { "Price" }
                            th { "Uploaded" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        @for record in images {
                            (admin_row(record))
                        }
                    }
                }
            }
            script { (PreEscaped(ADMIN_JS)) }
        },
    )
}

fn filter_nav(current: StatusFilter) -> Markup {
    let current_value = current.to_string();
    html! {
        nav.filter-nav {
            @for (value, label) in FILTERS {
                a class=[(current_value == *value).then_some("current")]
                    href={ "/admin?status=" (value) } {
                    (label)
                }
            }
        }
    }
}

fn admin_row(record: &ImageRecord) -> Markup {
    let status = record.moderation.status();
    html! {
        tr {
            td { (record.id) }
            td {
                img src={ "/images/" (record.filename) } alt=(record.filename) loading="lazy";
            }
            td { (record.filename) }
            td {
                span class={ "status-" (status) } { (status) }
                @if let Some(at) = record.moderation.trash_date() {
                    br;
                    span.upload-date { "trashed " (at.format(DATE_FORMAT)) }
                }
            }
            td { (format_price(record.price)) }
            td { (record.date_uploaded.format(DATE_FORMAT)) }
            td {
                @if status != ImageStatus::Approved {
                    button data-set-status="approved" data-id=(record.id) { "Approve" }
                }
                @if status != ImageStatus::Pending {
                    button data-set-status="pending" data-id=(record.id) { "To pending" }
                }
                @if status != ImageStatus::Trash {
                    button data-set-status="trash" data-id=(record.id) { "Trash" }
                }
                button data-edit-price=""
                    data-id=(record.id)
                    data-price=[record.price.map(|p| format!("{p:.2}"))] {
                    "Set price"
                }
            }
        }
    }
}
