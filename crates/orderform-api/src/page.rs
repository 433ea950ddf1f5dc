//! # Order Form Page
//!
//! Renders the single HTML page that hosts the order form: labelled
//! controls named after [`FieldKind`] wire names, posting url-encoded
//! values to `/orders`.

use std::fmt::Write;

use orderform_core::{Color, FieldKind, FormState, QUANTITY_MAX, QUANTITY_MIN};

use crate::submit::OrderReceipt;

const TITLE: &str = "Order face masks";

/// Render the form for `state`, marking `flagged` fields as invalid.
pub fn render_form(state: &FormState, flagged: &[FieldKind], notice: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(notice) = notice {
        let _ = writeln!(body, "<p role=\"alert\">{}</p>", escape(notice));
    }
    body.push_str("<form method=\"post\" action=\"/orders\">\n");
    for kind in FieldKind::all() {
        let invalid = flagged.contains(kind);
        let control = match kind {
            FieldKind::Color => color_select(state.value(*kind), invalid),
            FieldKind::Quantity => input(
                *kind,
                "number",
                state.value(*kind),
                invalid,
                &format!(" min=\"{QUANTITY_MIN}\" max=\"{QUANTITY_MAX}\""),
            ),
            _ => input(*kind, "text", state.value(*kind), invalid, ""),
        };
        let _ = writeln!(
            body,
            "  <label for=\"{name}\">{label}\n    {control}\n  </label>",
            name = kind.as_str(),
            label = kind.label(),
        );
    }
    body.push_str("  <button type=\"submit\">Submit</button>\n</form>\n");
    document(&body)
}

/// Render the confirmation shown after an accepted order.
pub fn render_receipt(receipt: &OrderReceipt) -> String {
    let order = &receipt.order;
    let body = format!(
        "<p role=\"status\">Thanks, {name}! Order {id} for {qty} {color} mask(s) received.</p>\n\
         <p><a href=\"/\">Place another order</a></p>\n",
        name = escape(&order.first_name),
        id = receipt.order_id,
        qty = order.quantity,
        color = order.color,
    );
    document(&body)
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{TITLE}</title>\n</head>\n<body>\n<h1>{TITLE}</h1>\n{body}</body>\n</html>\n"
    )
}

fn input(kind: FieldKind, input_type: &str, value: &str, invalid: bool, extra: &str) -> String {
    format!(
        "<input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{extra}{aria} />",
        name = kind.as_str(),
        value = escape(value),
        aria = aria_invalid(invalid),
    )
}

fn color_select(selected: &str, invalid: bool) -> String {
    let mut out = format!(
        "<select id=\"color\" name=\"color\"{}>",
        aria_invalid(invalid)
    );
    let placeholder = std::iter::once(("", "Select..."));
    let options = Color::all().iter().map(|c| (c.as_str(), c.label()));
    for (value, label) in placeholder.chain(options) {
        let sel = if value == selected { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{value}\"{sel}>{label}</option>");
    }
    out.push_str("</select>");
    out
}

fn aria_invalid(invalid: bool) -> &'static str {
    if invalid {
        " aria-invalid=\"true\""
    } else {
        ""
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
