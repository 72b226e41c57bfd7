//! Visualization module: self-contained HTML artifacts.
//!
//! Each renderer extracts what it needs from the loaded data, serializes it
//! to JSON and emits an HTML shell. Drawing happens client-side in the
//! embedded scripts (map_view.js, sankey_view.js).
pub mod map;
pub mod sankey;

pub use map::{generate_map_html, marker_radius, popup_html};
pub use sankey::generate_sankey_html;

use crate::format::escape_html;

/// Wrap `head` and `body` fragments into a standalone document.
fn document(title: &str, head: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head}
</head>
<body>
{body}
</body>
</html>
"##,
        title = escape_html(title),
        head = head,
        body = body,
    )
}
