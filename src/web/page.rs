//! HTML for the single menu page.

use std::fmt::Write;

use super::gateway::MenuView;

/// Render the menu page. `error`, when present, is shown above the list.
pub fn render(menus: &[MenuView], error: Option<&str>) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(HEAD);

    html.push_str("<h1>Menu</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(html, r#"<p class="error" role="alert">{}</p>"#, escape(error));
    }

    html.push_str(
        r#"<form class="create" method="post" action="/save">
  <input name="name" placeholder="Name" required>
  <input name="price" placeholder="Price" inputmode="decimal" required>
  <button type="submit">Add</button>
</form>
"#,
    );

    if menus.is_empty() {
        html.push_str("<p class=\"empty\">No menu items yet.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Name</th><th>Price</th><th></th></tr>\n");
        for menu in menus {
            row(&mut html, menu);
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn row(html: &mut String, menu: &MenuView) {
    let id = escape(&menu.id);
    let name = escape(&menu.name);
    let _ = write!(
        html,
        r#"<tr data-id="{id}">
  <td>
    <form method="post" action="/update">
      <input type="hidden" name="id" value="{id}">
      <input name="name" value="{name}">
      <input name="price" value="{price}" inputmode="decimal">
      <button type="submit">Save</button>
    </form>
  </td>
  <td class="price">{price}</td>
  <td>
    <form method="post" action="/remove">
      <input type="hidden" name="menuitem_id" value="{id}">
      <button type="submit">Remove</button>
    </form>
  </td>
</tr>
"#,
        price = menu.price,
    );
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Menu</title>
<style>
  body { font-family: sans-serif; margin: 40px; }
  .error { color: #b00020; }
  td, th { padding: 4px 8px; text-align: left; }
</style>
</head>
<body>
"#;
