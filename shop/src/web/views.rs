// shop/src/web/views.rs

//! HTML pages. Every value that came from a user or the database goes
//! through `escape` before it is written into markup.

use std::fmt::Write as _;

use crate::models::{Booking, Product};
use crate::web::session::SessionUser;

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      _ => out.push(ch),
    }
  }
  out
}

fn layout(title: &str, user: Option<&SessionUser>, flash: Option<&str>, body: &str) -> String {
  let nav = match user {
    Some(u) => format!(
      r#"<span class="user">Hello, {}</span> <a href="/buy/logout/">Logout</a>"#,
      escape(&u.username)
    ),
    None => r#"<a href="/buy/login/">Login</a> <a href="/buy/register/">Register</a>"#.to_string(),
  };
  let notice = flash
    .map(|m| format!(r#"<ul class="messages"><li>{}</li></ul>"#, escape(m)))
    .unwrap_or_default();

  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<nav><a href="/">Shop</a> <a href="/buy/">Buy</a> {nav}</nav>
{notice}
<main>
{body}
</main>
</body>
</html>
"#,
    title = escape(title),
    nav = nav,
    notice = notice,
    body = body,
  )
}

pub fn index_page(products: &[Product], user: Option<&SessionUser>, flash: Option<&str>) -> String {
  let mut body = String::from("<h1>Products</h1>\n<ul class=\"products\">\n");
  for p in products {
    let _ = writeln!(
      body,
      r#"<li class="product"><img src="{image}" alt="{name}"><h2>{name}</h2><p class="price">{price:.2}</p><p class="stock">In stock: {stock}</p><a href="/buy/">Buy</a></li>"#,
      image = escape(&p.image),
      name = escape(&p.name),
      price = p.price,
      stock = p.stock,
    );
  }
  body.push_str("</ul>");
  layout("Products", user, flash, &body)
}

pub fn booking_form_page(products: &[Product], user: Option<&SessionUser>, flash: Option<&str>) -> String {
  let mut options = String::new();
  for p in products {
    let _ = write!(options, r#"<option value="{}">{}</option>"#, p.id, escape(&p.to_string()));
  }
  let body = format!(
    r#"<h1>Book a product</h1>
<form method="post" action="/buy/">
<label>Name <input type="text" name="name" maxlength="200" required></label>
<label>Email <input type="text" name="email" maxlength="200" required></label>
<label>Phone <input type="text" name="phone" maxlength="200" required></label>
<label>Address <input type="text" name="address" maxlength="200" required></label>
<label>Product <select name="product" required>{options}</select></label>
<label>Feedback <input type="text" name="feedback" maxlength="200"></label>
<button type="submit">Submit</button>
</form>"#,
    options = options
  );
  layout("Buy", user, flash, &body)
}

pub fn confirmation_page(booking: &Booking, product: &Product, user: Option<&SessionUser>) -> String {
  let body = format!(
    r#"<h1>Thank you, {name}!</h1>
<p>Your booking for <strong>{product}</strong> has been received.</p>
<p>We will contact you at {email}.</p>"#,
    name = escape(&booking.name),
    product = escape(&product.name),
    email = escape(&booking.email),
  );
  layout("Booking confirmed", user, None, &body)
}

fn credentials_form(action: &str, heading: &str, submit: &str) -> String {
  format!(
    r#"<h1>{heading}</h1>
<form method="post" action="{action}">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#,
    heading = heading,
    action = action,
    submit = submit
  )
}

pub fn login_page(user: Option<&SessionUser>, flash: Option<&str>) -> String {
  let mut body = credentials_form("/buy/login/", "Login", "Login");
  body.push_str(r#"<p>No account? <a href="/buy/register/">Register</a></p>"#);
  layout("Login", user, flash, &body)
}

pub fn register_page(user: Option<&SessionUser>, flash: Option<&str>) -> String {
  let mut body = credentials_form("/buy/register/", "Register", "Register");
  body.push_str(r#"<p>Already registered? <a href="/buy/login/">Login</a></p>"#);
  layout("Register", user, flash, &body)
}

pub fn error_page(status: u16, message: &str) -> String {
  let body = format!("<h1>Error {}</h1>\n<p>{}</p>", status, escape(message));
  layout("Error", None, None, &body)
}
