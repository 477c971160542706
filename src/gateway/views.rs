//! Server-rendered HTML for the home and login pages.

use html_escape::{encode_double_quoted_attribute, encode_text};

pub const STYLESHEET: &str = r#"body {
  font-family: system-ui, sans-serif;
  background: #f4f5f7;
  margin: 0;
}
.card {
  position: absolute;
  top: 50%;
  left: 50%;
  transform: translate(-50%, -50%);
  background: #fff;
  border-radius: 8px;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
  padding: 24px 32px;
  min-width: 260px;
}
.card label { display: block; margin-top: 12px; }
.card input { width: 100%; padding: 6px; box-sizing: border-box; }
.row { display: flex; gap: 8px; margin-top: 16px; }
.notice { padding: 8px; border-radius: 4px; margin-bottom: 12px; }
.notice.negative { background: #fde2e1; color: #9b1c1c; }
.button, button { padding: 6px 14px; }
"#;

/// User-visible message shown above the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidCredentials,
    InvalidLength,
    UsernameTaken,
    Unavailable,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::InvalidCredentials => "Invalid username or password",
            Notice::InvalidLength => {
                "Username must be 3-20 characters and password 6-20 characters"
            }
            Notice::UsernameTaken => "Username already exists",
            Notice::Unavailable => "Something went wrong, please try again",
        }
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/_authgate/style.css">
</head>
<body>
<div class="card">
{body}
</div>
</body>
</html>
"#
    )
}

/// Home page; `username` is set for logged-in visitors
pub fn home_page(username: Option<&str>) -> String {
    let body = match username {
        Some(name) => format!(
            r#"<p>Welcome, {}</p>
<p><a href="/info">Profile info</a></p>
<form method="post" action="/logout"><button type="submit">Log out</button></form>"#,
            encode_text(name)
        ),
        None => r#"<p>Welcome, stranger!</p>
<p><a class="button" href="/login">Log in / Register</a></p>"#
            .to_string(),
    };
    page("Home", &body)
}

/// Combined login / register form
pub fn login_page(redirect_to: &str, username: &str, notice: Option<Notice>) -> String {
    let notice_html = notice
        .map(|n| format!(r#"<div class="notice negative">{}</div>"#, n.message()))
        .unwrap_or_default();

    let body = format!(
        r#"{notice_html}<form method="post" action="/login">
<input type="hidden" name="redirect_to" value="{redirect_to}">
<label>Username <input name="username" value="{username}" minlength="3" maxlength="20" required></label>
<label>Password <input type="password" name="password" minlength="6" maxlength="20" required></label>
<div class="row">
<button type="submit" name="action" value="login">Log in</button>
<button type="submit" name="action" value="register">Register</button>
</div>
</form>"#,
        redirect_to = encode_double_quoted_attribute(redirect_to),
        username = encode_double_quoted_attribute(username),
    );
    page("Login", &body)
}
